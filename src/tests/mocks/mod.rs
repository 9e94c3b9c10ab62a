//! In-memory AI collaborators and fixtures for testing the forge in isolation.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::ai::{
    AiError, Portrait, PortraitGenerator, PortraitRequest, ProfileGenerator, ProfileRequest,
    Result as AiResult,
};
use crate::core::character_gen::CharacterGenerator;
use crate::core::forge::{Forge, ForgeSeed};

// ============================================================================
// Fixtures
// ============================================================================

/// A well-formed profile with every standard section.
pub const FULL_PROFILE: &str = "\
# Brom Ironfoot

**Role:** Blacksmith | **Alignment:** Lawful Good

| Trait | Value |
|-------|-------|
| Age | 52 |
| Voice | Gravelly |

## Appearance
Broad shoulders and a scorched leather apron.

## Personality
Patient, blunt, and generous with advice.

## Backstory
Forged arms for the border wardens for thirty years.

## Motivations
Wants to see his apprentice surpass him.

## Fears and Flaws
Fears fire he cannot control. Stubborn to a fault.

## Relationships
- Old friend of the garrison captain

## Skills and Talents
Master smith, fair judge of steel.

## Mannerisms
Taps the anvil twice before starting work.

## Secrets
Once forged a blade for a known assassin.

## Adventure Hooks
- A stolen hammer carries his maker's mark.

## Notable Quotes
> \"Good steel remembers the hand that made it.\"
";

/// One pixel PNG header bytes; enough to look like an image.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn sample_seed(forge: &Forge, seed: u64) -> ForgeSeed {
    forge.roll(&CharacterGenerator::new(), &mut seeded_rng(seed))
}

// ============================================================================
// Profile generator
// ============================================================================

/// What a mock collaborator answers with.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    /// An API error with this HTTP status.
    Status(u16),
    NoImage,
}

impl<T: Clone> Reply<T> {
    fn resolve(&self) -> AiResult<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status) => Err(AiError::Api {
                status: *status,
                message: format!("mock status {status}"),
            }),
            Reply::NoImage => Err(AiError::NoImage),
        }
    }
}

pub struct MockProfiles {
    reply: Reply<String>,
    calls: AtomicUsize,
    last_titles: std::sync::Mutex<Vec<String>>,
}

impl MockProfiles {
    pub fn new(reply: Reply<String>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_titles: std::sync::Mutex::new(Vec::new()),
        })
    }

    pub fn text(text: &str) -> Arc<Self> {
        Self::new(Reply::Ok(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_titles(&self) -> Vec<String> {
        self.last_titles.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ProfileGenerator for MockProfiles {
    fn name(&self) -> &str {
        "mock-profiles"
    }

    async fn generate_profile(&self, request: &ProfileRequest) -> AiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut titles) = self.last_titles.lock() {
            *titles = request.section_titles.clone();
        }
        self.reply.resolve()
    }
}

// ============================================================================
// Portrait generator
// ============================================================================

pub struct MockPortraits {
    reply: Reply<Portrait>,
    calls: AtomicUsize,
}

impl MockPortraits {
    pub fn new(reply: Reply<Portrait>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn png() -> Arc<Self> {
        Self::new(Reply::Ok(Portrait {
            mime_type: "image/png".to_string(),
            data: PNG_BYTES.to_vec(),
        }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortraitGenerator for MockPortraits {
    fn name(&self) -> &str {
        "mock-portraits"
    }

    async fn generate_portrait(&self, _request: &PortraitRequest) -> AiResult<Portrait> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.resolve()
    }
}
