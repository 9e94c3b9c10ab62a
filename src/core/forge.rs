//! Generation Pipeline
//!
//! roll → encode DNA → (profile ‖ portrait) → parse.
//!
//! The profile and portrait calls run concurrently. A failed portrait is
//! reported as [`PortraitState::Failed`] next to an otherwise complete
//! result; a failed profile fails the whole cycle.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::ai::{
    AiError, CharacterContext, GeminiClient, Portrait, PortraitGenerator, PortraitRequest,
    ProfileGenerator, ProfileRequest,
};
use crate::core::character_gen::{CharacterGenerator, GeneratedCharacter, StatBlock};
use crate::core::dna::{DecodedDna, Dna, DnaCodec, DnaError};
use crate::core::profile::{parse_profile, ProfileParse, SectionCatalog};

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Profile generation failed: {0}")]
    Profile(#[source] AiError),

    #[error("Generated DNA did not decode: {0}")]
    Dna(#[from] DnaError),
}

impl ForgeError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            ForgeError::Profile(e) => e.is_recoverable(),
            ForgeError::Dna(_) => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ForgeError::Profile(e) => format!("Profile generation failed: {}", e.user_message()),
            ForgeError::Dna(e) => e.to_string(),
        }
    }
}

/// Portrait outcome; never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortraitState {
    Ready(Portrait),
    Failed { reason: String },
    /// Portraits are disabled or no image service is configured.
    Skipped,
}

impl PortraitState {
    pub fn portrait(&self) -> Option<&Portrait> {
        match self {
            PortraitState::Ready(p) => Some(p),
            _ => None,
        }
    }

    pub fn status_label(&self) -> String {
        match self {
            PortraitState::Ready(p) => format!("{} ({} KB)", p.mime_type, p.data.len() / 1024),
            PortraitState::Failed { reason } => format!("unavailable: {}", reason),
            PortraitState::Skipped => "disabled".to_string(),
        }
    }
}

/// Everything rolled locally before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgeSeed {
    pub character: GeneratedCharacter,
    pub dna: Dna,
}

/// A completed generation cycle.
#[derive(Debug, Clone)]
pub struct ForgeOutcome {
    pub character: GeneratedCharacter,
    pub dna: Dna,
    pub decoded: DecodedDna,
    pub stat_block: StatBlock,
    pub profile_text: String,
    pub profile: ProfileParse,
    pub portrait: PortraitState,
}

impl ForgeOutcome {
    pub fn display_name(&self) -> &str {
        self.profile
            .parsed()
            .and_then(|p| p.name.as_deref())
            .unwrap_or(&self.character.name)
    }
}

pub struct Forge {
    profiles: Arc<dyn ProfileGenerator>,
    portraits: Option<Arc<dyn PortraitGenerator>>,
    catalog: SectionCatalog,
    portrait_style: String,
    codec: DnaCodec<'static>,
}

impl Forge {
    pub fn new(
        profiles: Arc<dyn ProfileGenerator>,
        portraits: Option<Arc<dyn PortraitGenerator>>,
    ) -> Self {
        Self {
            profiles,
            portraits,
            catalog: SectionCatalog::standard(),
            portrait_style: crate::core::ai::prompts::DEFAULT_PORTRAIT_STYLE.to_string(),
            codec: DnaCodec::standard(),
        }
    }

    /// Gemini-backed forge. Fails with `NotConfigured` when no key is set.
    pub fn from_config(config: &AppConfig) -> Result<Self, AiError> {
        let client = Arc::new(GeminiClient::from_config(&config.ai)?);
        let portraits: Option<Arc<dyn PortraitGenerator>> = if config.ai.portraits {
            Some(client.clone() as Arc<dyn PortraitGenerator>)
        } else {
            None
        };
        Ok(Self::new(client, portraits)
            .with_catalog(config.catalog())
            .with_portrait_style(&config.ai.portrait_style))
    }

    pub fn with_catalog(mut self, catalog: SectionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_portrait_style(mut self, style: &str) -> Self {
        self.portrait_style = style.to_string();
        self
    }

    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    pub fn codec(&self) -> &DnaCodec<'static> {
        &self.codec
    }

    /// Roll a character and its DNA. Synchronous so the RNG never crosses an await.
    pub fn roll(&self, generator: &CharacterGenerator, rng: &mut impl Rng) -> ForgeSeed {
        ForgeSeed {
            character: generator.generate(rng),
            dna: self.codec.encode(rng),
        }
    }

    pub async fn generate(&self, seed: ForgeSeed) -> Result<ForgeOutcome, ForgeError> {
        let ForgeSeed { character, dna } = seed;
        let decoded = self.codec.try_decode(&dna.to_string())?;

        let context = CharacterContext::from(&character);
        let profile_request = ProfileRequest {
            character: context.clone(),
            dna: dna.to_string(),
            dna_summary: decoded.describe(),
            section_titles: self.catalog.titles().map(str::to_string).collect(),
        };
        let portrait_request = PortraitRequest {
            character: context,
            style: self.portrait_style.clone(),
        };

        info!(name = %character.name, dna = %dna, "Forging character");

        let (profile_result, portrait) = tokio::join!(
            self.profiles.generate_profile(&profile_request),
            self.portrait_for(&portrait_request),
        );

        let profile_text = match profile_result {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, provider = self.profiles.name(), "Profile generation failed");
                return Err(ForgeError::Profile(e));
            }
        };

        let profile = parse_profile(&profile_text, &self.catalog);
        let stat_block = character.stat_block();

        Ok(ForgeOutcome {
            character,
            dna,
            decoded,
            stat_block,
            profile_text,
            profile,
            portrait,
        })
    }

    /// Ask only for a new portrait of an existing character.
    pub async fn regenerate_portrait(&self, character: &GeneratedCharacter) -> PortraitState {
        let request = PortraitRequest {
            character: CharacterContext::from(character),
            style: self.portrait_style.clone(),
        };
        self.portrait_for(&request).await
    }

    async fn portrait_for(&self, request: &PortraitRequest) -> PortraitState {
        let Some(portraits) = &self.portraits else {
            return PortraitState::Skipped;
        };
        match portraits.generate_portrait(request).await {
            Ok(portrait) => PortraitState::Ready(portrait),
            Err(e) => {
                warn!(error = %e, provider = portraits.name(), "Portrait generation failed");
                PortraitState::Failed {
                    reason: e.user_message(),
                }
            }
        }
    }
}
