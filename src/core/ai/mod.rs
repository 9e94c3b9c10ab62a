//! AI Collaborators
//!
//! Two narrow seams: a text service that writes the narrative profile and
//! an image service that paints the portrait. [`GeminiClient`] implements
//! both against the Generative Language API; tests substitute mocks.

pub mod error;
pub mod gemini;
pub mod prompts;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::core::character_gen::GeneratedCharacter;

pub use error::{AiError, Result};
pub use gemini::GeminiClient;

// ============================================================================
// Request / Response Types
// ============================================================================

/// Character fields sent to both services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterContext {
    pub name: String,
    pub race: String,
    pub gender: String,
    pub profession: String,
    /// Comma-separated physical descriptors.
    pub physical: String,
    pub description: String,
}

impl From<&GeneratedCharacter> for CharacterContext {
    fn from(c: &GeneratedCharacter) -> Self {
        let a = &c.appearance;
        let mut physical = vec![
            a.age.clone(),
            a.height.clone(),
            format!("{} build", a.build),
            format!("{} hair", a.hair),
            format!("{} eyes", a.eyes),
            format!("{} skin", a.skin),
        ];
        if let Some(mark) = &a.mark {
            physical.push(mark.clone());
        }
        Self {
            name: c.name.clone(),
            race: c.race.clone(),
            gender: c.gender.to_string(),
            profession: c.profession.clone(),
            physical: physical.join(", "),
            description: c.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub character: CharacterContext,
    /// Wire-format DNA string.
    pub dna: String,
    /// Human-readable decoding of `dna`.
    pub dna_summary: String,
    /// Section titles the profile must use, in order.
    pub section_titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortraitRequest {
    pub character: CharacterContext,
    pub style: String,
}

/// Decoded image returned by the portrait service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portrait {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Portrait {
    pub fn from_base64(mime_type: impl Into<String>, encoded: &str) -> Result<Self> {
        let data = STANDARD.decode(encoded.trim())?;
        if data.is_empty() {
            return Err(AiError::NoImage);
        }
        Ok(Self {
            mime_type: mime_type.into(),
            data,
        })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Writes the narrative markdown profile.
#[async_trait]
pub trait ProfileGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate_profile(&self, request: &ProfileRequest) -> Result<String>;
}

/// Paints the character portrait.
#[async_trait]
pub trait PortraitGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate_portrait(&self, request: &PortraitRequest) -> Result<Portrait>;
}
