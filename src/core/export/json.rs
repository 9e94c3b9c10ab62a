//! JSON bundle export.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::character_gen::{GeneratedCharacter, StatBlock};
use crate::core::dna::DecodedDna;
use crate::core::forge::{ForgeOutcome, PortraitState};
use crate::core::profile::ProfileParse;

#[derive(Debug, Serialize)]
pub struct ExportBundle<'a> {
    pub exported_at: DateTime<Utc>,
    pub generator: &'static str,
    pub character: &'a GeneratedCharacter,
    pub dna: String,
    pub personality: &'a DecodedDna,
    pub stat_block: &'a StatBlock,
    pub profile: &'a ProfileParse,
    pub profile_markdown: &'a str,
    pub portrait: Option<PortraitJson<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PortraitJson<'a> {
    pub mime_type: &'a str,
    pub base64: String,
}

impl<'a> ExportBundle<'a> {
    pub fn new(outcome: &'a ForgeOutcome) -> Self {
        let portrait = match &outcome.portrait {
            PortraitState::Ready(p) => Some(PortraitJson {
                mime_type: &p.mime_type,
                base64: p.to_base64(),
            }),
            _ => None,
        };
        Self {
            exported_at: Utc::now(),
            generator: concat!("charforge ", env!("CARGO_PKG_VERSION")),
            character: &outcome.character,
            dna: outcome.dna.to_string(),
            personality: &outcome.decoded,
            stat_block: &outcome.stat_block,
            profile: &outcome.profile,
            profile_markdown: &outcome.profile_text,
            portrait,
        }
    }
}

pub fn render_json(outcome: &ForgeOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ExportBundle::new(outcome))
}
