//! End-to-end pipeline through the public API: roll, forge with stand-in
//! AI services, parse, and export to disk.

use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use charforge::core::ai::{
    AiError, Portrait, PortraitGenerator, PortraitRequest, ProfileGenerator, ProfileRequest,
};
use charforge::core::character_gen::{CharacterGenerator, Gender, GenerationOptions};
use charforge::core::export::export_to_dir;
use charforge::core::forge::{Forge, PortraitState};

/// Writes one `## Title` section per requested title.
struct EchoProfiles;

#[async_trait]
impl ProfileGenerator for EchoProfiles {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate_profile(&self, request: &ProfileRequest) -> Result<String, AiError> {
        let mut text = format!(
            "# {}\n\n**Role:** {} | **Alignment:** Chaotic Good\n\n",
            request.character.name, request.character.profession
        );
        for title in &request.section_titles {
            text.push_str(&format!("## {title}\nNotes on {}.\n\n", title.to_lowercase()));
        }
        Ok(text)
    }
}

struct BrokenEasel;

#[async_trait]
impl PortraitGenerator for BrokenEasel {
    fn name(&self) -> &str {
        "broken"
    }

    async fn generate_portrait(&self, _request: &PortraitRequest) -> Result<Portrait, AiError> {
        Err(AiError::Api {
            status: 500,
            message: "easel fell over".to_string(),
        })
    }
}

fn generator() -> CharacterGenerator {
    CharacterGenerator::with_options(GenerationOptions {
        name: Some("Tamsin Vale".to_string()),
        race: Some("Halfling".to_string()),
        gender: Some(Gender::Female),
        profession: Some("Innkeeper".to_string()),
    })
}

#[tokio::test]
async fn forge_and_export_one_character() {
    let easel: Arc<dyn PortraitGenerator> = Arc::new(BrokenEasel);
    let forge = Forge::new(Arc::new(EchoProfiles), Some(easel));
    let seed = forge.roll(&generator(), &mut StdRng::seed_from_u64(2024));
    assert_eq!(seed.character.name, "Tamsin Vale");

    let outcome = forge.generate(seed).await.expect("profile succeeds");

    let profile = outcome.profile.parsed().expect("parsed profile");
    assert_eq!(profile.filled_sections().count(), forge.catalog().len());
    assert_eq!(profile.role.as_deref(), Some("Innkeeper"));
    assert_eq!(profile.alignment.as_deref(), Some("Chaotic Good"));
    assert!(matches!(outcome.portrait, PortraitState::Failed { .. }));
    assert_eq!(outcome.stat_block.speed, 25);
    assert_eq!(outcome.stat_block.template, "Noble");

    let dir = TempDir::new().expect("temp dir");
    let files = export_to_dir(&outcome, dir.path(), true).expect("export succeeds");

    let html = std::fs::read_to_string(&files.html).expect("html written");
    assert_eq!(
        html.matches("<button data-tab=").count(),
        1 + forge.catalog().len()
    );
    assert!(html.contains("Portrait unavailable"));
    assert!(files.json.is_some_and(|p| p.ends_with("tamsin-vale.json")));
}

#[tokio::test]
async fn same_seed_same_character() {
    let forge = Forge::new(Arc::new(EchoProfiles), None);
    let a = forge.roll(&CharacterGenerator::new(), &mut StdRng::seed_from_u64(7));
    let b = forge.roll(&CharacterGenerator::new(), &mut StdRng::seed_from_u64(7));
    assert_eq!(a.character, b.character);
    assert_eq!(a.dna.to_string(), b.dna.to_string());
}
