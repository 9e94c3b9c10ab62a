//! Forge pipeline tests with in-memory collaborators.

use std::sync::Arc;

use crate::core::ai::{PortraitGenerator, ProfileGenerator};
use crate::core::forge::{Forge, ForgeError, PortraitState};
use crate::core::profile::{ProfileParse, SectionCatalog, SectionSpec};
use crate::tests::mocks::{sample_seed, MockPortraits, MockProfiles, Reply, FULL_PROFILE, PNG_BYTES};

fn forge_with(profiles: Arc<MockProfiles>, portraits: Option<Arc<MockPortraits>>) -> Forge {
    Forge::new(
        profiles as Arc<dyn ProfileGenerator>,
        portraits.map(|p| p as Arc<dyn PortraitGenerator>),
    )
}

// ============================================================================
// Rolling
// ============================================================================

#[test]
fn test_roll_is_reproducible() {
    let forge = forge_with(MockProfiles::text(FULL_PROFILE), None);
    let a = sample_seed(&forge, 11);
    let b = sample_seed(&forge, 11);
    assert_eq!(a.character, b.character);
    assert_eq!(a.dna.to_string(), b.dna.to_string());
}

#[test]
fn test_rolled_dna_decodes() {
    let forge = forge_with(MockProfiles::text(FULL_PROFILE), None);
    let seed = sample_seed(&forge, 3);
    assert!(forge.codec().decode(&seed.dna.to_string()).is_some());
}

// ============================================================================
// Generation
// ============================================================================

#[tokio::test]
async fn test_generate_with_profile_and_portrait() {
    let profiles = MockProfiles::text(FULL_PROFILE);
    let portraits = MockPortraits::png();
    let forge = forge_with(profiles.clone(), Some(portraits.clone()));
    let seed = sample_seed(&forge, 42);
    let expected_stats = seed.character.stat_block();

    let outcome = forge.generate(seed).await.expect("generation succeeds");

    assert_eq!(profiles.calls(), 1);
    assert_eq!(portraits.calls(), 1);
    assert_eq!(outcome.display_name(), "Brom Ironfoot");
    assert_eq!(outcome.stat_block, expected_stats);
    assert_eq!(outcome.profile_text, FULL_PROFILE);
    assert_eq!(
        outcome.profile.parsed().map(|p| p.filled_sections().count()),
        Some(11)
    );
    match &outcome.portrait {
        PortraitState::Ready(p) => assert_eq!(p.data, PNG_BYTES),
        other => panic!("expected a portrait, got {other:?}"),
    }
}

#[tokio::test]
async fn test_prompt_lists_catalog_titles() {
    let profiles = MockProfiles::text(FULL_PROFILE);
    let forge = forge_with(profiles.clone(), None);
    forge
        .generate(sample_seed(&forge, 1))
        .await
        .expect("generation succeeds");

    let expected: Vec<String> = SectionCatalog::standard()
        .titles()
        .map(str::to_string)
        .collect();
    assert_eq!(profiles.last_titles(), expected);
}

#[tokio::test]
async fn test_portrait_failure_keeps_profile() {
    let forge = forge_with(
        MockProfiles::text(FULL_PROFILE),
        Some(MockPortraits::new(Reply::NoImage)),
    );
    let outcome = forge
        .generate(sample_seed(&forge, 5))
        .await
        .expect("profile still succeeds");

    assert!(matches!(outcome.portrait, PortraitState::Failed { .. }));
    assert!(outcome.profile.parsed().is_some());
}

#[tokio::test]
async fn test_profile_failure_fails_cycle() {
    let portraits = MockPortraits::png();
    let forge = forge_with(
        MockProfiles::new(Reply::Status(503)),
        Some(portraits.clone()),
    );
    let err = forge
        .generate(sample_seed(&forge, 5))
        .await
        .expect_err("profile failure is fatal");

    assert!(matches!(err, ForgeError::Profile(_)));
    assert!(err.is_recoverable());
    // Both calls were in flight together.
    assert_eq!(portraits.calls(), 1);
}

#[tokio::test]
async fn test_rejected_key_message() {
    let forge = forge_with(MockProfiles::new(Reply::Status(401)), None);
    let err = forge
        .generate(sample_seed(&forge, 2))
        .await
        .expect_err("401 fails");
    assert!(!err.is_recoverable());
    assert!(err.user_message().contains("rejected the API key"));
}

#[tokio::test]
async fn test_without_portrait_service_is_skipped() {
    let forge = forge_with(MockProfiles::text(FULL_PROFILE), None);
    let outcome = forge
        .generate(sample_seed(&forge, 8))
        .await
        .expect("generation succeeds");
    assert_eq!(outcome.portrait, PortraitState::Skipped);
}

#[tokio::test]
async fn test_bad_catalog_yields_raw_profile() {
    let forge = forge_with(MockProfiles::text(FULL_PROFILE), None).with_catalog(
        SectionCatalog::new(vec![SectionSpec::new("bad", "Bad", "[")]),
    );
    let outcome = forge
        .generate(sample_seed(&forge, 8))
        .await
        .expect("raw text is still a result");

    assert!(matches!(outcome.profile, ProfileParse::Raw { .. }));
    // Falls back to the rolled name.
    assert_eq!(outcome.display_name(), outcome.character.name);
}

#[tokio::test]
async fn test_regenerate_portrait_only_calls_image_service() {
    let profiles = MockProfiles::text(FULL_PROFILE);
    let portraits = MockPortraits::png();
    let forge = forge_with(profiles.clone(), Some(portraits.clone()));
    let seed = sample_seed(&forge, 9);

    let state = forge.regenerate_portrait(&seed.character).await;

    assert!(state.portrait().is_some());
    assert_eq!(profiles.calls(), 0);
    assert_eq!(portraits.calls(), 1);
}
