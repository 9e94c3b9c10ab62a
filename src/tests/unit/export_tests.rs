//! Export Tests
//!
//! HTML structure and JSON bundle contents for parsed, raw and
//! portrait-less outcomes.

use std::sync::Arc;

use tempfile::TempDir;

use crate::core::ai::{PortraitGenerator, ProfileGenerator};
use crate::core::export::{export_to_dir, render_html, render_json};
use crate::core::forge::{Forge, ForgeOutcome};
use crate::core::profile::{SectionCatalog, SectionSpec};
use crate::tests::mocks::{sample_seed, MockPortraits, MockProfiles, FULL_PROFILE};

async fn outcome(text: &str, with_portrait: bool, catalog: Option<SectionCatalog>) -> ForgeOutcome {
    let portraits: Option<Arc<dyn PortraitGenerator>> = if with_portrait {
        Some(MockPortraits::png() as Arc<dyn PortraitGenerator>)
    } else {
        None
    };
    let profiles: Arc<dyn ProfileGenerator> = MockProfiles::text(text);
    let mut forge = Forge::new(profiles, portraits);
    if let Some(catalog) = catalog {
        forge = forge.with_catalog(catalog);
    }
    let seed = sample_seed(&forge, 21);
    forge.generate(seed).await.expect("generation succeeds")
}

#[tokio::test]
async fn test_html_has_one_tab_per_section() {
    let outcome = outcome(FULL_PROFILE, true, None).await;
    let html = render_html(&outcome);

    // Overview plus eleven sections.
    assert_eq!(html.matches("<button data-tab=").count(), 12);
    assert_eq!(html.matches("<section class=\"tab").count(), 12);
    assert!(html.contains(">Fears and Flaws</button>"));
    assert!(html.contains("id=\"sec-fears-and-flaws\""));
    assert!(html.contains("<title>Brom Ironfoot</title>"));
    assert!(html.contains("src=\"data:image/png;base64,"));
    assert!(html.contains("Lawful Good"));
}

#[tokio::test]
async fn test_html_without_portrait_uses_placeholder() {
    let outcome = outcome(FULL_PROFILE, false, None).await;
    let html = render_html(&outcome);
    assert!(html.contains("portrait placeholder"));
    assert!(!html.contains("data:image/"));
}

#[tokio::test]
async fn test_raw_profile_is_escaped_in_fallback_tab() {
    let text = "<b>Unsplittable</b> profile";
    let catalog = SectionCatalog::new(vec![SectionSpec::new("bad", "Bad", "(")]);
    let outcome = outcome(text, false, Some(catalog)).await;
    let html = render_html(&outcome);

    assert!(html.contains(">Profile (raw)</button>"));
    assert!(html.contains("<pre class=\"raw\">&lt;b&gt;Unsplittable&lt;/b&gt; profile</pre>"));
}

#[tokio::test]
async fn test_unrecognised_text_gets_single_profile_tab() {
    let outcome = outcome("A short note with no headers.", false, None).await;
    let html = render_html(&outcome);

    assert_eq!(html.matches("<button data-tab=").count(), 2);
    assert!(html.contains("data-tab=\"tab-profile\""));
    assert!(html.contains("only partly recognised"));
}

#[tokio::test]
async fn test_custom_keys_never_share_a_tab_id() {
    let text = "## Overview\nFirst.\n\n## A B\nSecond.\n\n## A-B\nThird.\n";
    let catalog = SectionCatalog::new(vec![
        SectionSpec::literal("overview", "Overview"),
        SectionSpec::literal("a_b", "A B"),
        SectionSpec::literal("a-b", "A-B"),
    ]);
    let outcome = outcome(text, false, Some(catalog)).await;
    let html = render_html(&outcome);

    for id in ["tab-overview", "sec-overview", "sec-a-b", "sec-a-b-2"] {
        assert_eq!(html.matches(&format!("id=\"{id}\"")).count(), 1, "{id}");
        assert_eq!(html.matches(&format!("data-tab=\"{id}\"")).count(), 1, "{id}");
    }
}

#[tokio::test]
async fn test_json_bundle() {
    let outcome = outcome(FULL_PROFILE, true, None).await;
    let json: serde_json::Value =
        serde_json::from_str(&render_json(&outcome).expect("serializes")).expect("valid json");

    assert_eq!(json["dna"], outcome.dna.to_string());
    assert_eq!(json["character"]["name"], outcome.character.name);
    assert_eq!(json["profile"]["kind"], "parsed");
    assert_eq!(json["portrait"]["mime_type"], "image/png");
    assert!(json["portrait"]["base64"].as_str().is_some_and(|b| !b.is_empty()));
    assert_eq!(json["profile_markdown"], FULL_PROFILE);
}

#[tokio::test]
async fn test_export_to_dir_writes_files() {
    let dir = TempDir::new().expect("temp dir");
    let outcome = outcome(FULL_PROFILE, false, None).await;

    let files = export_to_dir(&outcome, dir.path(), true).expect("export succeeds");

    assert_eq!(files.html, dir.path().join("brom-ironfoot.html"));
    assert!(files.html.exists());
    let json = files.json.expect("json requested");
    assert!(json.exists());
    assert!(std::fs::read_to_string(&json)
        .expect("readable")
        .contains("\"portrait\": null"));
}

#[tokio::test]
async fn test_export_without_json() {
    let dir = TempDir::new().expect("temp dir");
    let outcome = outcome(FULL_PROFILE, false, None).await;
    let files = export_to_dir(&outcome, &dir.path().join("nested"), false).expect("export succeeds");
    assert!(files.json.is_none());
    assert!(files.html.exists());
}
