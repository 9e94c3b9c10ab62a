//! Profile Section Extractor Tests
//!
//! Header recognition across markup styles, ordering, and the degraded and
//! raw fallbacks.

use crate::core::profile::{
    parse_profile, ProfileParse, ProfileParser, SectionCatalog, SectionSpec,
};
use crate::tests::mocks::FULL_PROFILE;

fn parser() -> ProfileParser {
    ProfileParser::new(&SectionCatalog::standard()).expect("standard catalog compiles")
}

// ============================================================================
// Well-formed input
// ============================================================================

#[test]
fn test_full_profile_fills_every_section() {
    let profile = parser().parse(FULL_PROFILE);

    assert_eq!(profile.name.as_deref(), Some("Brom Ironfoot"));
    assert_eq!(profile.role.as_deref(), Some("Blacksmith"));
    assert_eq!(profile.alignment.as_deref(), Some("Lawful Good"));
    assert_eq!(profile.summary.len(), 2);
    assert_eq!(profile.summary[0].label, "Age");
    assert_eq!(profile.summary[0].value, "52");
    assert_eq!(profile.filled_sections().count(), 11);
    assert!(!profile.degraded);

    assert_eq!(
        profile.section("secrets"),
        Some("Once forged a blade for a known assassin.")
    );
    assert!(profile
        .section("notable_quotes")
        .is_some_and(|q| q.contains("Good steel remembers")));
}

#[test]
fn test_scrambled_headers_in_mixed_styles() {
    let text = "\
**Secrets**
Body of secrets.

3. Adventure Hooks
Body of hooks.

### Mannerisms:
Body of mannerisms.

__Relationships__
Body of relationships.

Skills & Talents:
Body of skills.

## FEARS & FLAWS
Body of flaws.

Motivations: wants gold
Body of motivations.

# Backstory
Body of backstory.

**Personality:**
Body of personality.

1) Appearance
Body of appearance.

## Notable Quotes
Body of quotes.
";
    let profile = parser().parse(text);

    assert_eq!(profile.filled_sections().count(), 11);
    assert_eq!(profile.section("secrets"), Some("Body of secrets."));
    assert_eq!(profile.section("adventure_hooks"), Some("Body of hooks."));
    assert_eq!(profile.section("mannerisms"), Some("Body of mannerisms."));
    assert_eq!(profile.section("relationships"), Some("Body of relationships."));
    assert_eq!(profile.section("skills_and_talents"), Some("Body of skills."));
    assert_eq!(profile.section("fears_and_flaws"), Some("Body of flaws."));
    assert!(profile
        .section("motivations")
        .is_some_and(|m| m.starts_with("wants gold") && m.ends_with("Body of motivations.")));
    assert_eq!(profile.section("backstory"), Some("Body of backstory."));
    assert_eq!(profile.section("personality"), Some("Body of personality."));
    assert_eq!(profile.section("appearance"), Some("Body of appearance."));
    assert_eq!(profile.section("notable_quotes"), Some("Body of quotes."));

    // Iteration follows the catalog, not the text.
    let keys: Vec<&str> = profile.filled_sections().map(|(k, _)| k).collect();
    assert_eq!(keys.first(), Some(&"appearance"));
    assert_eq!(keys.last(), Some(&"notable_quotes"));
}

#[test]
fn test_alias_headers() {
    let text = "## Physical Description\nTall.\n\n## Background\nBorn poor.\n\n## Plot Hooks\nA debt.\n";
    let profile = parser().parse(text);

    assert_eq!(profile.section("appearance"), Some("Tall."));
    assert_eq!(profile.section("backstory"), Some("Born poor."));
    assert_eq!(profile.section("adventure_hooks"), Some("A debt."));
    assert_eq!(profile.title("adventure_hooks"), "Adventure Hooks");
}

// ============================================================================
// Degraded and raw fallbacks
// ============================================================================

#[test]
fn test_no_headers_at_all() {
    let text = "Just a paragraph about someone who likes bread.";
    let profile = parser().parse(text);

    assert_eq!(profile.filled_sections().count(), 0);
    assert_eq!(profile.preamble, text);
    assert!(profile.name.is_none());
    assert!(profile.degraded);
}

#[test]
fn test_empty_text() {
    let profile = parser().parse("");
    assert_eq!(profile.filled_count(), 0);
    assert!(profile.degraded);
    assert!(profile.preamble.is_empty());
}

#[test]
fn test_header_without_body_is_not_filled() {
    let profile = parser().parse("## Appearance\n## Personality\nKind.\n## Secrets\n");
    assert_eq!(profile.section("appearance"), None);
    assert_eq!(profile.section("personality"), Some("Kind."));
    assert_eq!(profile.section("secrets"), None);
    assert_eq!(profile.filled_sections().count(), 1);
}

#[test]
fn test_custom_catalog_with_bad_pattern_falls_back_to_raw() {
    let catalog = SectionCatalog::new(vec![
        SectionSpec::literal("appearance", "Appearance"),
        SectionSpec::new("broken", "Broken", "(unclosed"),
    ]);

    match parse_profile(FULL_PROFILE, &catalog) {
        ProfileParse::Raw { text, reason } => {
            assert_eq!(text, FULL_PROFILE);
            assert!(reason.contains("broken"), "reason was: {reason}");
        }
        ProfileParse::Parsed(_) => panic!("expected raw fallback"),
    }
}

#[test]
fn test_custom_catalog_only_sees_its_own_sections() {
    let catalog = SectionCatalog::new(vec![
        SectionSpec::literal("secrets", "Secrets"),
        SectionSpec::literal("hooks", "Adventure Hooks"),
    ]);
    let parsed = parse_profile(FULL_PROFILE, &catalog);
    let profile = parsed.parsed().expect("parsed");

    assert_eq!(profile.sections.len(), 2);
    // Unknown headers stay inside the preceding section's body.
    assert!(profile
        .section("hooks")
        .is_some_and(|h| h.starts_with("- A stolen hammer") && h.contains("## Notable Quotes")));
    assert!(profile
        .section("secrets")
        .is_some_and(|s| s.starts_with("Once forged")));
}

#[test]
fn test_parse_serializes_with_kind_tag() {
    let parsed = parse_profile("## Secrets\nNone.", &SectionCatalog::standard());
    let json = serde_json::to_value(&parsed).expect("serializes");
    assert_eq!(json["kind"], "parsed");
    assert_eq!(json["sections"]["secrets"], "None.");
}
