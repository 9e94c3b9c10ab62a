//! Property-based tests for the profile section extractor
//!
//! Tests invariants:
//! - Parsing arbitrary text never panics
//! - Every standard header is found regardless of order
//! - Bodies are trimmed

use proptest::prelude::*;

use crate::core::profile::{ProfileParser, SectionCatalog};

fn parser() -> ProfileParser {
    ProfileParser::new(&SectionCatalog::standard()).expect("standard catalog compiles")
}

/// Header markup styles the extractor accepts.
fn arb_header_style() -> impl Strategy<Value = fn(&str) -> String> {
    prop_oneof![
        Just((|t: &str| format!("## {t}")) as fn(&str) -> String),
        Just((|t: &str| format!("**{t}**")) as fn(&str) -> String),
        Just((|t: &str| format!("{t}:")) as fn(&str) -> String),
        Just((|t: &str| format!("### {}", t.to_uppercase())) as fn(&str) -> String),
        Just((|t: &str| format!("1. {t}")) as fn(&str) -> String),
    ]
}

proptest! {
    #[test]
    fn prop_parse_never_panics(text in "(?s).{0,400}") {
        let _ = parser().parse(&text);
    }

    #[test]
    fn prop_shuffled_headers_are_all_found(
        order in Just((0..11usize).collect::<Vec<_>>()).prop_shuffle(),
        style in arb_header_style(),
    ) {
        let catalog = SectionCatalog::standard();
        let mut text = String::new();
        for &i in &order {
            let spec = &catalog.sections[i];
            text.push_str(&style(&spec.title));
            text.push_str(&format!("\n  content for {}  \n\n", spec.key));
        }

        let profile = parser().parse(&text);
        prop_assert_eq!(profile.filled_sections().count(), 11);
        for spec in &catalog.sections {
            let expected = format!("content for {}", spec.key);
            prop_assert_eq!(profile.section(&spec.key), Some(expected.as_str()));
        }
        prop_assert!(!profile.degraded);
    }
}
