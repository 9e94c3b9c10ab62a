//! Section catalog: the ordered list of headers expected in an AI profile.

use serde::{Deserialize, Serialize};

/// One expected section.
///
/// `pattern` is a case-insensitive regex fragment matching the header text
/// (without markup), e.g. `fears?\s*(?:and|&)\s*flaws`. `aliases` are looser
/// fragments (single common words like `history`) that only count as a header
/// when written as a markdown heading or in bold on a line of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub key: String,
    pub title: String,
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl SectionSpec {
    pub fn new(key: impl Into<String>, title: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            pattern: pattern.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    /// A section whose only accepted header is its title, matched literally.
    pub fn literal(key: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        let pattern = regex::escape(&title);
        Self::new(key, title, pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCatalog {
    pub sections: Vec<SectionSpec>,
}

impl Default for SectionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl SectionCatalog {
    pub fn new(sections: Vec<SectionSpec>) -> Self {
        Self { sections }
    }

    /// The eleven sections the profile prompt asks for, in display order.
    pub fn standard() -> Self {
        Self::new(vec![
            SectionSpec::new("appearance", "Appearance", r"appearance|physical\s+description"),
            SectionSpec::new("personality", "Personality", r"personality(?:\s+traits)?"),
            SectionSpec::new("backstory", "Backstory", r"back\s*story")
                .with_aliases(&["background", "history"]),
            SectionSpec::new(
                "motivations",
                "Motivations",
                r"motivations?|goals\s*(?:and|&)\s*motivations",
            )
            .with_aliases(&["goals"]),
            SectionSpec::new(
                "fears_and_flaws",
                "Fears and Flaws",
                r"fears?\s*(?:and|&)\s*flaws|flaws(?:\s*(?:and|&)\s*weaknesses)?",
            )
            .with_aliases(&["weaknesses"]),
            SectionSpec::new(
                "relationships",
                "Relationships",
                r"relationships|allies(?:\s*(?:and|&)\s*enemies)?",
            ),
            SectionSpec::new(
                "skills_and_talents",
                "Skills and Talents",
                r"skills(?:\s*(?:and|&)\s*(?:talents|abilities))?",
            )
            .with_aliases(&["talents", "abilities"]),
            SectionSpec::new(
                "mannerisms",
                "Mannerisms",
                r"mannerisms|quirks(?:\s*(?:and|&)\s*mannerisms)?|roleplaying\s+notes",
            ),
            SectionSpec::new("secrets", "Secrets", r"secrets?"),
            SectionSpec::new(
                "adventure_hooks",
                "Adventure Hooks",
                r"adventure\s+hooks|plot\s+hooks",
            )
            .with_aliases(&["hooks"]),
            SectionSpec::new(
                "notable_quotes",
                "Notable Quotes",
                r"notable\s+quotes|signature\s+quotes",
            )
            .with_aliases(&["quotes"]),
        ])
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn title_of(&self, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.title.as_str())
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.title.as_str())
    }
}
