//! Profile Section Extractor
//!
//! Splits an AI-written character profile into named sections by locating
//! loosely formatted headers (`## Appearance`, `**Secrets:**`, `APPEARANCE`,
//! ...) and slicing the text between consecutive headers. The text before
//! the first header (title, role, alignment, summary table) is mined for a
//! few labelled fields.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::catalog::{SectionCatalog, SectionSpec};

/// Fewer filled slots than this marks the parse as degraded.
pub const DEGRADED_THRESHOLD: usize = 3;

static H1_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*#{1,2}[ \t]+(.+?)[ \t#]*$").expect("Invalid title regex")
});

static TABLE_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*\|(.*)\|[ \t]*$").expect("Invalid table row regex"));

static TABLE_SEPARATOR_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:?-{2,}:?$").expect("Invalid table separator regex"));

static NAME_FIELD: Lazy<Regex> = Lazy::new(|| field_regex("name"));
static ROLE_FIELD: Lazy<Regex> = Lazy::new(|| field_regex("role|occupation"));
static ALIGNMENT_FIELD: Lazy<Regex> = Lazy::new(|| field_regex("alignment"));

fn field_regex(label: &str) -> Regex {
    let pattern = String::from(r"(?mi)(?:^|\|)[ \t]*(?:[-*][ \t]+)?(?:\*\*|__)?[ \t]*(?:")
        + label
        + r")[ \t]*(?:\*\*|__)?[ \t]*:[ \t]*(?:\*\*|__)?[ \t]*([^|\n]*)";
    Regex::new(&pattern).expect("Invalid field regex")
}

const LEAD: &str = r"^[ \t]*(?:#{1,6}[ \t]*)?(?:\d+[.)][ \t]*)?(?:\*{1,2}|__)?[ \t]*";
const MARKED_LEAD: &str = r"^[ \t]*(?:#{1,6}[ \t]*(?:\*{1,2}|__)?|\*{1,2}|__)[ \t]*";
const CLOSE: &str = r"[ \t]*(?:\*{1,2}|__)?[ \t]*";
const LINE_END: &str = r"[:.]?[ \t]*(?:\*{1,2}|__)?[ \t]*$";
const INLINE_COLON: &str = r":[ \t]*(?:\*{1,2}|__)?[ \t]*";

/// Header regex for one catalog entry.
///
/// The pattern matches with optional heading hashes, numbering, bold/italic
/// markers and a trailing `:`/`.` when the header fills its line. Text after
/// a colon on the same line (`**Secrets:** She is...`) is only accepted for
/// the title itself. Aliases need heading or bold markup and their own line.
fn header_regex(spec: &SectionSpec) -> Result<Regex, regex::Error> {
    let title = regex::escape(spec.title.trim()).replace(' ', r"[ \t]+");
    let mut full = format!(
        "(?mi){LEAD}(?:(?:{pattern}){CLOSE}{LINE_END}|(?:{title}){CLOSE}{INLINE_COLON})",
        pattern = spec.pattern,
    );
    if !spec.aliases.is_empty() {
        full.push_str(&format!(
            "|{MARKED_LEAD}(?:{aliases}){CLOSE}{LINE_END}",
            aliases = spec.aliases.join("|"),
        ));
    }
    Regex::new(&full)
}

// ============================================================================
// Error / Result Types
// ============================================================================

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("invalid header pattern for section '{key}': {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error("section key '{0}' appears twice in the catalog")]
    DuplicateKey(String),
}

/// One `| label | value |` row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedProfile {
    pub name: Option<String>,
    pub role: Option<String>,
    pub alignment: Option<String>,
    pub summary: Vec<SummaryRow>,
    /// Text before the first located header, trimmed.
    pub preamble: String,
    /// Every catalog key in catalog order; missing sections are empty.
    pub sections: IndexMap<String, String>,
    /// Display title per key.
    pub titles: IndexMap<String, String>,
    pub degraded: bool,
}

impl ParsedProfile {
    /// Body of a section, `None` when absent or empty.
    pub fn section(&self, key: &str) -> Option<&str> {
        self.sections
            .get(key)
            .map(String::as_str)
            .filter(|body| !body.is_empty())
    }

    pub fn title<'a>(&'a self, key: &'a str) -> &'a str {
        self.titles.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Sections that carry content, in catalog order.
    pub fn filled_sections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections
            .iter()
            .filter(|(_, body)| !body.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of filled slots among name, role, alignment, summary and sections.
    pub fn filled_count(&self) -> usize {
        let fields = [
            self.name.is_some(),
            self.role.is_some(),
            self.alignment.is_some(),
            !self.summary.is_empty(),
        ];
        fields.iter().filter(|f| **f).count() + self.filled_sections().count()
    }
}

/// Outcome of parsing one profile. Rendering branches on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileParse {
    Parsed(ParsedProfile),
    /// Hard failure: show `text` verbatim in the fallback view.
    Raw { text: String, reason: String },
}

impl ProfileParse {
    pub fn parsed(&self) -> Option<&ParsedProfile> {
        match self {
            ProfileParse::Parsed(p) => Some(p),
            ProfileParse::Raw { .. } => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, ProfileParse::Raw { .. })
    }
}

// ============================================================================
// Parser
// ============================================================================

struct CompiledSection {
    key: String,
    title: String,
    header: Regex,
}

/// Header matchers compiled from one catalog.
pub struct ProfileParser {
    sections: Vec<CompiledSection>,
}

impl ProfileParser {
    pub fn new(catalog: &SectionCatalog) -> Result<Self, ProfileError> {
        let mut sections: Vec<CompiledSection> = Vec::with_capacity(catalog.len());
        for spec in &catalog.sections {
            if sections.iter().any(|s| s.key == spec.key) {
                return Err(ProfileError::DuplicateKey(spec.key.clone()));
            }
            let header = header_regex(spec).map_err(|source| ProfileError::InvalidPattern {
                key: spec.key.clone(),
                source,
            })?;
            sections.push(CompiledSection {
                key: spec.key.clone(),
                title: spec.title.clone(),
                header,
            });
        }
        Ok(Self { sections })
    }

    pub fn parse(&self, text: &str) -> ParsedProfile {
        let text = text.replace("\r\n", "\n");

        // (section index, header start, header end)
        let mut found: Vec<(usize, usize, usize)> = self
            .sections
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.header.find(&text).map(|m| (i, m.start(), m.end())))
            .collect();
        found.sort_by_key(|&(i, start, _)| (start, i));

        let mut sections: IndexMap<String, String> = self
            .sections
            .iter()
            .map(|s| (s.key.clone(), String::new()))
            .collect();

        for (n, &(i, _, body_start)) in found.iter().enumerate() {
            let body_end = found
                .get(n + 1)
                .map(|&(_, next_start, _)| next_start)
                .unwrap_or(text.len());
            // Two headers matching on one line leave an empty body.
            let body = if body_start <= body_end {
                text[body_start..body_end].trim()
            } else {
                ""
            };
            sections.insert(self.sections[i].key.clone(), body.to_string());
        }

        let preamble_end = found.first().map(|&(_, start, _)| start).unwrap_or(text.len());
        let preamble = &text[..preamble_end];

        let name = capture_field(&NAME_FIELD, preamble).or_else(|| {
            H1_TITLE
                .captures(preamble)
                .map(|c| clean_value(&c[1]))
                .filter(|v| !v.is_empty())
        });

        let mut profile = ParsedProfile {
            name,
            role: capture_field(&ROLE_FIELD, preamble),
            alignment: capture_field(&ALIGNMENT_FIELD, preamble),
            summary: parse_summary_table(preamble),
            preamble: preamble.trim().to_string(),
            sections,
            titles: self
                .sections
                .iter()
                .map(|s| (s.key.clone(), s.title.clone()))
                .collect(),
            degraded: false,
        };

        let filled = profile.filled_count();
        profile.degraded = filled < DEGRADED_THRESHOLD;
        if profile.degraded {
            warn!(filled, headers_found = found.len(), "Profile text looks malformed; rendering partial result");
        } else {
            debug!(filled, headers_found = found.len(), "Parsed profile");
        }

        profile
    }
}

/// Parse with `catalog`, falling back to the raw text on hard failure.
pub fn parse_profile(text: &str, catalog: &SectionCatalog) -> ProfileParse {
    match ProfileParser::new(catalog) {
        Ok(parser) => ProfileParse::Parsed(parser.parse(text)),
        Err(e) => {
            warn!(error = %e, "Profile parse failed; falling back to raw text");
            ProfileParse::Raw {
                text: text.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

fn capture_field(re: &Regex, block: &str) -> Option<String> {
    re.captures(block)
        .map(|c| clean_value(&c[1]))
        .filter(|v| !v.is_empty())
}

/// Trim whitespace and stray emphasis markers.
fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '*' || c == '_')
        .trim()
        .to_string()
}

/// Collect two-column rows; a row directly followed by a separator row is a
/// header and is skipped along with the separator.
fn parse_summary_table(block: &str) -> Vec<SummaryRow> {
    let rows: Vec<Vec<String>> = block
        .lines()
        .filter_map(|line| TABLE_ROW.captures(line))
        .map(|c| c[1].split('|').map(clean_value).collect())
        .collect();

    let is_separator =
        |cells: &[String]| cells.iter().all(|c| TABLE_SEPARATOR_CELL.is_match(c.trim()));

    let mut out = Vec::new();
    for (i, cells) in rows.iter().enumerate() {
        if is_separator(cells) {
            continue;
        }
        if rows.get(i + 1).is_some_and(|next| is_separator(next)) {
            continue;
        }
        if let [label, value] = cells.as_slice() {
            if !label.is_empty() {
                out.push(SummaryRow {
                    label: label.clone(),
                    value: value.clone(),
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ProfileParser {
        ProfileParser::new(&SectionCatalog::standard()).unwrap()
    }

    fn appearance_header() -> Regex {
        header_regex(&SectionSpec::new("appearance", "Appearance", "appearance")).unwrap()
    }

    #[test]
    fn test_header_variants_match() {
        let re = appearance_header();
        for line in [
            "## Appearance",
            "### **Appearance**",
            "**Appearance:**",
            "**Appearance**:",
            "APPEARANCE",
            "Appearance:",
            "  # Appearance.",
            "1. Appearance",
            "__Appearance__",
        ] {
            assert!(re.is_match(line), "should match: {line}");
        }
    }

    #[test]
    fn test_header_rejects_prose() {
        let re = appearance_header();
        assert!(!re.is_match("Appearance is everything to her."));
        assert!(!re.is_match("Her appearance:"));
    }

    #[test]
    fn test_inline_colon_header_body() {
        let profile = parser().parse("**Secrets:** She is the lost heir.\n\n## Notable Quotes\n\"Aye.\"");
        assert_eq!(profile.section("secrets"), Some("She is the lost heir."));
        assert_eq!(profile.section("notable_quotes"), Some("\"Aye.\""));
    }

    #[test]
    fn test_inline_colon_needs_the_title() {
        let spec = SectionSpec::new("fears", "Fears and Flaws", r"fears?\s*(?:and|&)\s*flaws|flaws");
        let re = header_regex(&spec).unwrap();
        assert!(re.is_match("**Fears and Flaws:** heights"));
        assert!(re.is_match("Flaws:"));
        assert!(!re.is_match("Flaws: too trusting"));
    }

    #[test]
    fn test_alias_needs_markup_and_own_line() {
        let spec = SectionSpec::new("backstory", "Backstory", r"back\s*story").with_aliases(&["history"]);
        let re = header_regex(&spec).unwrap();
        assert!(re.is_match("## History"));
        assert!(re.is_match("**History**"));
        assert!(re.is_match("### **History:**"));
        assert!(!re.is_match("History"));
        assert!(!re.is_match("History:"));
        assert!(!re.is_match("**History:** born in a ditch"));
    }

    #[test]
    fn test_bold_label_in_body_does_not_start_a_section() {
        let text = "## Personality\nKind but proud.\n**Goals:** to own the finest forge.\n\n\
                    ## Backstory\nBorn poor.\n\n## Motivations\nRevenge on the guild.\n";
        let profile = parser().parse(text);
        assert_eq!(
            profile.section("personality"),
            Some("Kind but proud.\n**Goals:** to own the finest forge.")
        );
        assert_eq!(profile.section("backstory"), Some("Born poor."));
        assert_eq!(profile.section("motivations"), Some("Revenge on the guild."));
    }

    #[test]
    fn test_preamble_fields() {
        let text = "# Mira Thornwood\n\
                    **Role:** Herbalist | **Alignment:** Neutral Good\n\n\
                    | Trait | Value |\n\
                    |-------|-------|\n\
                    | Age | 34 |\n\
                    | Home | Fenwick |\n\n\
                    ## Appearance\nTall.";
        let profile = parser().parse(text);

        assert_eq!(profile.name.as_deref(), Some("Mira Thornwood"));
        assert_eq!(profile.role.as_deref(), Some("Herbalist"));
        assert_eq!(profile.alignment.as_deref(), Some("Neutral Good"));
        assert_eq!(
            profile.summary,
            vec![
                SummaryRow { label: "Age".into(), value: "34".into() },
                SummaryRow { label: "Home".into(), value: "Fenwick".into() },
            ]
        );
        assert_eq!(profile.section("appearance"), Some("Tall."));
        assert_eq!(profile.title("fears_and_flaws"), "Fears and Flaws");
        assert!(!profile.degraded);
    }

    #[test]
    fn test_name_field_beats_heading() {
        let profile = parser().parse("# Character Profile\nName: Oswin Vale\n\n## Backstory\nBorn poor.");
        assert_eq!(profile.name.as_deref(), Some("Oswin Vale"));
    }

    #[test]
    fn test_crlf_normalized() {
        let profile = parser().parse("## Appearance\r\nScarred.\r\n## Secrets\r\nNone.\r\n");
        assert_eq!(profile.section("appearance"), Some("Scarred."));
        assert_eq!(profile.section("secrets"), Some("None."));
    }

    #[test]
    fn test_only_first_occurrence_counts() {
        let profile = parser().parse("## Secrets\nOne.\n## Quotes\nHi.\n## Secrets\nTwo.");
        assert_eq!(profile.section("secrets"), Some("One."));
        assert_eq!(profile.section("notable_quotes"), Some("Hi.\n## Secrets\nTwo."));
    }

    #[test]
    fn test_degraded_but_returned() {
        let profile = parser().parse("## Appearance\nShort and stout.");
        assert!(profile.degraded);
        assert_eq!(profile.section("appearance"), Some("Short and stout."));
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_raw() {
        let catalog = SectionCatalog::new(vec![SectionSpec::new("broken", "Broken", "(unclosed")]);
        let result = parse_profile("## Broken\ntext", &catalog);
        match result {
            ProfileParse::Raw { text, reason } => {
                assert_eq!(text, "## Broken\ntext");
                assert!(reason.contains("broken"));
            }
            ProfileParse::Parsed(_) => panic!("expected raw fallback"),
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let catalog = SectionCatalog::new(vec![
            SectionSpec::literal("a", "Alpha"),
            SectionSpec::literal("a", "Again"),
        ]);
        assert!(matches!(
            ProfileParser::new(&catalog),
            Err(ProfileError::DuplicateKey(k)) if k == "a"
        ));
    }

    #[test]
    fn test_summary_table_without_header_row() {
        let rows = parse_summary_table("| Age | 40 |\n| Build | Wiry |");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].value, "Wiry");
    }

    #[test]
    fn test_summary_ignores_wide_tables() {
        let rows = parse_summary_table("| a | b | c |\n|---|---|---|\n| 1 | 2 | 3 |");
        assert!(rows.is_empty());
    }
}
