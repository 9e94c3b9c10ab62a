//! Personality DNA encode/decode.
//!
//! Wire format: `(A/B) p1,p2,...,pN - u1,u2,...,uM` where
//! - `A` is the rounded mean of the paired scores, `B` of the unpaired scores
//! - `pN` is `<score 1-9><letter><intensity 1-5>` for table pair N
//! - `uN` is `<letter><score 1-9>` for table virtue N
//!
//! Letters repeat across table positions, so the position of an entry, not
//! its letter, decides which trait it names.

use std::fmt;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::alignment::{Alignment, LawAxis, Strength};
use super::tables::{TraitTable, STANDARD_TABLE};

pub const SCORE_MIN: u8 = 1;
pub const SCORE_MAX: u8 = 9;
pub const INTENSITY_MIN: u8 = 1;
pub const INTENSITY_MAX: u8 = 5;

static DNA_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\(\s*(\d+)\s*/\s*(\d+)\s*\)\s*(\S.*?)\s+-\s+(\S.*?)\s*$")
        .expect("Invalid DNA shape regex")
});

static PAIRED_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([1-9])([A-Z])([1-5])$").expect("Invalid paired entry regex"));

static VIRTUE_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z])([1-9])$").expect("Invalid virtue entry regex"));

// ============================================================================
// Error Types
// ============================================================================

/// Why a DNA string could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnaError {
    #[error("DNA string does not match the `(A/B) paired - unpaired` shape")]
    Malformed,

    #[error("{which} average {value} is outside 1-9")]
    AverageOutOfRange { which: &'static str, value: u32 },

    #[error("expected {expected} {group} entries, found {found}")]
    EntryCount {
        group: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("malformed {group} entry #{position}: '{entry}'")]
    MalformedEntry {
        group: &'static str,
        position: usize,
        entry: String,
    },

    #[error("letter '{letter}' at pair #{position} matches neither '{left}' nor '{right}'")]
    UnknownPairLetter {
        position: usize,
        letter: char,
        left: char,
        right: char,
    },

    #[error("letter '{letter}' at virtue #{position} should be '{expected}'")]
    VirtueLetterMismatch {
        position: usize,
        letter: char,
        expected: char,
    },
}

impl DnaError {
    /// The offending entry text, if the error is about a single entry.
    pub fn entry(&self) -> Option<&str> {
        match self {
            DnaError::MalformedEntry { entry, .. } => Some(entry),
            _ => None,
        }
    }
}

// ============================================================================
// Encoded form
// ============================================================================

/// One paired-trait entry as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairedGene {
    pub score: u8,
    pub letter: char,
    pub intensity: u8,
}

/// One unpaired-trait entry as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VirtueGene {
    pub letter: char,
    pub score: u8,
}

/// A DNA value in table order. `Display` produces the wire string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dna {
    pub paired_average: u8,
    pub unpaired_average: u8,
    pub paired: Vec<PairedGene>,
    pub unpaired: Vec<VirtueGene>,
}

impl fmt::Display for Dna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paired = self
            .paired
            .iter()
            .map(|g| format!("{}{}{}", g.score, g.letter, g.intensity))
            .collect::<Vec<_>>()
            .join(",");
        let unpaired = self
            .unpaired
            .iter()
            .map(|g| format!("{}{}", g.letter, g.score))
            .collect::<Vec<_>>()
            .join(",");
        write!(
            f,
            "({}/{}) {} - {}",
            self.paired_average, self.unpaired_average, paired, unpaired
        )
    }
}

/// `round(mean)`, halves rounding up. Empty input averages to 0.
pub fn rounded_mean(scores: impl IntoIterator<Item = u8>) -> u8 {
    let (sum, count) = scores
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), s| (sum + u32::from(s), count + 1));
    if count == 0 {
        return 0;
    }
    (f64::from(sum) / f64::from(count)).round() as u8
}

// ============================================================================
// Decoded form
// ============================================================================

/// A paired entry resolved against its table position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedPair {
    /// 1-based table position.
    pub position: usize,
    pub letter: char,
    pub name: &'static str,
    pub opposite: &'static str,
    pub score: u8,
    pub intensity: u8,
    pub law: LawAxis,
}

/// An unpaired entry resolved against its table position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedVirtue {
    /// 1-based table position.
    pub position: usize,
    pub letter: char,
    pub name: &'static str,
    pub score: u8,
    pub strength: Strength,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedDna {
    pub paired_average: u8,
    pub unpaired_average: u8,
    pub alignment: Alignment,
    pub pairs: Vec<DecodedPair>,
    pub virtues: Vec<DecodedVirtue>,
}

impl DecodedDna {
    /// Re-encode; the inverse of [`DnaCodec::try_decode`].
    pub fn to_dna(&self) -> Dna {
        Dna {
            paired_average: self.paired_average,
            unpaired_average: self.unpaired_average,
            paired: self
                .pairs
                .iter()
                .map(|p| PairedGene {
                    score: p.score,
                    letter: p.letter,
                    intensity: p.intensity,
                })
                .collect(),
            unpaired: self
                .virtues
                .iter()
                .map(|v| VirtueGene {
                    letter: v.letter,
                    score: v.score,
                })
                .collect(),
        }
    }

    /// Pairs ordered by `score * intensity`, strongest first. Ties keep table order.
    pub fn dominant_traits(&self, n: usize) -> Vec<&DecodedPair> {
        let mut ranked: Vec<&DecodedPair> = self.pairs.iter().collect();
        ranked.sort_by_key(|p| std::cmp::Reverse(u16::from(p.score) * u16::from(p.intensity)));
        ranked.truncate(n);
        ranked
    }

    /// Human-readable summary, used in prompts and the overview tab.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "Alignment: {} (order {}/9, morality {}/9)\n",
            self.alignment, self.paired_average, self.unpaired_average
        );

        out.push_str("Traits:\n");
        for pair in &self.pairs {
            out.push_str(&format!(
                "- {} over {} (score {}, intensity {}/5, {})\n",
                pair.name, pair.opposite, pair.score, pair.intensity, pair.law
            ));
        }

        out.push_str("Virtues:\n");
        for virtue in &self.virtues {
            out.push_str(&format!(
                "- {}: {} ({})\n",
                virtue.name, virtue.strength, virtue.score
            ));
        }

        out
    }
}

// ============================================================================
// Codec
// ============================================================================

/// Encoder/decoder bound to one trait table.
#[derive(Debug, Clone, Copy)]
pub struct DnaCodec<'a> {
    table: TraitTable<'a>,
}

impl Default for DnaCodec<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl DnaCodec<'static> {
    pub fn standard() -> Self {
        Self::new(STANDARD_TABLE)
    }
}

impl<'a> DnaCodec<'a> {
    pub fn new(table: TraitTable<'a>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TraitTable<'a> {
        &self.table
    }

    /// Roll a fresh DNA: a random side, score and intensity per pair, a
    /// random score per virtue.
    pub fn encode(&self, rng: &mut impl Rng) -> Dna {
        let paired: Vec<PairedGene> = self
            .table
            .pairs
            .iter()
            .map(|pair| {
                let side = if rng.gen_bool(0.5) { &pair.left } else { &pair.right };
                PairedGene {
                    score: rng.gen_range(SCORE_MIN..=SCORE_MAX),
                    letter: side.letter,
                    intensity: rng.gen_range(INTENSITY_MIN..=INTENSITY_MAX),
                }
            })
            .collect();

        let unpaired: Vec<VirtueGene> = self
            .table
            .virtues
            .iter()
            .map(|virtue| VirtueGene {
                letter: virtue.letter,
                score: rng.gen_range(SCORE_MIN..=SCORE_MAX),
            })
            .collect();

        Dna {
            paired_average: rounded_mean(paired.iter().map(|g| g.score)),
            unpaired_average: rounded_mean(unpaired.iter().map(|g| g.score)),
            paired,
            unpaired,
        }
    }

    /// Decode, discarding the failure reason.
    pub fn decode(&self, input: &str) -> Option<DecodedDna> {
        match self.try_decode(input) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::debug!("DNA decode failed: {e}");
                None
            }
        }
    }

    /// Decode all-or-nothing, reporting the first problem found.
    pub fn try_decode(&self, input: &str) -> Result<DecodedDna, DnaError> {
        let caps = DNA_SHAPE.captures(input).ok_or(DnaError::Malformed)?;

        let paired_average = parse_average(&caps[1], "paired")?;
        let unpaired_average = parse_average(&caps[2], "unpaired")?;

        let paired_entries = split_entries(&caps[3]);
        let virtue_entries = split_entries(&caps[4]);

        check_count("paired", self.table.pairs.len(), paired_entries.len())?;
        check_count("unpaired", self.table.virtues.len(), virtue_entries.len())?;

        let pairs = paired_entries
            .iter()
            .zip(self.table.pairs)
            .enumerate()
            .map(|(i, (entry, pair))| -> Result<DecodedPair, DnaError> {
                let position = i + 1;
                let caps = PAIRED_ENTRY.captures(entry).ok_or_else(|| DnaError::MalformedEntry {
                    group: "paired",
                    position,
                    entry: entry.to_string(),
                })?;
                let score = digit(&caps[1]);
                let letter = first_char(&caps[2]);
                let intensity = digit(&caps[3]);

                let side = pair.side_for(letter).ok_or(DnaError::UnknownPairLetter {
                    position,
                    letter,
                    left: pair.left.letter,
                    right: pair.right.letter,
                })?;
                let opposite = if side.letter == pair.left.letter {
                    pair.right.name
                } else {
                    pair.left.name
                };

                Ok(DecodedPair {
                    position,
                    letter,
                    name: side.name,
                    opposite,
                    score,
                    intensity,
                    law: LawAxis::from_score(score),
                })
            })
            .collect::<Result<Vec<_>, DnaError>>()?;

        let virtues = virtue_entries
            .iter()
            .zip(self.table.virtues)
            .enumerate()
            .map(|(i, (entry, virtue))| -> Result<DecodedVirtue, DnaError> {
                let position = i + 1;
                let caps = VIRTUE_ENTRY.captures(entry).ok_or_else(|| DnaError::MalformedEntry {
                    group: "unpaired",
                    position,
                    entry: entry.to_string(),
                })?;
                let letter = first_char(&caps[1]);
                let score = digit(&caps[2]);

                if letter != virtue.letter {
                    return Err(DnaError::VirtueLetterMismatch {
                        position,
                        letter,
                        expected: virtue.letter,
                    });
                }

                Ok(DecodedVirtue {
                    position,
                    letter,
                    name: virtue.name,
                    score,
                    strength: Strength::from_score(score),
                })
            })
            .collect::<Result<Vec<_>, DnaError>>()?;

        Ok(DecodedDna {
            paired_average,
            unpaired_average,
            alignment: Alignment::from_averages(paired_average, unpaired_average),
            pairs,
            virtues,
        })
    }
}

fn parse_average(raw: &str, which: &'static str) -> Result<u8, DnaError> {
    let value: u32 = raw.parse().map_err(|_| DnaError::Malformed)?;
    if !(u32::from(SCORE_MIN)..=u32::from(SCORE_MAX)).contains(&value) {
        return Err(DnaError::AverageOutOfRange { which, value });
    }
    Ok(value as u8)
}

fn split_entries(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).collect()
}

fn check_count(group: &'static str, expected: usize, found: usize) -> Result<(), DnaError> {
    if expected != found {
        return Err(DnaError::EntryCount { group, expected, found });
    }
    Ok(())
}

// Only called on regex captures of a single `[0-9]` or `[A-Z]`.
fn digit(s: &str) -> u8 {
    s.as_bytes()[0] - b'0'
}

fn first_char(s: &str) -> char {
    s.chars().next().unwrap_or_default()
}
