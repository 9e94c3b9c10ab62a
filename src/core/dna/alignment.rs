//! Score bucketing and the alignment vocabularies.

use serde::Serialize;
use std::fmt;

/// Three-way split of a 1-9 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bucket {
    High,
    Mid,
    Low,
}

impl Bucket {
    /// `>= 7` high, `4..=6` mid, `<= 3` low.
    pub fn of(score: u8) -> Self {
        match score {
            7..=u8::MAX => Bucket::High,
            4..=6 => Bucket::Mid,
            _ => Bucket::Low,
        }
    }
}

/// Lawful-Neutral-Chaotic axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LawAxis {
    Lawful,
    Neutral,
    Chaotic,
}

/// Good-Neutral-Evil axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoralAxis {
    Good,
    Neutral,
    Evil,
}

/// Strength of a single unpaired trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl LawAxis {
    pub fn from_score(score: u8) -> Self {
        match Bucket::of(score) {
            Bucket::High => LawAxis::Lawful,
            Bucket::Mid => LawAxis::Neutral,
            Bucket::Low => LawAxis::Chaotic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LawAxis::Lawful => "Lawful",
            LawAxis::Neutral => "Neutral",
            LawAxis::Chaotic => "Chaotic",
        }
    }
}

impl MoralAxis {
    pub fn from_score(score: u8) -> Self {
        match Bucket::of(score) {
            Bucket::High => MoralAxis::Good,
            Bucket::Mid => MoralAxis::Neutral,
            Bucket::Low => MoralAxis::Evil,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoralAxis::Good => "Good",
            MoralAxis::Neutral => "Neutral",
            MoralAxis::Evil => "Evil",
        }
    }
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match Bucket::of(score) {
            Bucket::High => Strength::Strong,
            Bucket::Mid => Strength::Moderate,
            Bucket::Low => Strength::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Moderate => "Moderate",
            Strength::Weak => "Weak",
        }
    }
}

impl fmt::Display for LawAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for MoralAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Combined alignment, e.g. "Lawful Good". Neutral/Neutral reads "True Neutral".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub law: LawAxis,
    pub moral: MoralAxis,
}

impl Alignment {
    pub fn from_averages(paired_average: u8, unpaired_average: u8) -> Self {
        Self {
            law: LawAxis::from_score(paired_average),
            moral: MoralAxis::from_score(unpaired_average),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.law, self.moral) {
            (LawAxis::Neutral, MoralAxis::Neutral) => f.write_str("True Neutral"),
            (law, moral) => write!(f, "{} {}", law, moral),
        }
    }
}
