//! Canonical personality trait tables.
//!
//! Both the encoder and the decoder index into [`STANDARD_TABLE`]; entry
//! positions are part of the DNA format, so entries must never be reordered.

use serde::Serialize;

/// One opposing-concept axis. The two letters of a pair are always distinct,
/// but letters do repeat across positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraitPair {
    pub left: TraitSide,
    pub right: TraitSide,
}

/// One side of a [`TraitPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraitSide {
    pub letter: char,
    pub name: &'static str,
}

/// A single-concept trait scored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Virtue {
    pub letter: char,
    pub name: &'static str,
}

impl TraitPair {
    pub const fn new(
        left_letter: char,
        left_name: &'static str,
        right_letter: char,
        right_name: &'static str,
    ) -> Self {
        Self {
            left: TraitSide { letter: left_letter, name: left_name },
            right: TraitSide { letter: right_letter, name: right_name },
        }
    }

    /// Resolve which side an encoded letter refers to.
    pub fn side_for(&self, letter: char) -> Option<&TraitSide> {
        if letter == self.left.letter {
            Some(&self.left)
        } else if letter == self.right.letter {
            Some(&self.right)
        } else {
            None
        }
    }
}

impl Virtue {
    pub const fn new(letter: char, name: &'static str) -> Self {
        Self { letter, name }
    }
}

/// Ordered trait table consumed by both sides of the codec.
#[derive(Debug, Clone, Copy)]
pub struct TraitTable<'a> {
    pub pairs: &'a [TraitPair],
    pub virtues: &'a [Virtue],
}

impl<'a> TraitTable<'a> {
    pub const fn new(pairs: &'a [TraitPair], virtues: &'a [Virtue]) -> Self {
        Self { pairs, virtues }
    }
}

pub const PAIRED_TRAITS: [TraitPair; 20] = [
    TraitPair::new('B', "Brave", 'C', "Cowardly"),
    TraitPair::new('O', "Optimistic", 'P', "Pessimistic"),
    TraitPair::new('B', "Benevolent", 'M', "Malicious"),
    TraitPair::new('C', "Calm", 'I', "Impulsive"),
    TraitPair::new('H', "Humble", 'A', "Arrogant"),
    TraitPair::new('G', "Generous", 'S', "Selfish"),
    TraitPair::new('L', "Loyal", 'T', "Treacherous"),
    TraitPair::new('P', "Patient", 'R', "Restless"),
    TraitPair::new('D', "Disciplined", 'W', "Wild"),
    TraitPair::new('F', "Forgiving", 'V', "Vengeful"),
    TraitPair::new('C', "Curious", 'A', "Apathetic"),
    TraitPair::new('T', "Trusting", 'S', "Suspicious"),
    TraitPair::new('K', "Kind", 'R', "Ruthless"),
    TraitPair::new('E', "Extroverted", 'I', "Introverted"),
    TraitPair::new('S', "Sincere", 'D', "Deceitful"),
    TraitPair::new('D', "Diligent", 'L', "Lazy"),
    TraitPair::new('M', "Merciful", 'H', "Harsh"),
    TraitPair::new('F', "Flexible", 'S', "Stubborn"),
    TraitPair::new('T', "Tolerant", 'B', "Bigoted"),
    TraitPair::new('R', "Responsible", 'N', "Negligent"),
];

pub const VIRTUES: [Virtue; 20] = [
    Virtue::new('H', "Honest"),
    Virtue::new('C', "Compassionate"),
    Virtue::new('J', "Just"),
    Virtue::new('W', "Wise"),
    Virtue::new('P', "Pious"),
    Virtue::new('T', "Temperate"),
    Virtue::new('F', "Faithful"),
    Virtue::new('G', "Grateful"),
    Virtue::new('R', "Resilient"),
    Virtue::new('C', "Courteous"),
    Virtue::new('D', "Devoted"),
    Virtue::new('I', "Industrious"),
    Virtue::new('M', "Modest"),
    Virtue::new('V', "Valorous"),
    Virtue::new('E', "Empathetic"),
    Virtue::new('H', "Hopeful"),
    Virtue::new('S', "Self-reliant"),
    Virtue::new('A', "Attentive"),
    Virtue::new('N', "Noble"),
    Virtue::new('P', "Prudent"),
];

/// The table every production encode/decode uses.
pub const STANDARD_TABLE: TraitTable<'static> = TraitTable::new(&PAIRED_TRAITS, &VIRTUES);
