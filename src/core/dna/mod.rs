//! Personality DNA
//!
//! Compact encoding of a character's personality: a side, score and
//! intensity for each opposing trait pair, a strength score for each
//! virtue, and the two rounded averages that place the character on the
//! Lawful/Chaotic and Good/Evil axes.
//!
//! ```rust,ignore
//! let codec = DnaCodec::standard();
//! let dna = codec.encode(&mut rand::thread_rng());
//! let decoded = codec.decode(&dna.to_string()).expect("own output decodes");
//! println!("{}", decoded.alignment);
//! ```

pub mod alignment;
pub mod codec;
pub mod tables;

pub use alignment::{Alignment, Bucket, LawAxis, MoralAxis, Strength};
pub use codec::{
    rounded_mean, DecodedDna, DecodedPair, DecodedVirtue, Dna, DnaCodec, DnaError, PairedGene,
    VirtueGene,
};
pub use tables::{TraitPair, TraitSide, TraitTable, Virtue, STANDARD_TABLE};
