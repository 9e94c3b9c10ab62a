//! Property-based tests
//!
//! Invariants that should hold for all inputs, checked with proptest.
//!
//! - `dna_props`: every rolled DNA decodes back to itself; garbage never panics
//! - `stat_block_props`: stat blocks are deterministic and sane for any race/profession
//! - `profile_props`: the section extractor never panics and recovers shuffled headers

mod dna_props;
mod profile_props;
mod stat_block_props;
