//! AI profile parsing
//!
//! The profile generator returns loosely structured markdown. This module
//! locates the expected sections and reports either a [`ParsedProfile`] or
//! a raw-text fallback, so callers always have something to render.

pub mod catalog;
pub mod sections;

pub use catalog::{SectionCatalog, SectionSpec};
pub use sections::{
    parse_profile, ParsedProfile, ProfileError, ProfileParse, ProfileParser, SummaryRow,
    DEGRADED_THRESHOLD,
};
