/// charforge - TTRPG character forge
///
/// Rolls random characters, encodes a personality DNA for each, asks an AI
/// service for a written profile and a portrait, and exports the result.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
