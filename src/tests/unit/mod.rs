//! Unit tests by module

mod export_tests;
mod forge_tests;
mod profile_tests;
