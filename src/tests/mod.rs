//! Crate-internal test suites
//!
//! - `unit`: focused tests of one module at a time
//! - `property`: proptest invariants over random inputs
//! - `integration`: the Gemini client against a wiremock server
//! - `mocks`: in-memory AI collaborators and shared fixtures

mod integration;
mod mocks;
mod property;
mod unit;
