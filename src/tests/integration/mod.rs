//! Integration tests against a local mock HTTP server

mod gemini_client_tests;
