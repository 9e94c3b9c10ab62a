//! Gemini Client Integration Tests
//!
//! Runs the real HTTP client against wiremock and checks request shape,
//! response parsing and error mapping for both text and image calls.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::ai::{
    AiError, CharacterContext, GeminiClient, PortraitGenerator, PortraitRequest,
    ProfileGenerator, ProfileRequest,
};

const TEXT_PATH: &str = "/models/gemini-2.0-flash:generateContent";
const IMAGE_PATH: &str = "/models/gemini-2.0-flash-preview-image-generation:generateContent";

fn context() -> CharacterContext {
    CharacterContext {
        name: "Mira Thornwood".to_string(),
        race: "Elf".to_string(),
        gender: "female".to_string(),
        profession: "Herbalist".to_string(),
        physical: "tall, slender, silver hair".to_string(),
        description: "Mira Thornwood is a female elf herbalist.".to_string(),
    }
}

fn profile_request() -> ProfileRequest {
    ProfileRequest {
        character: context(),
        dna: "(5/5) 5A3 - G5".to_string(),
        dna_summary: "Alignment: True Neutral".to_string(),
        section_titles: vec!["Appearance".to_string(), "Secrets".to_string()],
    }
}

fn portrait_request() -> PortraitRequest {
    PortraitRequest {
        character: context(),
        style: "ink sketch".to_string(),
    }
}

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new("AIzaTestKey")
        .expect("client builds")
        .with_base_url(&server.uri())
}

// =============================================================================
// Text
// =============================================================================

#[tokio::test]
async fn test_profile_request_and_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(header("x-goog-api-key", "AIzaTestKey"))
        .and(body_partial_json(json!({ "contents": [{ "role": "user" }] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "# Mira Thornwood\n" },
                    { "text": "## Appearance\nTall." }
                ]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .generate_profile(&profile_request())
        .await
        .expect("profile text");

    assert_eq!(text, "# Mira Thornwood\n## Appearance\nTall.");
}

#[tokio::test]
async fn test_prompt_carries_section_titles() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
        })))
        .mount(&server)
        .await;

    client(&server)
        .generate_profile(&profile_request())
        .await
        .expect("profile text");

    let requests = server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value = requests[0].body_json().expect("json body");
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text");
    assert!(prompt.contains("## Appearance"));
    assert!(prompt.contains("## Secrets"));
    assert!(prompt.contains("Mira Thornwood"));
    assert!(body["systemInstruction"]["parts"][0]["text"].is_string());
}

#[tokio::test]
async fn test_api_error_is_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Resource has been exhausted" }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_profile(&profile_request())
        .await
        .expect_err("429 is an error");

    match &err {
        AiError::Api { status, message } => {
            assert_eq!(*status, 429);
            assert_eq!(message, "Resource has been exhausted");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_blocked_prompt_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_profile(&profile_request())
        .await
        .expect_err("blocked");
    assert!(matches!(err, AiError::InvalidResponse(ref m) if m.contains("SAFETY")));
}

// =============================================================================
// Image
// =============================================================================

#[tokio::test]
async fn test_portrait_request_and_response() {
    let server = MockServer::start().await;
    let bytes = vec![0x89, b'P', b'N', b'G'];
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_partial_json(json!({
            "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here is your portrait." },
                    { "inlineData": { "mimeType": "image/png", "data": STANDARD.encode(&bytes) } }
                ]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let portrait = client(&server)
        .generate_portrait(&portrait_request())
        .await
        .expect("portrait");

    assert_eq!(portrait.mime_type, "image/png");
    assert_eq!(portrait.data, bytes);
}

#[tokio::test]
async fn test_portrait_without_image_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot draw that." }] } }]
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_portrait(&portrait_request())
        .await
        .expect_err("no image");
    assert!(matches!(err, AiError::NoImage));
}

#[tokio::test]
async fn test_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let err = client(&server)
        .generate_portrait(&portrait_request())
        .await
        .expect_err("403");
    assert!(!err.is_recoverable());
    assert_eq!(err.user_message(), "The AI service rejected the API key.");
}
