//! Gemini Client (API key-based)
//!
//! One HTTP client serving both collaborators through the Generative
//! Language `generateContent` endpoint: a text model for the profile and an
//! image-capable model for the portrait.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use super::prompts::{portrait_prompt, profile_prompt, PROFILE_SYSTEM_INSTRUCTION};
use super::{
    AiError, Portrait, PortraitGenerator, PortraitRequest, ProfileGenerator, ProfileRequest,
    Result,
};
use crate::config::AiConfig;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub struct GeminiClient {
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
    temperature: Option<f32>,
    client: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::build(
            api_key.into(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    fn build(api_key: String, timeout: Duration) -> Result<Self> {
        // Trim at construction so the header value matches what was validated.
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(AiError::not_configured("no API key provided"));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            temperature: None,
            client,
        })
    }

    /// Build from the `[ai]` config section. A missing key is `NotConfigured`.
    pub fn from_config(config: &AiConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AiError::not_configured("set GEMINI_API_KEY or [ai].api_key in config.toml")
        })?;

        let mut client = Self::build(api_key, Duration::from_secs(config.timeout_secs))?
            .with_base_url(&config.base_url)
            .with_models(&config.text_model, &config.image_model);
        client.temperature = config.temperature;
        Ok(client)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_models(mut self, text_model: &str, image_model: &str) -> Self {
        self.text_model = text_model.to_string();
        self.image_model = image_model.to_string();
        self
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn generate_content(&self, model: &str, body: &Value) -> Result<Value> {
        let start = std::time::Instant::now();
        let resp = self
            .client
            .post(self.endpoint(model))
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        log::debug!(
            "generateContent {} -> {} in {}ms",
            model,
            status.as_u16(),
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        Ok(resp.json().await?)
    }
}

/// Pull `error.message` out of a Google error body, else the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn candidate_parts(json: &Value) -> Result<&Vec<Value>> {
    json["candidates"]
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|c| c["content"]["parts"].as_array())
        .ok_or_else(|| {
            let reason = json["promptFeedback"]["blockReason"]
                .as_str()
                .map(|r| format!("prompt blocked: {}", r))
                .unwrap_or_else(|| "missing candidates".to_string());
            AiError::invalid_response(reason)
        })
}

/// Concatenate every text part of the first candidate.
pub fn extract_text(json: &Value) -> Result<String> {
    let text: String = candidate_parts(json)?
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect();

    if text.trim().is_empty() {
        return Err(AiError::invalid_response("empty text response"));
    }
    Ok(text)
}

/// First inline image part of the first candidate. Accepts both the
/// camelCase and snake_case spellings the API has used.
pub fn extract_image(json: &Value) -> Result<Portrait> {
    let parts = candidate_parts(json).map_err(|_| AiError::NoImage)?;
    let inline = parts
        .iter()
        .find_map(|p| {
            let inline = p.get("inlineData").or_else(|| p.get("inline_data"))?;
            inline.is_object().then_some(inline)
        })
        .ok_or(AiError::NoImage)?;

    let data = inline["data"].as_str().ok_or(AiError::NoImage)?;
    let mime = inline
        .get("mimeType")
        .or_else(|| inline.get("mime_type"))
        .and_then(Value::as_str)
        .unwrap_or("image/png");

    Portrait::from_base64(mime, data)
}

#[async_trait]
impl ProfileGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_profile(&self, request: &ProfileRequest) -> Result<String> {
        let mut body = json!({
            "systemInstruction": { "parts": [{ "text": PROFILE_SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": [{ "text": profile_prompt(request) }] }],
        });
        if let Some(temp) = self.temperature {
            body["generationConfig"] = json!({ "temperature": temp });
        }

        let json = self.generate_content(&self.text_model, &body).await?;
        let text = extract_text(&json)?;
        log::info!("Profile generated for {} ({} chars)", request.character.name, text.len());
        Ok(text)
    }
}

#[async_trait]
impl PortraitGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_portrait(&self, request: &PortraitRequest) -> Result<Portrait> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": portrait_prompt(request) }] }],
            "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] },
        });

        let json = self.generate_content(&self.image_model, &body).await?;
        let portrait = extract_image(&json)?;
        log::info!(
            "Portrait generated for {} ({}, {} bytes)",
            request.character.name,
            portrait.mime_type,
            portrait.data.len()
        );
        Ok(portrait)
    }
}
