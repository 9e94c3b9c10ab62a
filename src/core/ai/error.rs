//! AI collaborator error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AiError>;

#[derive(Error, Debug)]
pub enum AiError {
    /// No API key, or the client could not be built from configuration.
    #[error("AI access is not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response contained no image data")]
    NoImage,

    #[error("Failed to decode image data: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl AiError {
    pub fn not_configured(reason: impl Into<String>) -> Self {
        Self::NotConfigured(reason.into())
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse(reason.into())
    }

    /// Whether retrying the same request can succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            AiError::NotConfigured(_) => false,
            AiError::Api { status, .. } => *status == 429 || *status >= 500,
            AiError::Http(_) | AiError::InvalidResponse(_) | AiError::NoImage | AiError::Decode(_) => {
                true
            }
        }
    }

    /// Short message suitable for a status line.
    pub fn user_message(&self) -> String {
        match self {
            AiError::NotConfigured(_) => {
                "AI access is not configured. Set GEMINI_API_KEY or add an api_key to config.toml."
                    .to_string()
            }
            AiError::Api { status: 401 | 403, .. } => {
                "The AI service rejected the API key.".to_string()
            }
            AiError::Api { status: 429, .. } => {
                "The AI service is rate limiting requests; try again shortly.".to_string()
            }
            other => other.to_string(),
        }
    }
}
