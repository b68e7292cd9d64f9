//! AI engine for EverGreen.
//!
//! Provides:
//! - The `GenerationClient` contract (chat completion + image generation)
//! - A Gemini implementation of that contract
//! - Single-flight sessions for the chat and garden-visualizer features

pub mod gemini;
pub mod prompts;
pub mod session;

use async_trait::async_trait;
use base64::Engine as _;

pub use gemini::{GeminiClient, GeminiConfig};
pub use session::{
    ChatSession, FlightPolicy, FlightSession, IgnoreReason, Message, SubmitOutcome,
    VisualizationSession,
};

/// The generative-AI backend as seen by the sessions.
///
/// Implementations are stateless and may be shared between sessions.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Reply to `input` given the prior turns in `context`.
    ///
    /// An empty string means the backend produced no text.
    async fn complete_chat(&self, context: &[ChatTurn], input: &str)
        -> Result<String, GenerationError>;

    /// Render `description`. `Ok(None)` means the call succeeded but no
    /// image came back.
    async fn generate_image(
        &self,
        description: &str,
    ) -> Result<Option<GeneratedImage>, GenerationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior turn replayed to the backend as context.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// An image produced by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedImage {
    /// Raw image bytes returned inline.
    Inline { mime_type: String, data: Vec<u8> },
    /// An externally hosted image.
    Url(String),
}

impl GeneratedImage {
    /// A reference a browser or image viewer can display directly:
    /// a `data:` URL for inline bytes, the URL itself otherwise.
    pub fn to_reference(&self) -> String {
        match self {
            Self::Inline { mime_type, data } => format!(
                "data:{mime_type};base64,{}",
                base64::engine::general_purpose::STANDARD.encode(data)
            ),
            Self::Url(url) => url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("API key not configured")]
    NotConfigured,
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::ParseError(e.to_string())
        } else {
            Self::NetworkError(e.to_string())
        }
    }
}
