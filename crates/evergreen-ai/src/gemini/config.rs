//! Gemini API client configuration.

use std::time::Duration;

use evergreen_config::AiConfig;

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    /// `None` leaves the client unconfigured; every call then fails.
    pub api_key: Option<String>,
    pub api_base: String,
    pub chat_model: String,
    pub image_model: String,
    pub aspect_ratio: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("chat_model", &self.chat_model)
            .field("image_model", &self.image_model)
            .field("aspect_ratio", &self.aspect_ratio)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::unconfigured()
        }
    }

    /// Defaults with no credential.
    pub fn unconfigured() -> Self {
        Self::from_ai_config(&AiConfig::default(), None)
    }

    /// Build from the `[ai]` config section and an already-resolved key.
    pub fn from_ai_config(ai: &AiConfig, api_key: Option<String>) -> Self {
        Self {
            api_key,
            api_base: ai.api_base.clone(),
            chat_model: ai.chat_model.clone(),
            image_model: ai.image_model.clone(),
            aspect_ratio: ai.aspect_ratio.clone(),
            connect_timeout: Duration::from_secs(ai.connect_timeout_secs),
            request_timeout: Duration::from_secs(ai.request_timeout_secs),
            max_tokens: ai.max_output_tokens,
            temperature: ai.temperature,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
