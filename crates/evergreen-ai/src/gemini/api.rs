//! GenerationClient implementation for GeminiClient.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{ChatTurn, GeneratedImage, GenerationClient, GenerationError};

use super::client::{parse_image, parse_text, GeminiClient};

impl GeminiClient {
    async fn post(&self, model: &str, body: &Value) -> Result<Value, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::NotConfigured)?;

        let response = self
            .http
            .post(self.api_url(model))
            .header("content-type", "application/json")
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::ApiError(format!("HTTP {status}: {text}")));
        }

        response
            .json()
            .await
            .map_err(|e| GenerationError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn complete_chat(
        &self,
        context: &[ChatTurn],
        input: &str,
    ) -> Result<String, GenerationError> {
        let body = self.build_chat_body(context, input);
        debug!(model = %self.config.chat_model, turns = context.len() + 1, "Gemini chat request");

        let json = self.post(&self.config.chat_model, &body).await?;
        Ok(parse_text(&json))
    }

    async fn generate_image(
        &self,
        description: &str,
    ) -> Result<Option<GeneratedImage>, GenerationError> {
        let body = self.build_image_body(description);
        debug!(
            model = %self.config.image_model,
            aspect_ratio = %self.config.aspect_ratio,
            "Gemini image request"
        );

        let json = self.post(&self.config.image_model, &body).await?;
        parse_image(&json)
    }
}
