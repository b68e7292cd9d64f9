//! Gemini API client struct, request building, and response parsing.

use base64::Engine as _;
use serde_json::{json, Value};

use crate::prompts::SYSTEM_INSTRUCTION;
use crate::{ChatTurn, GeneratedImage, GenerationError, Role};

use super::config::GeminiConfig;

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GenerationError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub(crate) fn api_url(&self, model: &str) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }

    /// Chat body: prior turns, then the new user turn, under the persona.
    pub(crate) fn build_chat_body(&self, context: &[ChatTurn], input: &str) -> Value {
        let mut contents: Vec<Value> = context
            .iter()
            .map(|turn| content_entry(turn.role, &turn.content))
            .collect();
        contents.push(content_entry(Role::User, input));

        let mut body = json!({
            "contents": contents,
            "systemInstruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            }
        });

        let mut generation = serde_json::Map::new();
        if let Some(max) = self.config.max_tokens {
            generation.insert("maxOutputTokens".into(), json!(max));
        }
        if let Some(t) = self.config.temperature {
            generation.insert("temperature".into(), json!(t));
        }
        if !generation.is_empty() {
            body["generationConfig"] = Value::Object(generation);
        }

        body
    }

    pub(crate) fn build_image_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [content_entry(Role::User, prompt)],
            "generationConfig": {
                "imageConfig": { "aspectRatio": self.config.aspect_ratio }
            }
        })
    }
}

fn content_entry(role: Role, text: &str) -> Value {
    let role = match role {
        Role::User => "user",
        Role::Assistant => "model",
    };
    json!({ "role": role, "parts": [{ "text": text }] })
}

fn first_candidate_parts(json: &Value) -> Vec<Value> {
    json["candidates"][0]["content"]["parts"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

/// Concatenated text of the first candidate, skipping thought parts.
/// Empty when the model produced nothing.
pub(crate) fn parse_text(json: &Value) -> String {
    first_candidate_parts(json)
        .iter()
        .filter(|part| !part["thought"].as_bool().unwrap_or(false))
        .filter_map(|part| part["text"].as_str())
        .collect()
}

/// The first inline image of the first candidate, if any.
pub(crate) fn parse_image(json: &Value) -> Result<Option<GeneratedImage>, GenerationError> {
    for part in first_candidate_parts(json) {
        let Some(inline) = part.get("inlineData") else {
            continue;
        };
        let encoded = inline["data"]
            .as_str()
            .ok_or_else(|| GenerationError::ParseError("inlineData without data".into()))?;
        let data = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| GenerationError::ParseError(format!("invalid image payload: {e}")))?;
        let mime_type = inline["mimeType"]
            .as_str()
            .unwrap_or(DEFAULT_IMAGE_MIME)
            .to_string();
        return Ok(Some(GeneratedImage::Inline { mime_type, data }));
    }
    Ok(None)
}
