//! Generative-AI backend configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Env var consulted after the configured one.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Backend endpoint, models, and request limits.
///
/// The credential itself is normally supplied through the environment.
/// `api_key` is only honoured when set programmatically and is never
/// serialized back out.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub api_base: String,
    pub chat_model: String,
    pub image_model: String,
    /// `W:H`, passed through as the image aspect ratio.
    pub aspect_ratio: String,
    /// Name of the env var holding the API key.
    pub api_key_env: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f64>,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_base", &self.api_base)
            .field("chat_model", &self.chat_model)
            .field("image_model", &self.image_model)
            .field("aspect_ratio", &self.aspect_ratio)
            .field("api_key_env", &self.api_key_env)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            chat_model: "gemini-3-flash-preview".into(),
            image_model: "gemini-2.5-flash-image".into(),
            aspect_ratio: "16:9".into(),
            api_key_env: "API_KEY".into(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
            max_output_tokens: None,
            temperature: None,
            api_key: None,
        }
    }
}

impl AiConfig {
    /// Resolve the API key.
    ///
    /// Resolution order:
    /// 1. An explicitly set `api_key`
    /// 2. The env var named by `api_key_env`
    /// 3. `GEMINI_API_KEY`
    ///
    /// Blank values are skipped. `None` means the backend is unconfigured.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let non_blank = |v: String| {
            let v = v.trim().to_string();
            (!v.is_empty()).then_some(v)
        };

        self.api_key
            .clone()
            .and_then(non_blank)
            .or_else(|| lookup(&self.api_key_env).and_then(non_blank))
            .or_else(|| lookup(FALLBACK_API_KEY_ENV).and_then(non_blank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn explicit_key_wins() {
        let config = AiConfig {
            api_key: Some("explicit".into()),
            ..Default::default()
        };
        let vars = env(&[("API_KEY", "from-env")]);
        let key = config.resolve_api_key_with(|k| vars.get(k).cloned());
        assert_eq!(key.as_deref(), Some("explicit"));
    }

    #[test]
    fn configured_env_var_before_fallback() {
        let config = AiConfig::default();
        let vars = env(&[("API_KEY", "primary"), ("GEMINI_API_KEY", "fallback")]);
        let key = config.resolve_api_key_with(|k| vars.get(k).cloned());
        assert_eq!(key.as_deref(), Some("primary"));
    }

    #[test]
    fn falls_back_to_gemini_api_key() {
        let config = AiConfig::default();
        let vars = env(&[("GEMINI_API_KEY", "fallback")]);
        let key = config.resolve_api_key_with(|k| vars.get(k).cloned());
        assert_eq!(key.as_deref(), Some("fallback"));
    }

    #[test]
    fn blank_values_are_skipped() {
        let config = AiConfig {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        let vars = env(&[("API_KEY", ""), ("GEMINI_API_KEY", "real")]);
        let key = config.resolve_api_key_with(|k| vars.get(k).cloned());
        assert_eq!(key.as_deref(), Some("real"));
    }

    #[test]
    fn missing_everywhere_is_none() {
        let config = AiConfig::default();
        assert!(config.resolve_api_key_with(|_| None).is_none());
    }

    #[test]
    fn debug_redacts_key() {
        let config = AiConfig {
            api_key: Some("super-secret".into()),
            ..Default::default()
        };
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("[REDACTED]"));
    }
}
