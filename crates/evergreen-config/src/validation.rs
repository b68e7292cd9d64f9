//! Full configuration validation.
//!
//! Collects every problem before failing so the user sees them all at once.

mod helpers;

use crate::schema::EvergreenConfig;
use evergreen_common::ConfigError;
use helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &EvergreenConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let ai = &config.ai;

    validate_non_empty(&mut errors, "ai.chat_model", &ai.chat_model);
    validate_non_empty(&mut errors, "ai.image_model", &ai.image_model);
    validate_non_empty(&mut errors, "ai.api_key_env", &ai.api_key_env);

    if !(ai.api_base.starts_with("http://") || ai.api_base.starts_with("https://")) {
        errors.push(format!(
            "ai.api_base = {:?} must start with http:// or https://",
            ai.api_base
        ));
    }

    if !is_aspect_ratio(&ai.aspect_ratio) {
        errors.push(format!(
            "ai.aspect_ratio = {:?} must look like W:H",
            ai.aspect_ratio
        ));
    }

    validate_range(&mut errors, "ai.connect_timeout_secs", ai.connect_timeout_secs, 1, 300);
    validate_range(&mut errors, "ai.request_timeout_secs", ai.request_timeout_secs, 1, 3600);

    if let Some(t) = ai.temperature {
        validate_range_f64(&mut errors, "ai.temperature", t, 0.0, 2.0);
    }
    if let Some(n) = ai.max_output_tokens {
        validate_range(&mut errors, "ai.max_output_tokens", u64::from(n), 1, 65_536);
    }

    validate_non_empty(&mut errors, "logging.level", &config.logging.level);
    if let Err(e) = tracing_subscriber::EnvFilter::try_new(&config.logging.level) {
        errors.push(format!(
            "logging.level = {:?} is not a valid filter: {e}",
            config.logging.level
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn is_aspect_ratio(value: &str) -> bool {
    let Some((w, h)) = value.split_once(':') else {
        return false;
    };
    matches!(
        (w.parse::<u32>(), h.parse::<u32>()),
        (Ok(w), Ok(h)) if w > 0 && h > 0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate(&EvergreenConfig::default()).is_ok());
    }

    #[test]
    fn catches_empty_model() {
        let mut config = EvergreenConfig::default();
        config.ai.chat_model = "  ".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("ai.chat_model"));
    }

    #[test]
    fn catches_bad_api_base() {
        let mut config = EvergreenConfig::default();
        config.ai.api_base = "ftp://example.com".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("ai.api_base"));
    }

    #[test]
    fn aspect_ratio_forms() {
        assert!(is_aspect_ratio("16:9"));
        assert!(is_aspect_ratio("1:1"));
        assert!(!is_aspect_ratio("16x9"));
        assert!(!is_aspect_ratio("0:9"));
        assert!(!is_aspect_ratio("16:"));
        assert!(!is_aspect_ratio(""));
    }

    #[test]
    fn catches_zero_timeout() {
        let mut config = EvergreenConfig::default();
        config.ai.request_timeout_secs = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("ai.request_timeout_secs"));
    }

    #[test]
    fn catches_temperature_out_of_range() {
        let mut config = EvergreenConfig::default();
        config.ai.temperature = Some(3.5);
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("ai.temperature"));
    }

    #[test]
    fn accepts_multi_target_log_filter() {
        let mut config = EvergreenConfig::default();
        config.logging.level = "evergreen=debug,reqwest=warn".into();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn catches_unparseable_log_filter() {
        let mut config = EvergreenConfig::default();
        config.logging.level = "evergreen=loud".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("logging.level"));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = EvergreenConfig::default();
        config.ai.image_model = String::new();
        config.ai.aspect_ratio = "square".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("ai.image_model"));
        assert!(err.contains("ai.aspect_ratio"));
    }
}
