use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EvergreenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("ai error: {0}")]
    Ai(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("ai.chat_model must not be empty".into());
        assert_eq!(
            err.to_string(),
            "config validation error: ai.chat_model must not be empty"
        );
    }

    #[test]
    fn evergreen_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: EvergreenError = config_err.into();
        assert!(matches!(err, EvergreenError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn evergreen_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: EvergreenError = io_err.into();
        assert!(matches!(err, EvergreenError::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn ai_error_display() {
        let err = EvergreenError::Ai("HTTP 403".into());
        assert_eq!(err.to_string(), "ai error: HTTP 403");
    }
}
