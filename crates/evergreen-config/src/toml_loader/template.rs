//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r#"# EverGreen Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The API key is read from the environment (see api_key_env), never from this file.

[ai]
# api_base = "https://generativelanguage.googleapis.com/v1beta/models"
# chat_model = "gemini-3-flash-preview"
# image_model = "gemini-2.5-flash-image"
# aspect_ratio = "16:9"
# api_key_env = "API_KEY"     # GEMINI_API_KEY is tried next
# connect_timeout_secs = 10
# request_timeout_secs = 120
# max_output_tokens = 1024
# temperature = 0.7           # 0.0-2.0

[logging]
# level = "evergreen=info"    # any tracing EnvFilter directive
"#
}
