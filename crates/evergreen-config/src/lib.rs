//! EverGreen configuration system.
//!
//! TOML-based configuration for the generative-AI backend and logging.
//! Every section uses serde defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use evergreen_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("chat model: {}", config.ai.chat_model);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{AiConfig, EvergreenConfig, LoggingConfig};

use evergreen_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a commented default file if none exists.
pub fn load_config() -> Result<EvergreenConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
