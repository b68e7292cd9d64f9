//! Configuration schema types for EverGreen.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod ai;
mod logging;

pub use ai::*;
pub use logging::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvergreenConfig {
    pub ai: AiConfig,
    pub logging: LoggingConfig,
}
