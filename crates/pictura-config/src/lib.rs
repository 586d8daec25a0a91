#![allow(clippy::must_use_candidate)]

pub mod health;
pub mod inference;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use health::*;
pub use inference::*;
pub use server::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level Pictura configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Inference provider configuration
    #[serde(default)]
    pub inference: InferenceConfig,
    /// Logging and trace export configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
