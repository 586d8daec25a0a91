//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use pictura_config::{Config, HealthConfig, InferenceConfig, ServerConfig, TelemetryConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pointed at the given inference endpoint
    pub fn new(endpoint: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                inference: InferenceConfig {
                    endpoint: endpoint.parse().expect("valid URL"),
                    ..InferenceConfig::default()
                },
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Set the inference request timeout
    pub fn with_timeout(mut self, timeout: &str) -> Self {
        self.config.inference.timeout = Some(timeout.to_owned());
        self
    }

    /// Serve the health check on a different path
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config.validate().expect("test config is valid");
        self.config
    }
}
