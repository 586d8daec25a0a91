use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails, or
    /// validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml(&raw)?;

        tracing::debug!(path = %path.display(), "configuration loaded");

        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if TOML parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the inference endpoint, timeout or health path
    /// is unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_inference_config()?;
        self.validate_health_config()?;
        Ok(())
    }

    /// Validate the inference endpoint and timeout
    fn validate_inference_config(&self) -> anyhow::Result<()> {
        let endpoint = &self.inference.endpoint;

        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("inference.endpoint must be an http or https URL, got '{endpoint}'");
        }

        if endpoint.host().is_none() {
            anyhow::bail!("inference.endpoint must include a host");
        }

        self.inference.timeout()?;

        Ok(())
    }

    /// Validate the health endpoint path
    fn validate_health_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        if health.enabled && health.path == "/" {
            anyhow::bail!("server.health.path must not be '/', the page is served there");
        }

        if health.enabled && (health.path == "/api" || health.path.starts_with("/api/")) {
            anyhow::bail!("server.health.path must not be under the reserved /api/ prefix");
        }

        Ok(())
    }
}
