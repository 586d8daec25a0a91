use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Default Hugging Face inference endpoint for Stable Diffusion XL
pub const DEFAULT_INFERENCE_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";

/// Text-to-image inference provider configuration
///
/// The credential is deliberately absent; it is supplied per request.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InferenceConfig {
    /// Model endpoint that accepts the prompt and returns image bytes
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
    /// Ask the provider to hold the request while a cold model loads
    #[serde(default = "default_wait_for_model")]
    pub wait_for_model: bool,
    /// Request timeout (e.g. "90s", "5m"); unset means no timeout
    #[serde(default)]
    pub timeout: Option<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            wait_for_model: default_wait_for_model(),
            timeout: None,
        }
    }
}

impl InferenceConfig {
    /// Parsed request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout string is not a valid duration or is zero
    pub fn timeout(&self) -> anyhow::Result<Option<Duration>> {
        let Some(ref raw) = self.timeout else {
            return Ok(None);
        };

        let timeout =
            duration_str::parse(raw).map_err(|e| anyhow::anyhow!("invalid inference.timeout '{raw}': {e}"))?;

        if timeout.is_zero() {
            anyhow::bail!("inference.timeout must be greater than zero");
        }

        Ok(Some(timeout))
    }
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_INFERENCE_ENDPOINT).expect("must be valid URL")
}

#[allow(clippy::missing_const_for_fn)]
fn default_wait_for_model() -> bool {
    true
}
