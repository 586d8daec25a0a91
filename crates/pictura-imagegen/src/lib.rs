//! Text-to-image request client
//!
//! Issues one authenticated request per prompt and turns the returned image
//! bytes into a self-contained `data:` URI.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

pub mod data_uri;
mod error;
mod http_client;
mod provider;
mod types;

use std::sync::Arc;

pub use error::{ErrorKind, ImageGenError, Result};
pub use provider::{ImageGenerator, huggingface::HuggingFaceProvider};
pub use types::{GeneratedImage, GenerationRequest};

/// Build the image generator from configuration
///
/// # Errors
///
/// Returns an error if the configured timeout is invalid or the HTTP client
/// fails to initialize
pub fn build_generator(config: &pictura_config::Config) -> anyhow::Result<Arc<dyn ImageGenerator>> {
    let inference = &config.inference;

    let provider = HuggingFaceProvider::new(
        "huggingface".to_string(),
        inference.endpoint.clone(),
        inference.wait_for_model,
        inference.timeout()?,
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize image generation client: {e}"))?;

    tracing::debug!(endpoint = %provider.endpoint(), "image generation client initialized");

    Ok(Arc::new(provider))
}
