use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use url::Url;

use super::ImageGenerator;
use crate::{
    error::{ImageGenError, Result},
    http_client::http_client,
    types::{GeneratedImage, GenerationRequest},
};

/// Hugging Face Inference API text-to-image provider
pub struct HuggingFaceProvider {
    name: String,
    client: Client,
    endpoint: Url,
    wait_for_model: bool,
}

impl HuggingFaceProvider {
    /// Create a new Hugging Face provider
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(
        name: String,
        endpoint: Url,
        wait_for_model: bool,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let client =
            http_client(timeout).map_err(|e| anyhow::anyhow!("failed to build inference HTTP client: {e}"))?;

        Ok(Self {
            name,
            client,
            endpoint,
            wait_for_model,
        })
    }

    /// Endpoint the provider posts to
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Wire format for the inference request body
#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

/// Error body the Inference API returns alongside non-success statuses
#[derive(Deserialize)]
struct InferenceErrorBody {
    error: String,
}

/// Pull the provider's error message out of a response body
///
/// Falls back to the raw text when the body is not the usual JSON shape.
fn error_message(body: &str) -> String {
    serde_json::from_str::<InferenceErrorBody>(body).map_or_else(|_| body.to_string(), |parsed| parsed.error)
}

#[async_trait]
impl ImageGenerator for HuggingFaceProvider {
    async fn generate_image(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        let credential = request.credential.expose_secret();

        if credential.trim().is_empty() {
            return Err(ImageGenError::MissingCredential);
        }

        let body = InferenceRequest {
            inputs: &request.prompt,
            options: InferenceOptions {
                wait_for_model: self.wait_for_model,
            },
        };

        tracing::debug!(
            provider = %self.name,
            endpoint = %self.endpoint,
            prompt_len = request.prompt.len(),
            "sending text-to-image request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(http::header::AUTHORIZATION, format!("Bearer {credential}"))
            .header(http::header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "text-to-image request failed");
                ImageGenError::ConnectionError(format!("Failed to send request to {}: {e}", self.name))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .map_or_else(|_| "Unknown error".to_string(), |text| error_message(&text));

            tracing::error!(
                provider = %self.name,
                status = %status,
                error = %error_text,
                "text-to-image API error"
            );

            return Err(ImageGenError::from_status(status.as_u16(), error_text));
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to read image body");
            ImageGenError::ConnectionError(format!("Failed to read response body: {e}"))
        })?;

        if content_type.starts_with("application/json") {
            let message = error_message(&String::from_utf8_lossy(&bytes));
            tracing::error!(provider = %self.name, error = %message, "provider returned JSON instead of an image");
            return Err(ImageGenError::InvalidPayload(message));
        }

        if bytes.is_empty() {
            tracing::error!(provider = %self.name, "provider returned an empty image body");
            return Err(ImageGenError::InvalidPayload("empty response body".to_string()));
        }

        tracing::debug!(provider = %self.name, bytes = bytes.len(), "text-to-image request complete");

        Ok(GeneratedImage::from_jpeg_bytes(&bytes))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
