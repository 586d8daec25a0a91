pub(crate) mod huggingface;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{GeneratedImage, GenerationRequest},
};

/// Trait for text-to-image provider implementations
///
/// One call is one outbound request; implementations never retry.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image for the given prompt
    async fn generate_image(&self, request: &GenerationRequest) -> Result<GeneratedImage>;

    /// Get the provider name
    fn name(&self) -> &str;
}
