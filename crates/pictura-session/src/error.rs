use pictura_imagegen::ErrorKind;
use thiserror::Error;

/// Message shown when the provider rejects the credential
pub const UNAUTHORIZED_MESSAGE: &str = "Invalid API key. Please check your Hugging Face API key and try again.";

/// Message shown for every other failure
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while generating the image. Please try again.";

/// Why a submission was refused without starting an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("prompt must not be empty")]
    BlankPrompt,
    #[error("API key must not be empty")]
    BlankCredential,
    #[error("an image is already being generated")]
    InFlight,
}

/// User-facing message for a classified failure
pub const fn user_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Unauthorized => UNAUTHORIZED_MESSAGE,
        ErrorKind::MissingCredential | ErrorKind::GenerationFailed => GENERIC_FAILURE_MESSAGE,
    }
}
