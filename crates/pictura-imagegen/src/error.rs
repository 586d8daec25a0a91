use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImageGenError>;

/// Classification of a failed generation attempt
///
/// Callers only branch on this; the detail carried by [`ImageGenError`]
/// is diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No credential was supplied, so no request was made
    MissingCredential,
    /// The provider rejected the credential (HTTP 401)
    Unauthorized,
    /// Any other provider, transport or payload failure
    GenerationFailed,
}

/// Image generation client errors
#[derive(Debug, Error)]
pub enum ImageGenError {
    /// Credential absent or blank
    #[error("API key is required")]
    MissingCredential,

    /// Provider returned 401
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Provider returned any other non-success status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error, including timeouts
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The success response did not carry a usable image
    #[error("Invalid image payload: {0}")]
    InvalidPayload(String),
}

impl ImageGenError {
    /// Classify the error for the caller
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential => ErrorKind::MissingCredential,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::ProviderApiError { .. } | Self::ConnectionError(_) | Self::InvalidPayload(_) => {
                ErrorKind::GenerationFailed
            }
        }
    }

    /// Build the error for a non-success provider status
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Unauthorized(message),
            _ => Self::ProviderApiError { status, message },
        }
    }
}
