use secrecy::SecretString;

use crate::data_uri;

/// A single prompt submission with the credential to authenticate it
///
/// The credential is kept secret and never appears in `Debug` output.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Text description of the desired image
    pub prompt: String,
    /// Bearer token for the inference provider
    pub credential: SecretString,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            credential: SecretString::from(credential.into()),
        }
    }
}

/// A generated image in displayable form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    data_uri: String,
    byte_len: usize,
}

impl GeneratedImage {
    /// Wrap raw JPEG bytes as a `data:image/jpeg;base64,...` image
    pub fn from_jpeg_bytes(bytes: &[u8]) -> Self {
        Self {
            data_uri: data_uri::encode_jpeg_data_uri(bytes),
            byte_len: bytes.len(),
        }
    }

    /// The base64 `data:` URI, usable directly as an `<img src>`
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Size of the decoded image in bytes
    pub const fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Decode the image back into its raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the stored URI is not a valid base64 `data:` URI
    pub fn to_bytes(&self) -> Result<Vec<u8>, data_uri::DataUriError> {
        data_uri::decode_data_uri(&self.data_uri).map(|decoded| decoded.bytes)
    }
}
