//! Conversion between raw image bytes and `data:` URIs

use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

/// MIME type the inference provider returns on success
pub const JPEG_MIME: &str = "image/jpeg";

/// Errors from parsing a `data:` URI
#[derive(Debug, Error)]
pub enum DataUriError {
    #[error("not a data URI")]
    MissingScheme,
    #[error("data URI has no payload separator")]
    MissingPayload,
    #[error("data URI is not base64 encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A decoded `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Encode bytes as a base64 `data:` URI with the given MIME type
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Encode JPEG bytes as a `data:image/jpeg;base64,...` URI
pub fn encode_jpeg_data_uri(bytes: &[u8]) -> String {
    encode_data_uri(JPEG_MIME, bytes)
}

/// Decode a base64 `data:` URI back into its MIME type and bytes
///
/// Only base64 payloads are accepted; an absent MIME type defaults to
/// `text/plain` as the URI scheme specifies.
pub fn decode_data_uri(uri: &str) -> Result<DecodedDataUri, DataUriError> {
    let rest = uri.strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
    let (mime_and_encoding, data) = rest.split_once(',').ok_or(DataUriError::MissingPayload)?;
    let mime = mime_and_encoding
        .strip_suffix(";base64")
        .ok_or(DataUriError::NotBase64)?;

    let mime = if mime.is_empty() { "text/plain" } else { mime };
    let bytes = STANDARD.decode(data)?;

    Ok(DecodedDataUri {
        mime: mime.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_jpeg_magic_bytes() {
        let uri = encode_jpeg_data_uri(&[0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(uri, "data:image/jpeg;base64,/9j/4A==");
    }

    #[test]
    fn encodes_empty_payload() {
        assert_eq!(encode_jpeg_data_uri(&[]), "data:image/jpeg;base64,");
    }

    #[test]
    fn decoded_payload_matches_input() {
        let bytes: Vec<u8> = (0..=255).collect();
        let decoded = decode_data_uri(&encode_jpeg_data_uri(&bytes)).unwrap();
        assert_eq!(decoded.mime, JPEG_MIME);
        assert_eq!(decoded.bytes, bytes);
    }

    #[test]
    fn decode_keeps_other_mime_types() {
        let decoded = decode_data_uri("data:image/png;base64,iVBORw==").unwrap();
        assert_eq!(decoded.mime, "image/png");
        assert_eq!(decoded.bytes, vec![0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn decode_defaults_missing_mime() {
        let decoded = decode_data_uri("data:;base64,aGk=").unwrap();
        assert_eq!(decoded.mime, "text/plain");
        assert_eq!(decoded.bytes, b"hi");
    }

    #[test]
    fn decode_rejects_malformed_uris() {
        assert!(matches!(decode_data_uri("https://example.com/a.jpg"), Err(DataUriError::MissingScheme)));
        assert!(matches!(decode_data_uri("data:image/jpeg;base64"), Err(DataUriError::MissingPayload)));
        assert!(matches!(decode_data_uri("data:image/jpeg,plain"), Err(DataUriError::NotBase64)));
        assert!(matches!(
            decode_data_uri("data:image/jpeg;base64,***"),
            Err(DataUriError::InvalidBase64(_))
        ));
    }
}
