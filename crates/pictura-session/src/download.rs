use pictura_imagegen::{GeneratedImage, data_uri::DataUriError};

/// A generated image ready to be saved as a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Decode a stored image into a download stamped with `timestamp_ms`
    pub fn from_image(image: &GeneratedImage, timestamp_ms: i64) -> Result<Self, DataUriError> {
        let decoded = pictura_imagegen::data_uri::decode_data_uri(image.data_uri())?;

        Ok(Self {
            filename: download_filename(timestamp_ms),
            content_type: decoded.mime,
            bytes: decoded.bytes,
        })
    }
}

/// File name offered for a download made at `timestamp_ms` (Unix millis)
pub fn download_filename(timestamp_ms: i64) -> String {
    format!("generated-image-{timestamp_ms}.jpg")
}
