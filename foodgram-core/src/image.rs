//! Image payloads submitted as base64 data URIs (recipe images, avatars).
//!
//! The declared MIME type in the URI is ignored; the content type is taken
//! from the decoded bytes.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, ImageReader};

use crate::error::ValidationError;

/// Allowed image formats for recipe images and avatars.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum decoded image size (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub data: Vec<u8>,
    /// Detected content type, e.g. "image/png"
    pub content_type: String,
}

/// Check that `data` is one of the [`ALLOWED_FORMATS`] and return its
/// content type.
pub fn validate_image(data: &[u8]) -> Result<String, ValidationError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ValidationError::InvalidImage(format!("failed to read image: {}", e)))?;

    let format = reader
        .format()
        .ok_or_else(|| ValidationError::InvalidImage("could not detect image format".into()))?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(ValidationError::InvalidImage(format!(
            "unsupported format {:?}, allowed: JPEG, PNG, GIF, WebP",
            format
        )));
    }

    Ok(format.to_mime_type().to_string())
}

/// Decode `data:<mime>;base64,<payload>` into validated image bytes.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidImage(reason.to_string());

    let (header, payload) = uri
        .trim()
        .split_once(',')
        .ok_or_else(|| invalid("expected a data URI"))?;

    let params = header
        .strip_prefix("data:")
        .ok_or_else(|| invalid("expected a data URI"))?;

    if !params.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(invalid("data URI must be base64-encoded"));
    }

    // Reject oversized payloads before allocating the decoded buffer
    if payload.len() / 4 * 3 > MAX_FILE_SIZE + 3 {
        return Err(ValidationError::InvalidImage(format!(
            "image too large, maximum size is {} bytes",
            MAX_FILE_SIZE
        )));
    }

    let data = STANDARD
        .decode(payload.trim())
        .map_err(|e| ValidationError::InvalidImage(format!("bad base64: {}", e)))?;

    if data.len() > MAX_FILE_SIZE {
        return Err(ValidationError::InvalidImage(format!(
            "image too large, maximum size is {} bytes",
            MAX_FILE_SIZE
        )));
    }

    let content_type = validate_image(&data)?;

    Ok(DecodedImage { data, content_type })
}
