//! Error types for fixture generation

use crate::qr::ErrorCorrection;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fixture generation
#[derive(Error, Debug)]
pub enum Error {
    /// Empty payloads are rejected rather than rendered as a blank symbol
    #[error("Refusing to encode an empty payload")]
    EmptyPayload,

    /// Payload does not fit in any allowed symbol version
    #[error(
        "Payload of {length} bytes exceeds the capacity of version {max_version} at error correction level {level}"
    )]
    CapacityExceeded {
        /// Payload length in bytes
        length: usize,
        /// Largest symbol version that was tried
        max_version: i16,
        /// Error correction level in effect
        level: ErrorCorrection,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// A written fixture decoded to something other than its payload
    #[error("Fixture {} decoded to {actual:?}, expected {expected:?}", .path.display())]
    VerificationMismatch {
        /// Fixture that failed verification
        path: PathBuf,
        /// Payload that was encoded
        expected: String,
        /// Text recovered from the image, if it was valid UTF-8
        actual: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}
