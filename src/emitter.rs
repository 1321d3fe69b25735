//! Writes a single payload to disk as a QR-code PNG

use crate::error::{Error, Result};
use crate::qr::{Palette, QrDecoder, QrEncoder, RenderConfig, version_number};
use image::ImageFormat;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything needed for one emission; borrowed for the duration of the call
#[derive(Debug, Clone, Copy)]
pub struct EmissionRequest<'a> {
    /// Text to encode
    pub payload: &'a str,
    /// PNG file to create or overwrite
    pub destination: &'a Path,
    /// Module and background colors
    pub palette: Palette,
}

impl<'a> EmissionRequest<'a> {
    /// Black-on-white request for `payload` at `destination`
    pub fn new(payload: &'a str, destination: &'a Path) -> Self {
        Self {
            payload,
            destination,
            palette: Palette::default(),
        }
    }

    /// Override the palette
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

/// Record of a fixture written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Emission {
    /// File that was written
    pub path: PathBuf,
    /// Encoded text
    pub payload: String,
    /// Symbol version the payload was fitted into
    pub version: i16,
    /// Edge length of the square image in pixels
    pub pixels: u32,
    /// Whether the written file was decoded back and compared
    pub verified: bool,
}

/// Renders payloads to PNG files with a fixed render configuration
#[derive(Debug)]
pub struct ImageEmitter {
    encoder: QrEncoder,
    decoder: Option<QrDecoder>,
}

impl ImageEmitter {
    /// Create an emitter; fails if the render configuration is unusable
    pub fn new(config: RenderConfig) -> Result<Self> {
        Ok(Self {
            encoder: QrEncoder::new(config)?,
            decoder: None,
        })
    }

    /// Decode every written file and require it to match its payload
    pub fn with_verification(mut self, enabled: bool) -> Self {
        self.decoder = enabled.then(QrDecoder::new);
        self
    }

    /// Render settings in effect
    pub fn config(&self) -> &RenderConfig {
        self.encoder.config()
    }

    /// Encode, rasterize and write one payload, overwriting any existing file.
    pub fn emit(&self, request: EmissionRequest<'_>) -> Result<Emission> {
        let (code, image) = self.encoder.encode_image(request.payload, request.palette)?;

        image.save_with_format(request.destination, ImageFormat::Png)?;

        let verified = match &self.decoder {
            Some(decoder) => {
                verify(decoder, request.destination, request.payload)?;
                true
            }
            None => false,
        };

        let version = version_number(&code);
        info!(
            version,
            verified,
            "Generated '{}' with content: '{}'",
            request.destination.display(),
            request.payload
        );

        Ok(Emission {
            path: request.destination.to_path_buf(),
            payload: request.payload.to_string(),
            version,
            pixels: image.width(),
            verified,
        })
    }
}

fn verify(decoder: &QrDecoder, path: &Path, expected: &str) -> Result<()> {
    let decoded = decoder.decode_file(path)?;
    if decoded.as_str() == Some(expected) {
        return Ok(());
    }

    Err(Error::VerificationMismatch {
        path: path.to_path_buf(),
        expected: expected.to_string(),
        actual: decoded.text,
    })
}
