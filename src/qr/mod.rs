//! QR code encoding, rasterization and decoding
//!
//! Encoding and decoding are delegated to `qrcode` and `rqrr`; this module
//! owns the symbol-version search, the square-module rasterizer and the
//! types that configure them.

mod color;
mod decoder;
mod encoder;

pub use color::{Color, Palette};
pub use decoder::QrDecoder;
pub use encoder::{MAX_SIDE_PIXELS, MAX_VERSION, QrEncoder, RenderConfig};
pub(crate) use encoder::version_number;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A decoded QR code payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// The raw decoded data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Error correction level applied to every rendered symbol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% of codewords recoverable
    #[default]
    #[serde(alias = "l")]
    Low,
    /// ~15% of codewords recoverable
    #[serde(alias = "m")]
    Medium,
    /// ~25% of codewords recoverable
    #[serde(alias = "q")]
    Quartile,
    /// ~30% of codewords recoverable
    #[serde(alias = "h")]
    High,
}

impl ErrorCorrection {
    /// Map onto the encoder's level type.
    pub fn ec_level(self) -> qrcode::EcLevel {
        match self {
            Self::Low => qrcode::EcLevel::L,
            Self::Medium => qrcode::EcLevel::M,
            Self::Quartile => qrcode::EcLevel::Q,
            Self::High => qrcode::EcLevel::H,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::Low),
            "m" | "medium" => Some(Self::Medium),
            "q" | "quartile" => Some(Self::Quartile),
            "h" | "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "L",
            Self::Medium => "M",
            Self::Quartile => "Q",
            Self::High => "H",
        };
        f.write_str(label)
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unknown error correction level '{value}', expected low/medium/quartile/high")
        })
    }
}
