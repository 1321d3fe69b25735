//! qrfixtures - QR-code image fixtures for the SafePay scanner
//!
//! Renders a fixed set of payloads (safe payment links, suspicious and
//! malicious-looking URLs, a steganography marker) to PNG files that a
//! separate scanner uses as test input.
//!
//! # Features
//!
//! - **Emitter**: one payload in, one scannable PNG out
//! - **Version fitting**: the smallest symbol that holds the payload, never truncation
//! - **Verification**: optional decode-after-write round trip via `rqrr`
//!
//! # Example
//!
//! ```no_run
//! use qrfixtures::{EmissionRequest, ImageEmitter, RenderConfig};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let emitter = ImageEmitter::new(RenderConfig::default())?;
//!     let emission = emitter.emit(EmissionRequest::new(
//!         "https://www.example.com/safe_page",
//!         Path::new("safe_url_qr.png"),
//!     ))?;
//!
//!     println!("Wrote version {} symbol to {}", emission.version, emission.path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod emitter;
pub mod error;
pub mod fixtures;
pub mod generate;
pub mod logging;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{FixtureConfig, LogRotation, LoggingOptions, OutputOptions, RenderOptions};
pub use emitter::{Emission, EmissionRequest, ImageEmitter};
pub use fixtures::{FIXTURES, Fixture, FixtureCategory};
pub use generate::{generate, generate_into};
pub use qr::{Color, ErrorCorrection, Palette, QrDecoder, QrEncoder, QrPayload, RenderConfig};
