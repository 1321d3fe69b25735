//! QR code encoder and image rendering

use crate::error::{Error, Result};
use crate::qr::{ErrorCorrection, Palette};
use image::{Rgb, RgbImage, imageops};
use qrcode::types::QrError;
use qrcode::{QrCode, Version};
use serde::{Deserialize, Serialize};

/// Largest normal QR symbol version
pub const MAX_VERSION: i16 = 40;

/// Upper bound on the edge length of a rendered image, in pixels
pub const MAX_SIDE_PIXELS: u32 = 8192;

/// Immutable rendering parameters shared by every emission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Error correction level
    pub error_correction: ErrorCorrection,
    /// Edge length of a single module, in pixels
    pub module_size: u32,
    /// Quiet zone around the symbol, in modules
    pub border: u32,
    /// Smallest symbol version to try
    pub min_version: i16,
    /// Largest symbol version to try before giving up
    pub max_version: i16,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::Low,
            module_size: 10,
            border: 4,
            min_version: 1,
            max_version: MAX_VERSION,
        }
    }
}

impl RenderConfig {
    /// Check that sizing and the version window are usable.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.module_size) {
            return Err(Error::Config(format!(
                "module_size must be between 1 and 100 pixels, got {}",
                self.module_size
            )));
        }
        if self.border > 64 {
            return Err(Error::Config(format!(
                "border must be at most 64 modules, got {}",
                self.border
            )));
        }
        if self.min_version < 1 || self.max_version > MAX_VERSION {
            return Err(Error::Config(format!(
                "symbol versions must lie within 1..={MAX_VERSION}, got {}..={}",
                self.min_version, self.max_version
            )));
        }
        if self.min_version > self.max_version {
            return Err(Error::Config(format!(
                "min_version {} is greater than max_version {}",
                self.min_version, self.max_version
            )));
        }
        let side = self.max_side();
        if side > MAX_SIDE_PIXELS {
            return Err(Error::Config(format!(
                "version {} at module_size {} with border {} renders {side}px images, limit is {MAX_SIDE_PIXELS}px",
                self.max_version, self.module_size, self.border
            )));
        }
        Ok(())
    }

    /// Edge length of the largest image this configuration can produce.
    pub fn max_side(&self) -> u32 {
        let modules = 17 + 4 * self.max_version as u32;
        (modules + 2 * self.border) * self.module_size
    }
}

/// QR code encoder
#[derive(Debug, Clone)]
pub struct QrEncoder {
    config: RenderConfig,
}

impl QrEncoder {
    /// Create an encoder, rejecting unusable render settings
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Render settings in effect
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Encode text into the smallest symbol version within the configured window.
    pub fn encode(&self, data: &str) -> Result<QrCode> {
        if data.is_empty() {
            return Err(Error::EmptyPayload);
        }

        let level = self.config.error_correction;
        for version in self.config.min_version..=self.config.max_version {
            match QrCode::with_version(data, Version::Normal(version), level.ec_level()) {
                Ok(code) => {
                    tracing::debug!(
                        version,
                        ecc_level = %level,
                        length = data.len(),
                        "Selected QR symbol version"
                    );
                    return Ok(code);
                }
                Err(QrError::DataTooLong) => continue,
                Err(e) => {
                    return Err(Error::QrEncode(format!(
                        "Failed to create QR code at version {version}: {e}"
                    )));
                }
            }
        }

        Err(Error::CapacityExceeded {
            length: data.len(),
            max_version: self.config.max_version,
            level,
        })
    }

    /// Render a symbol with square modules, then pad it with the quiet zone.
    pub fn render(&self, code: &QrCode, palette: Palette) -> RgbImage {
        let scale = self.config.module_size;
        let light = Rgb::<u8>::from(palette.background);

        let symbol = code
            .render::<Rgb<u8>>()
            .dark_color(Rgb::from(palette.foreground))
            .light_color(light)
            .quiet_zone(false)
            .module_dimensions(scale, scale)
            .build();

        let margin = self.config.border * scale;
        let side = symbol.width() + 2 * margin;
        let mut canvas = RgbImage::from_pixel(side, side, light);
        imageops::overlay(&mut canvas, &symbol, i64::from(margin), i64::from(margin));
        canvas
    }

    /// Encode and rasterize in one step
    pub fn encode_image(&self, data: &str, palette: Palette) -> Result<(QrCode, RgbImage)> {
        let code = self.encode(data)?;
        let image = self.render(&code, palette);
        Ok((code, image))
    }
}

/// Normal symbol version number of an encoded code
pub(crate) fn version_number(code: &QrCode) -> i16 {
    match code.version() {
        Version::Normal(v) | Version::Micro(v) => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::Color;

    fn encoder() -> QrEncoder {
        QrEncoder::new(RenderConfig::default()).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let zero_module = RenderConfig {
            module_size: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(QrEncoder::new(zero_module), Err(Error::Config(_))));

        let inverted = RenderConfig {
            min_version: 10,
            max_version: 2,
            ..RenderConfig::default()
        };
        assert!(matches!(inverted.validate(), Err(Error::Config(_))));

        let too_large = RenderConfig {
            max_version: 41,
            ..RenderConfig::default()
        };
        assert!(matches!(too_large.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_image_size_is_bounded() {
        let huge = RenderConfig {
            module_size: 100,
            border: 64,
            ..RenderConfig::default()
        };
        assert_eq!(huge.max_side(), 30500);
        assert!(matches!(huge.validate(), Err(Error::Config(_))));

        // Large modules are fine when the version window keeps the symbol small.
        let small_symbol = RenderConfig {
            module_size: 100,
            max_version: 1,
            ..RenderConfig::default()
        };
        assert_eq!(small_symbol.max_side(), 2900);
        assert!(small_symbol.validate().is_ok());
        assert_eq!(RenderConfig::default().max_side(), 1850);
    }

    #[test]
    fn test_single_character_uses_version_one() {
        let code = encoder().encode("A").unwrap();
        assert_eq!(version_number(&code), 1);
        assert_eq!(code.width(), 21);
    }

    #[test]
    fn test_image_dimensions_follow_module_and_border() {
        let encoder = encoder();
        let (code, image) = encoder.encode_image("A", Palette::default()).unwrap();
        assert_eq!(version_number(&code), 1);
        assert_eq!(image.dimensions(), (290, 290));

        let (code, image) = encoder
            .encode_image("https://www.example.com/safe_page", Palette::default())
            .unwrap();
        let expected = (17 + 4 * version_number(&code) as u32 + 2 * 4) * 10;
        assert_eq!(image.width(), expected);
        assert_eq!(image.height(), expected);
    }

    #[test]
    fn test_border_and_finder_use_palette() {
        let palette = Palette {
            foreground: Color([0, 0, 128]),
            background: Color([255, 255, 0]),
        };
        let image = encoder().render(&encoder().encode("A").unwrap(), palette);

        // Quiet zone corner, then the top-left module of the finder pattern.
        assert_eq!(image.get_pixel(0, 0), &image::Rgb([255, 255, 0]));
        assert_eq!(image.get_pixel(40, 40), &image::Rgb([0, 0, 128]));
        assert_eq!(image.get_pixel(49, 49), &image::Rgb([0, 0, 128]));
        // Light ring just inside the finder's outer edge.
        assert_eq!(image.get_pixel(55, 55), &image::Rgb([255, 255, 0]));
    }

    #[test]
    fn test_border_width_is_configurable() {
        let code = encoder().encode("A").unwrap();
        for (border, side) in [(0, 210), (1, 230), (8, 370)] {
            let encoder = QrEncoder::new(RenderConfig {
                border,
                ..RenderConfig::default()
            })
            .unwrap();
            let image = encoder.render(&code, Palette::default());
            assert_eq!(image.dimensions(), (side, side), "border {border}");
            // Top-left finder module always sits right after the margin.
            let edge = border * 10;
            assert_eq!(image.get_pixel(edge, edge), &image::Rgb([0, 0, 0]));
        }
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert!(matches!(encoder().encode(""), Err(Error::EmptyPayload)));
    }

    #[test]
    fn test_capacity_exceeded_is_not_truncated() {
        let oversized = "x".repeat(4000);
        match encoder().encode(&oversized) {
            Err(Error::CapacityExceeded {
                length,
                max_version,
                level,
            }) => {
                assert_eq!(length, 4000);
                assert_eq!(max_version, 40);
                assert_eq!(level, ErrorCorrection::Low);
            }
            other => panic!("expected capacity error, got {:?}", other.map(|c| c.version())),
        }
    }

    #[test]
    fn test_constrained_version_window() {
        let config = RenderConfig {
            max_version: 1,
            ..RenderConfig::default()
        };
        let encoder = QrEncoder::new(config).unwrap();
        assert!(encoder.encode("short").is_ok());
        assert!(matches!(
            encoder.encode("https://www.example.com/safe_page"),
            Err(Error::CapacityExceeded { max_version: 1, .. })
        ));
    }

    #[test]
    fn test_higher_ecc_needs_larger_symbol() {
        let data = "https://phishing.xyz/login?session=expired";
        let low = encoder().encode(data).unwrap();
        let high = QrEncoder::new(RenderConfig {
            error_correction: ErrorCorrection::High,
            ..RenderConfig::default()
        })
        .unwrap()
        .encode(data)
        .unwrap();
        assert!(version_number(&high) > version_number(&low));
    }
}
