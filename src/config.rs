//! Runtime configuration handling

use crate::error::{Error, Result};
use crate::qr::{Color, ErrorCorrection, Palette, RenderConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration loaded from disk and environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Where fixtures are written
    pub output: OutputOptions,
    /// Symbol rendering parameters
    pub render: RenderOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl FixtureConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrfixtures.toml / qrfixtures.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrfixtures.toml", "qrfixtures.yaml", "qrfixtures.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrfixtures");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply `QRFIXTURES_*` overrides from an arbitrary variable source.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.output.apply_overrides(&lookup);
        self.render.apply_overrides(&lookup);
        self.logging.apply_overrides(&lookup);
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Output location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Directory receiving the PNG files, created if missing
    pub directory: PathBuf,
    /// Decode each file after writing and compare it with its payload
    pub verify: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("mock_qrcodes"),
            verify: false,
        }
    }
}

impl OutputOptions {
    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("QRFIXTURES_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.directory = PathBuf::from(dir);
            }
        }
        if let Some(flag) = lookup("QRFIXTURES_VERIFY").as_deref().and_then(parse_flag) {
            self.verify = flag;
        }
    }
}

/// Symbol rendering options as written in configuration files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Error correction level (`low`, `medium`, `quartile`, `high`)
    pub error_correction: ErrorCorrection,
    /// Pixels per module
    pub module_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Smallest symbol version to try
    pub min_version: i16,
    /// Largest symbol version to try
    pub max_version: i16,
    /// Dark module color
    pub foreground: Color,
    /// Light module and border color
    pub background: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let render = RenderConfig::default();
        let palette = Palette::default();
        Self {
            error_correction: render.error_correction,
            module_size: render.module_size,
            border: render.border,
            min_version: render.min_version,
            max_version: render.max_version,
            foreground: palette.foreground,
            background: palette.background,
        }
    }
}

impl RenderOptions {
    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("QRFIXTURES_ERROR_CORRECTION") {
            if let Ok(parsed) = level.parse::<ErrorCorrection>() {
                self.error_correction = parsed;
            }
        }
        if let Some(size) = lookup("QRFIXTURES_MODULE_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.module_size = parsed;
            }
        }
        if let Some(border) = lookup("QRFIXTURES_BORDER") {
            if let Ok(parsed) = border.parse::<u32>() {
                self.border = parsed;
            }
        }
        if let Some(color) = lookup("QRFIXTURES_FOREGROUND").and_then(|c| Color::parse(&c)) {
            self.foreground = color;
        }
        if let Some(color) = lookup("QRFIXTURES_BACKGROUND").and_then(|c| Color::parse(&c)) {
            self.background = color;
        }
    }

    /// Validated encoder configuration
    pub fn render_config(&self) -> Result<RenderConfig> {
        let config = RenderConfig {
            error_correction: self.error_correction,
            module_size: self.module_size,
            border: self.border,
            min_version: self.min_version,
            max_version: self.max_version,
        };
        config.validate()?;
        Ok(config)
    }

    /// Colors applied to every emission
    pub fn palette(&self) -> Palette {
        Palette {
            foreground: self.foreground,
            background: self.background,
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRFIXTURES_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("QRFIXTURES_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("QRFIXTURES_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = lookup("QRFIXTURES_LOG_COLOR").as_deref().and_then(parse_flag) {
            self.color = color;
        }
        if let Some(rotation) = lookup("QRFIXTURES_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_reference_rendering() {
        let config = FixtureConfig::default();
        assert_eq!(config.output.directory, PathBuf::from("mock_qrcodes"));
        assert!(!config.output.verify);

        let render = config.render.render_config().unwrap();
        assert_eq!(render, RenderConfig::default());
        assert_eq!(render.error_correction, ErrorCorrection::Low);
        assert_eq!(render.module_size, 10);
        assert_eq!(render.border, 4);
        assert_eq!(config.render.palette(), Palette::default());
    }

    #[test]
    fn test_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qrfixtures.toml");
        fs::write(
            &path,
            r##"
[output]
directory = "out/fixtures"
verify = true

[render]
error_correction = "h"
module_size = 6
foreground = "#102030"

[logging]
level = "debug"
rotation = "daily"
"##,
        )
        .unwrap();

        let config = FixtureConfig::from_file(&path).unwrap();
        assert_eq!(config.output.directory, PathBuf::from("out/fixtures"));
        assert!(config.output.verify);
        assert_eq!(config.render.error_correction, ErrorCorrection::High);
        assert_eq!(config.render.module_size, 6);
        assert_eq!(config.render.border, 4);
        assert_eq!(config.render.foreground, Color([0x10, 0x20, 0x30]));
        assert_eq!(config.render.background, Color::WHITE);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
    }

    #[test]
    fn test_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "render:\n  border: 2\n  background: navy\n").unwrap();

        let config = FixtureConfig::from_file(&path).unwrap();
        assert_eq!(config.render.border, 2);
        assert_eq!(config.render.background, Color([0, 0, 128]));
    }

    #[test]
    fn test_bad_color_and_extension_rejected() {
        let dir = TempDir::new().unwrap();
        let bad_color = dir.path().join("bad.toml");
        fs::write(&bad_color, "[render]\nforeground = \"ultraviolet\"\n").unwrap();
        assert!(matches!(
            FixtureConfig::from_file(&bad_color),
            Err(Error::Config(_))
        ));

        let ini = dir.path().join("config.ini");
        fs::write(&ini, "").unwrap();
        assert!(matches!(FixtureConfig::from_file(&ini), Err(Error::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("QRFIXTURES_OUTPUT_DIR", "/tmp/qr"),
            ("QRFIXTURES_VERIFY", "on"),
            ("QRFIXTURES_ERROR_CORRECTION", "medium"),
            ("QRFIXTURES_MODULE_SIZE", "not-a-number"),
            ("QRFIXTURES_BACKGROUND", "#eee"),
            ("QRFIXTURES_LOG_COLOR", "false"),
            ("QRFIXTURES_LOG_ROTATION", "hourly"),
        ]);

        let mut config = FixtureConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.output.directory, PathBuf::from("/tmp/qr"));
        assert!(config.output.verify);
        assert_eq!(config.render.error_correction, ErrorCorrection::Medium);
        assert_eq!(config.render.module_size, 10);
        assert_eq!(config.render.background, Color([0xee, 0xee, 0xee]));
        assert!(!config.logging.color);
        assert_eq!(config.logging.rotation, Some(LogRotation::Hourly));
    }

    #[test]
    fn test_invalid_render_options() {
        let options = RenderOptions {
            module_size: 0,
            ..RenderOptions::default()
        };
        assert!(matches!(options.render_config(), Err(Error::Config(_))));
    }
}
