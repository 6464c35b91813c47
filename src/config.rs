//! Card generation configuration
//!
//! Every tunable of a run lives in [`CardConfig`]. Its `Default` impl carries
//! the reference card layout, so running without a configuration file
//! reproduces the stock batch: ten TIFF cards, QR at EC level Q with
//! 8-pixel modules and no border, 107 px below the template center.

use crate::card::{Placement, TextOptions};
use crate::error::{Error, Result};
use crate::output::OutputFormat;
use crate::qr::QrOptions;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Number of cards to generate
    pub count: i64,
    /// Directory under which the per-run `cards_<timestamp>` directory is created
    pub output_root: PathBuf,
    /// Image format of the written cards
    pub format: OutputFormat,
    /// Background template image
    pub background: PathBuf,
    /// QR symbol settings
    pub qr: QrOptions,
    /// Identifier label settings
    pub text: TextOptions,
    /// Pixel offsets for the QR code and the label
    pub placement: Placement,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            count: 10,
            output_root: PathBuf::from("output"),
            format: OutputFormat::Tiff,
            background: PathBuf::from("input/bg/recto.tif"),
            qr: QrOptions::default(),
            text: TextOptions::default(),
            placement: Placement::default(),
            logging: LoggingOptions::default(),
        }
    }
}

impl CardConfig {
    /// Load configuration from an explicit path, or use the built-in defaults.
    ///
    /// No file is searched for implicitly.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.logging.apply_env_overrides();
        config.validate()?;
        Ok(config)
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

    /// Reject values no run could succeed with.
    ///
    /// A negative `count` is left to the identifier generator, which reports
    /// it as an invalid argument.
    pub fn validate(&self) -> Result<()> {
        if self.qr.module_size == 0 {
            return Err(Error::Config("qr.module_size must be at least 1".to_string()));
        }
        if self.background.as_os_str().is_empty() {
            return Err(Error::Config("background path is empty".to_string()));
        }
        if self.output_root.as_os_str().is_empty() {
            return Err(Error::Config("output_root path is empty".to_string()));
        }
        if self.text.enabled {
            if self.text.font.as_os_str().is_empty() {
                return Err(Error::Config("text.font path is empty".to_string()));
            }
            if !self.text.size.is_finite() || self.text.size <= 0.0 {
                return Err(Error::Config(format!(
                    "text.size must be positive, got {}",
                    self.text.size
                )));
            }
        }
        Ok(())
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `CARDGEN_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
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
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("CARDGEN_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("CARDGEN_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("CARDGEN_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("CARDGEN_LOG_ROTATION") {
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
