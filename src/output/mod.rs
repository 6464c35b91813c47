//! Per-run output directory and card files

use crate::card::CardImage;
use crate::error::{Error, Result};
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Image format of written cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless tag-based format, the print shop default
    Tiff,
    /// Portable Network Graphics
    Png,
    /// Windows bitmap
    Bmp,
}

impl OutputFormat {
    /// File extension, upper-case like the format name
    pub fn extension(self) -> &'static str {
        match self {
            Self::Tiff => "TIFF",
            Self::Png => "PNG",
            Self::Bmp => "BMP",
        }
    }

    /// Encoder selector for the `image` crate
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Tiff => ImageFormat::Tiff,
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Seconds since the Unix epoch, used to name the run directory
pub fn unix_timestamp() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| Error::Config(format!("System clock is before the Unix epoch: {e}")))
}

/// Name of the run directory for a given start time
pub fn run_dir_name(timestamp: u64) -> String {
    format!("cards_{timestamp}")
}

/// Writes the cards of one run into `cards_<timestamp>`
#[derive(Debug)]
pub struct OutputWriter {
    dir: PathBuf,
    format: OutputFormat,
}

impl OutputWriter {
    /// Create `<root>/cards_<timestamp>`.
    ///
    /// `root` and its parents are created as needed. The run directory itself
    /// must not exist yet: two runs starting in the same second collide and
    /// the second one fails with [`Error::DirectoryExists`].
    pub fn create(root: &Path, timestamp: u64, format: OutputFormat) -> Result<Self> {
        fs::create_dir_all(root).map_err(|e| Error::DirectoryCreation {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;

        let dir = root.join(run_dir_name(timestamp));
        match fs::create_dir(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::DirectoryExists(dir));
            }
            Err(e) => {
                return Err(Error::DirectoryCreation {
                    path: dir,
                    reason: e.to_string(),
                });
            }
        }

        tracing::info!(dir = %dir.display(), ?format, "Created output directory");
        Ok(Self { dir, format })
    }

    /// Run directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Destination path of the card for `name`
    pub fn card_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{}", self.format.extension()))
    }

    /// Persist one card as `<identifier>.<EXT>` and return its path.
    pub fn write(&self, card: &CardImage) -> Result<PathBuf> {
        let path = self.card_path(&card.identifier().to_string());
        card.to_dynamic()
            .save_with_format(&path, self.format.image_format())
            .map_err(|e| Error::CardWrite {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        Ok(path)
    }
}
