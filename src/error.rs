//! Error types for card generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using cardgen's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cardgen operations
#[derive(Error, Debug)]
pub enum Error {
    /// Background template or font could not be opened or parsed
    #[error("Failed to load resource {path}: {reason}")]
    ResourceLoad {
        /// Path of the resource that failed to load
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Output directory could not be created
    #[error("Failed to create output directory {path}: {reason}")]
    DirectoryCreation {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Output directory for this run already exists (two runs in the same second)
    #[error("Output directory already exists: {0}")]
    DirectoryExists(PathBuf),

    /// Payload does not fit the largest QR version at the configured EC level
    #[error("Payload of {len} bytes does not fit in a QR code at EC level {level}")]
    PayloadTooLarge {
        /// Payload length in bytes
        len: usize,
        /// Error-correction level name
        level: String,
    },

    /// Caller passed an argument outside the accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Card image could not be written
    #[error("Failed to write card {path}: {reason}")]
    CardWrite {
        /// Destination file
        path: PathBuf,
        /// Underlying cause
        reason: String,
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
