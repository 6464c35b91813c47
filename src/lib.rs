//! cardgen - batch generator for printable QR identity cards
//!
//! Each card is a copy of a background template carrying a random UUID as a
//! QR code, with the same identifier printed as a text label. Cards of one
//! run land in `output/cards_<unix-seconds>/<uuid>.TIFF`.
//!
//! # Example
//!
//! ```no_run
//! use cardgen::{CardConfig, CardRun};
//!
//! fn main() -> cardgen::Result<()> {
//!     let mut config = CardConfig::default();
//!     config.count = 3;
//!
//!     let report = CardRun::new(config).execute(&mut std::io::stdout())?;
//!     println!("{} cards in {}", report.cards.len(), report.dir.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod card;
pub mod config;
pub mod error;
pub mod ids;
pub mod logging;
pub mod output;
pub mod qr;
pub mod run;

// Re-exports for convenience
pub use error::{Error, Result};

pub use card::{CardCompositor, CardImage, Label, Placement, Template, TextOptions};
pub use config::{CardConfig, LogRotation, LoggingOptions};
pub use ids::Identifier;
pub use output::{OutputFormat, OutputWriter};
pub use qr::{EcLevel, QrDecoder, QrEncoder, QrOptions};
pub use run::{CardRun, RunReport, RunState};
