//! One generation run: identifiers → QR → card → file
//!
//! A run moves `Initializing` → `Processing` → `Completed`. Any error moves
//! it to `Failed` and is returned to the caller; nothing is retried and the
//! remaining cards are abandoned.

use crate::card::{CardCompositor, Label, Template};
use crate::config::CardConfig;
use crate::error::Result;
use crate::ids;
use crate::output::{self, OutputWriter};
use crate::qr::QrEncoder;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Loading resources and creating the output directory
    Initializing,
    /// Producing cards, strictly one after another
    Processing,
    /// Every card was written
    Completed,
    /// An error aborted the run
    Failed,
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Directory holding the cards
    pub dir: PathBuf,
    /// Written card files, in generation order
    pub cards: Vec<PathBuf>,
}

/// Drives a single batch of cards
pub struct CardRun {
    config: CardConfig,
    state: RunState,
}

impl CardRun {
    /// Prepare a run; nothing touches the filesystem until [`CardRun::execute`].
    pub fn new(config: CardConfig) -> Self {
        Self {
            config,
            state: RunState::Initializing,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run with the directory named after the current time.
    pub fn execute(&mut self, progress: &mut impl Write) -> Result<RunReport> {
        let timestamp = output::unix_timestamp()?;
        self.execute_at(timestamp, progress)
    }

    /// Run with an explicit start timestamp (seconds since the epoch).
    ///
    /// One progress line per written card goes to `progress`.
    pub fn execute_at(&mut self, timestamp: u64, progress: &mut impl Write) -> Result<RunReport> {
        self.state = RunState::Initializing;
        let result = self.process(timestamp, progress);
        self.state = match &result {
            Ok(report) => {
                info!(dir = %report.dir.display(), cards = report.cards.len(), "Run completed");
                RunState::Completed
            }
            Err(err) => {
                warn!("Run failed: {err}");
                RunState::Failed
            }
        };
        result
    }

    fn process(&mut self, timestamp: u64, progress: &mut impl Write) -> Result<RunReport> {
        let config = &self.config;
        config.validate()?;

        let identifiers = ids::generate(config.count)?;

        // Resources first, so a bad path leaves no empty run directory behind.
        let template = Template::open(&config.background)?;
        let label = if config.text.enabled {
            Some(Label::load(&config.text)?)
        } else {
            None
        };
        let compositor = CardCompositor::new(template, config.placement.clone(), label);
        let encoder = QrEncoder::new(config.qr.clone());
        let writer = OutputWriter::create(&config.output_root, timestamp, config.format)?;

        self.state = RunState::Processing;
        info!(count = identifiers.len(), dir = %writer.dir().display(), "Generating cards");

        let mut cards = Vec::with_capacity(identifiers.len());
        for (index, identifier) in identifiers.iter().enumerate() {
            let qr = encoder.encode(&identifier.to_string())?;
            debug!(%identifier, width = qr.width(), height = qr.height(), "Encoded QR");

            let card = compositor.compose(&qr, identifier);
            let path = writer.write(&card)?;

            writeln!(progress, "{index} - The card {} has been created", path.display())?;
            cards.push(path);
        }

        Ok(RunReport {
            dir: writer.dir().to_path_buf(),
            cards,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::{Rgb, RgbImage};
    use std::path::Path;

    fn config_in(dir: &Path) -> CardConfig {
        let background = dir.join("bg.png");
        RgbImage::from_pixel(400, 400, Rgb([255, 255, 255]))
            .save(&background)
            .unwrap();

        let mut config = CardConfig::default();
        config.background = background;
        config.output_root = dir.join("output");
        config.text.enabled = false;
        config.count = 3;
        config
    }

    #[test]
    fn test_new_run_is_initializing() {
        let run = CardRun::new(CardConfig::default());
        assert_eq!(run.state(), RunState::Initializing);
    }

    #[test]
    fn test_successful_run_completes() {
        let dir = tempfile::tempdir().unwrap();
        let mut run = CardRun::new(config_in(dir.path()));
        let mut progress = Vec::new();

        let report = run.execute_at(123, &mut progress).unwrap();

        assert_eq!(run.state(), RunState::Completed);
        assert_eq!(report.dir, dir.path().join("output").join("cards_123"));
        assert_eq!(report.cards.len(), 3);
        let lines: Vec<String> = String::from_utf8(progress)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("0 - The card "));
        assert!(lines[2].ends_with(" has been created"));
    }

    #[test]
    fn test_missing_background_fails_before_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.background = dir.path().join("missing.tif");
        let mut run = CardRun::new(config);

        let err = run.execute_at(5, &mut Vec::new()).unwrap_err();

        assert!(matches!(err, Error::ResourceLoad { .. }));
        assert_eq!(run.state(), RunState::Failed);
        assert!(!dir.path().join("output").join("cards_5").exists());
    }

    #[test]
    fn test_missing_font_fails_before_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.text.enabled = true;
        config.text.font = dir.path().join("missing.ttf");
        let mut run = CardRun::new(config);

        let err = run.execute_at(5, &mut Vec::new()).unwrap_err();

        assert!(matches!(err, Error::ResourceLoad { .. }));
        assert!(!dir.path().join("output").join("cards_5").exists());
    }

    #[test]
    fn test_negative_count_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.count = -2;
        let mut run = CardRun::new(config);

        let err = run.execute_at(5, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(run.state(), RunState::Failed);
    }

    #[test]
    fn test_zero_count_creates_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.count = 0;
        let mut progress = Vec::new();

        let report = CardRun::new(config).execute_at(9, &mut progress).unwrap();

        assert!(report.cards.is_empty());
        assert!(progress.is_empty());
        assert!(report.dir.is_dir());
    }
}
