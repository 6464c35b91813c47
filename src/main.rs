//! cardgen entrypoint

use cardgen::{CardConfig, CardRun, Result, logging};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "cardgen",
    version,
    about = "Generate printable QR identity cards on a background template"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Without it the built-in layout is used.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of cards to generate
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    count: Option<i64>,

    /// Directory in which the cards_<timestamp> directory is created
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Background template image
    #[arg(long, value_name = "PATH")]
    background: Option<PathBuf>,

    /// Do not print the identifier on the cards
    #[arg(long)]
    no_text: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CardConfig::load(cli.config.as_deref())?;

    if let Some(count) = cli.count {
        config.count = count;
    }
    if let Some(output) = cli.output {
        config.output_root = output;
    }
    if let Some(background) = cli.background {
        config.background = background;
    }
    if cli.no_text {
        config.text.enabled = false;
    }

    logging::init(&config.logging)?;
    if let Some(path) = &cli.config {
        info!("Using configuration file: {}", path.display());
    }
    info!(count = config.count, format = ?config.format, "Starting card generation");

    let stdout = io::stdout();
    let mut progress = stdout.lock();
    CardRun::new(config).execute(&mut progress)?;

    Ok(())
}
