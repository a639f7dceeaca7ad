use anyhow::{Context, Result};
use clap::Parser;
use logtop_cli::run::{self, Outcome};
use logtop_core::config::Config;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Parser)]
#[command(name = "logtop")]
#[command(version)]
#[command(
    about = "Aggregates nginx access-log request times into a ranked report of the slowest URLs",
    long_about = "Logtop locates the most recent rotated nginx access log in the configured \
                  directory, streams and parses its lines with tolerant error handling, and \
                  writes a top-N report of the URLs with the greatest total request time."
)]
struct Cli {
    /// Path to the JSON config document (built-in defaults when omitted)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing or malformed config document is fatal before anything runs
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    init_logging(&config, cli.verbose)?;

    match run::execute(&config) {
        Ok(Outcome::Written(path)) => {
            tracing::info!("Report ready: {}", path.display());
            Ok(())
        }
        // Nothing to analyze is an idle run, not a crash
        Ok(Outcome::NoLogFile) => Ok(()),
        Err(e) => {
            tracing::error!("Run failed: {e}");
            Err(e.into())
        }
    }
}

fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("logtop=debug,logtop_core=debug,logtop_cli=debug")
    } else {
        EnvFilter::new("info")
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &config.logging_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log destination {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.init(),
    }

    Ok(())
}
