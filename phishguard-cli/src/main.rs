//! PhishGuard CLI — runs the data ingestion pipeline once and prints the
//! resulting artifact as JSON.

use anyhow::Context;
use clap::Parser;
use phishguard_ml::{MongoSource, RunConfig, SourceLocation, run_ingestion};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// PhishGuard: phishing detection ML pipeline
#[derive(Parser, Debug)]
#[command(name = "phishguard", version, about, long_about = None)]
struct Cli {
    /// Base directory for run artifacts
    #[arg(short, long, default_value = "artifacts")]
    artifact_dir: PathBuf,

    /// Document store database holding the raw records
    #[arg(long, default_value = "PhishGuardDB")]
    database: String,

    /// Collection within the database
    #[arg(long, default_value = "phishing_urls")]
    collection: String,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    // The one place the process environment is consulted; the library only
    // ever sees the injected URI.
    let uri = std::env::var("MONGODB_URI").unwrap_or_default();
    let source = MongoSource::new(uri, SourceLocation::new(&cli.database, &cli.collection))?;

    let config = RunConfig::for_run(&cli.artifact_dir);
    config.ensure_dirs()?;
    tracing::info!(run = %config.timestamp, "initiating data ingestion");

    let artifact = run_ingestion(config, source).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&artifact).context("failed to render artifact")?
    );
    Ok(())
}
