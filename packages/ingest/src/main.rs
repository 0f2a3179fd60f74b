#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the temple directory ingestion tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use temple_map_cli_utils::{IndicatifProgress, init_logger};
use temple_map_directory::{LocationSummary, filter_temples};
use temple_map_ingest::config::{DATA_DIR_ENV, IngestConfig, RATE_LIMIT_ENV, SOURCE_ENV};
use temple_map_ingest::{IngestOutcome, write_json};
use temple_map_source::registry::all_sources;
use temple_map_temple_models::Temple;

#[derive(Parser)]
#[command(name = "temple_map_ingest", about = "Temple directory ingestion tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a source, geocode temples without coordinates, and write the
    /// resulting directory as JSON
    Load {
        /// Source identifier (e.g., "`temples_json`")
        #[arg(long, env = SOURCE_ENV)]
        source: Option<String>,
        /// Base directory for file-backed sources
        #[arg(long, env = DATA_DIR_ENV)]
        data_dir: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Minimum milliseconds between geocoding requests
        #[arg(long, env = RATE_LIMIT_ENV)]
        rate_limit_ms: Option<u64>,
    },
    /// List all configured temple sources
    Sources,
    /// Filter a previously written directory file
    Search {
        /// Directory JSON written by `load`
        #[arg(long)]
        input: PathBuf,
        /// Case-insensitive text matched against name and address
        #[arg(long, default_value = "")]
        query: String,
        /// Exact state name ("all" for any)
        #[arg(long, default_value = "")]
        state: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return temple_map_ingest::interactive::run(&multi).await;
    };

    match command {
        Commands::Sources => {
            println!("{:<28} {:<16} NAME", "ID", "KIND");
            println!("{}", "-".repeat(72));
            for source in &all_sources() {
                println!(
                    "{:<28} {:<16} {}",
                    source.id,
                    source.kind.to_string(),
                    source.name
                );
            }
        }
        Commands::Load {
            source,
            data_dir,
            output,
            rate_limit_ms,
        } => {
            let defaults = IngestConfig::default();
            let config = IngestConfig {
                source_id: source.unwrap_or(defaults.source_id),
                data_dir: data_dir.unwrap_or(defaults.data_dir),
                rate_limit_ms,
            };

            let progress = IndicatifProgress::geocode_bar(&multi, "Geocoding temples");
            let outcome: IngestOutcome = config.load(&progress).await?;
            if let Some(error) = &outcome.error {
                log::warn!("Wrote built-in sample data because the source failed: {error}");
            }
            write_json(&outcome.temples, output.as_deref())?;
        }
        Commands::Search {
            input,
            query,
            state,
        } => {
            let body = std::fs::read_to_string(&input)?;
            let temples: Vec<Temple> = serde_json::from_str(&body)?;
            let found = filter_temples(&temples, &query, &state);
            log::info!("{}", LocationSummary::new(&found, temples.len()));
            write_json(&found, None)?;
        }
    }

    Ok(())
}
