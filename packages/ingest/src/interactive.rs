//! Interactive TUI for the ingestion tool.
//!
//! Provides a menu-driven interface using `dialoguer` for loading a
//! source without memorizing CLI flags.

use std::path::PathBuf;

use dialoguer::{Input, Select};
use temple_map_cli_utils::{IndicatifProgress, MultiProgress};
use temple_map_directory::{LocationSummary, unique_states};
use temple_map_source::registry::all_sources;

use crate::config::IngestConfig;

/// Top-level actions available in the ingest interactive menu.
enum IngestAction {
    LoadSource,
    ListSources,
}

impl IngestAction {
    const ALL: &[Self] = &[Self::LoadSource, Self::ListSources];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::LoadSource => "Load and geocode a source",
            Self::ListSources => "List sources",
        }
    }
}

/// Runs the interactive menu, prompting for an action and its settings.
///
/// # Errors
///
/// Returns an error if a prompt fails or the pipeline cannot be built.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = IngestAction::ALL.iter().map(IngestAction::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match IngestAction::ALL[idx] {
        IngestAction::LoadSource => load_source(multi).await?,
        IngestAction::ListSources => list_sources(),
    }

    Ok(())
}

/// Prompts for a source and output path, then runs the pipeline.
async fn load_source(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let env_config = IngestConfig::from_env();
    let sources = all_sources();

    let labels: Vec<String> = sources
        .iter()
        .map(|s| format!("{} - {}", s.id, s.name))
        .collect();
    let default = sources
        .iter()
        .position(|s| s.id == env_config.source_id)
        .unwrap_or(0);

    let selected = Select::new()
        .with_prompt("Source")
        .items(&labels)
        .default(default)
        .interact()?;

    let output: String = Input::new()
        .with_prompt("Output file (empty for stdout)")
        .allow_empty(true)
        .interact_text()?;

    let config = IngestConfig {
        source_id: sources[selected].id.clone(),
        ..env_config
    };

    let progress = IndicatifProgress::geocode_bar(multi, "Geocoding temples");
    let outcome = config.load(&progress).await?;

    log::info!(
        "{} across {} states",
        LocationSummary::new(&outcome.temples, outcome.temples.len()),
        unique_states(&outcome.temples).len()
    );

    let output = output.trim();
    let path = (!output.is_empty()).then(|| PathBuf::from(output));
    crate::write_json(&outcome.temples, path.as_deref())
}

/// Prints a table of all configured sources.
fn list_sources() {
    println!("{:<28} NAME", "ID");
    println!("{}", "-".repeat(60));
    for source in &all_sources() {
        println!("{:<28} {}", source.id, source.name);
    }
}
