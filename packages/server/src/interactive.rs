//! Interactive mode for the server.
//!
//! Prompts for the bind address, port, and source before starting the
//! server. Environment settings are offered as defaults.

use dialoguer::{Confirm, Input, Select};
use temple_map_source::registry::all_sources;

use crate::config::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// # Errors
///
/// Returns an `std::io::Result` error if a prompt fails or the server
/// fails to start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Temple Map Server");
    println!();

    let mut config = ServerConfig::from_env();

    config.bind_addr = Input::new()
        .with_prompt("Bind address")
        .default(config.bind_addr)
        .interact_text()
        .map_err(std::io::Error::other)?;

    config.port = Input::new()
        .with_prompt("Port")
        .default(config.port)
        .interact_text()
        .map_err(std::io::Error::other)?;

    let sources = all_sources();
    let labels: Vec<String> = sources
        .iter()
        .map(|s| format!("{} - {}", s.id, s.name))
        .collect();
    let default = sources
        .iter()
        .position(|s| s.id == config.ingest.source_id)
        .unwrap_or(0);
    let selected = Select::new()
        .with_prompt("Source")
        .items(&labels)
        .default(default)
        .interact()
        .map_err(std::io::Error::other)?;
    config.ingest.source_id.clone_from(&sources[selected].id);

    if !Confirm::new()
        .with_prompt(format!(
            "Start server on {}:{}?",
            config.bind_addr, config.port
        ))
        .default(true)
        .interact()
        .map_err(std::io::Error::other)?
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}
