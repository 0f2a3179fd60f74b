#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive CLI orchestrator for the temple map toolchain.
//!
//! Provides a single entry point that lets users pick between loading the
//! directory and starting the server, then guides them through the
//! settings for each.
//!
//! Uses `indicatif-log-bridge` (via [`temple_map_cli_utils::init_logger`])
//! so log lines and the geocoding progress bar share the terminal.

use dialoguer::Select;

/// Top-level tool selection for the temple map toolchain.
enum Tool {
    Ingest,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[Self::Ingest, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Ingest => "Load temple directory",
            Self::Server => "Start server",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = temple_map_cli_utils::init_logger();

    println!("Temple Map Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Ingest => temple_map_ingest::interactive::run(&multi).await?,
        Tool::Server => {
            // actix-web runs its own runtime; keep it off the tokio workers.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(temple_map_server::interactive::run())
            })
            .await??;
        }
    }

    Ok(())
}
