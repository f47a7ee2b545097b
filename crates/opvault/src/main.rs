// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! opvault - operator CLI for the 1Password vault resource.
//!
//! Checks provider configuration, prints the resource schema, and inspects
//! a live vault through the same handlers the orchestrator uses.

mod show;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use opvault_config::{ConfigError, OpvaultConfig};
use opvault_core::CancellationToken;
use opvault_core::framework::{MetadataRequest, MetadataResponse, Resource};
use opvault_resource::new_vault_resource;

/// opvault - operator CLI for the 1Password vault resource.
#[derive(Parser, Debug)]
#[command(name = "opvault", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and validate configuration, then print the effective settings.
    Check,
    /// Print the vault resource schema as JSON.
    Schema,
    /// Import a vault by UUID (or `vaults/<uuid>`) and print its state.
    Show {
        /// Vault UUID or composite id.
        id: String,
    },
}

fn load(path: Option<&PathBuf>) -> Result<OpvaultConfig, Vec<ConfigError>> {
    match path {
        Some(path) => opvault_config::load_and_validate_path(path),
        None => opvault_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            opvault_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.provider.log_level);

    match cli.command {
        Some(Commands::Check) => check(&config),
        Some(Commands::Schema) => schema(&config),
        Some(Commands::Show { id }) => run_show(&config, &id).await,
        None => {
            println!("opvault: use --help for available commands");
            ExitCode::SUCCESS
        }
    }
}

fn check(config: &OpvaultConfig) -> ExitCode {
    let mut redacted = config.clone();
    if redacted.connect.token.is_some() {
        redacted.connect.token = Some("[REDACTED]".to_string());
    }

    match toml::to_string_pretty(&redacted) {
        Ok(rendered) => {
            eprintln!("opvault: config OK");
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("opvault: failed to render config: {e}");
            ExitCode::FAILURE
        }
    }
}

fn schema(config: &OpvaultConfig) -> ExitCode {
    let resource = new_vault_resource();
    let mut metadata = MetadataResponse::default();
    resource.metadata(
        &MetadataRequest {
            provider_type_name: config.provider.type_name.clone(),
        },
        &mut metadata,
    );

    let document = serde_json::json!({
        "type_name": metadata.type_name,
        "schema": resource.schema(),
    });
    match serde_json::to_string_pretty(&document) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("opvault: failed to render schema: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_show(config: &OpvaultConfig, id: &str) -> ExitCode {
    let ctx = CancellationToken::new();
    let on_interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    match show::run_show(config, id, &ctx).await {
        Ok(state) => match serde_json::to_string_pretty(&state) {
            Ok(rendered) => {
                println!("{rendered}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("opvault: failed to render state: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("opvault: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("opvault={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
