//! rps_server - Unified CLI
//!
//! Runs the game server or talks to one.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use rps_server::{Cli, Command, GameClient, PublicGame, ServerConfig};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, port, host } => run_server(config, host, port).await,
        Command::Create { name, server_url } => {
            init_tracing("warn");
            print_game(&GameClient::new(server_url).create_game(&name).await?)
        }
        Command::Join {
            id,
            name,
            server_url,
        } => {
            init_tracing("warn");
            print_game(&GameClient::new(server_url).join_game(&id, &name).await?)
        }
        Command::Move {
            id,
            name,
            choice,
            server_url,
        } => {
            init_tracing("warn");
            print_game(&GameClient::new(server_url).make_move(&id, &name, choice).await?)
        }
        Command::Show { id, server_url } => {
            init_tracing("warn");
            print_game(&GameClient::new(server_url).get_game(&id).await?)
        }
    }
}

/// `RUST_LOG` wins over the configured fallback filter.
fn init_tracing(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

/// Run the HTTP game server
#[instrument(skip_all)]
async fn run_server(
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let base = match config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    let config = base.with_env()?.with_overrides(host, port);

    init_tracing(config.log_filter());
    info!(addr = %config.bind_address(), "Starting rock-paper-scissors server");

    rps_server::run(&config).await
}

fn print_game(game: &PublicGame) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(game)?);
    Ok(())
}
