//! Command-line interface for rps_server.

use clap::{Parser, Subcommand};
use rps_core::Move;

/// Default server URL for client commands.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Rock-paper-scissors game server and client
#[derive(Parser, Debug)]
#[command(name = "rps_server")]
#[command(about = "Rock-paper-scissors over a JSON REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Create a game and print it
    Create {
        /// Your player name
        #[arg(short, long)]
        name: String,

        /// Game server URL
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,
    },

    /// Join an existing game
    Join {
        /// Game id
        id: String,

        /// Your player name
        #[arg(short, long)]
        name: String,

        /// Game server URL
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,
    },

    /// Make a move (rock, paper or scissors)
    Move {
        /// Game id
        id: String,

        /// Your player name
        #[arg(short, long)]
        name: String,

        /// The move to play
        #[arg(short = 'm', long = "move")]
        choice: Move,

        /// Game server URL
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,
    },

    /// Show a game
    Show {
        /// Game id
        id: String,

        /// Game server URL
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,
    },
}
