//! RouteClaw CLI: the main entry point.
//!
//! Commands:
//! - `agent`: interactive chat or single-message mode
//! - `route`: show the routing decision for a message
//! - `retrieve`: show the context retrieved for a query
//! - `onboard`: write the default config file
//! - `doctor`: diagnose config, corpus and provider

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod runtime;

#[derive(Parser)]
#[command(
    name = "routeclaw",
    about = "RouteClaw — route each question to a tool, retrieval, or a direct answer",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of ~/.routeclaw/config.toml
    #[arg(short, long, global = true, env = "ROUTECLAW_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the routing agent
    Agent {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Show which route the model picks for a message
    Route {
        /// The message to route
        text: String,
    },

    /// Show the context retrieved for a query
    Retrieve {
        /// The search query
        query: String,

        /// Number of passages to return
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Initialize configuration
    Onboard,

    /// Diagnose system health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Agent { message } => commands::agent::run(config_path, message).await?,
        Commands::Route { text } => commands::route::run(config_path, &text).await?,
        Commands::Retrieve { query, k } => commands::retrieve::run(config_path, &query, k).await?,
        Commands::Onboard => commands::onboard::run(config_path).await?,
        Commands::Doctor => commands::doctor::run(config_path).await?,
    }

    Ok(())
}
