use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod engine;
mod marker;
mod prompt;
mod snapshot;
mod templates;

use config::Network;
use engine::DockerEngine;

#[derive(Parser)]
#[command(name = "sandbox")]
#[command(author, version, about = "Manage a containerized Algorand node")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Skip seeding new environments from a chain snapshot
    #[arg(short = 's', long, global = true)]
    skip_snapshot: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Bring the sandbox up, bootstrapping a new environment if needed
    Up {
        /// Network to run: mainnet, testnet, or betanet
        network: Option<Network>,
    },

    /// Stop the sandbox container
    Down,

    /// Stop the sandbox, then bring it back up
    Restart,

    /// Remove the container, images, volume, and data directory
    Clean,

    /// Run smoke checks against the running sandbox
    Test,

    /// Open an interactive shell inside the sandbox
    Enter,

    /// Follow the node log
    Logs {
        /// Pass `raw` to tail the log file instead of the formatted stream
        #[arg(value_parser = ["raw"])]
        mode: Option<String>,
    },

    /// Show node sync status
    Status,

    /// Forward arguments to the in-container goal binary
    Goal {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Dry-run a transaction file against the node
    Dryrun {
        /// Transaction file to submit
        file: PathBuf,
    },

    /// Show the sandbox's endpoints, tokens, and example usage
    Introduction,

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("sandbox=debug")
    } else {
        EnvFilter::new("sandbox=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        std::process::exit(1);
    };

    let engine = DockerEngine::new();

    match command {
        Commands::Up { network } => {
            commands::up::run(&engine, network, cli.skip_snapshot).await?;
        }
        Commands::Down => {
            commands::down::run(&engine).await?;
        }
        Commands::Restart => {
            commands::restart::run(&engine, cli.skip_snapshot).await?;
        }
        Commands::Clean => {
            commands::clean::run(&engine).await?;
        }
        Commands::Test => {
            commands::test_cmd::run(&engine).await?;
        }
        Commands::Enter => {
            commands::enter::run(&engine).await?;
        }
        Commands::Logs { mode } => {
            commands::logs::run(&engine, mode.is_some()).await?;
        }
        Commands::Status => {
            commands::status::run(&engine).await?;
        }
        Commands::Goal { args } => {
            commands::goal::run(&engine, &args).await?;
        }
        Commands::Dryrun { file } => {
            commands::dryrun::run(&engine, &file).await?;
        }
        Commands::Introduction => {
            commands::introduction::run().await?;
        }
        Commands::Unknown(args) => {
            // Graceful degradation: unknown names re-show help, exit zero.
            let name = args.first().map(String::as_str).unwrap_or_default();
            eprintln!("Unrecognized command: {name}\n");
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
