//! # cdesk CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;

use clap::Parser;

/// Compliance Desk CLI — requirement tracking for compliance documents.
///
/// Inspects per-slot upload state, uploads and associates evidence files,
/// and checks booking eligibility against a JSON registry snapshot.
#[derive(Parser, Debug)]
#[command(name = "cdesk", version, about)]
struct Cli {
    /// Path to the registry snapshot file.
    #[arg(long, global = true, default_value = "cdesk-registry.json")]
    registry: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Per-slot upload state and the aggregate compliance signal.
    Status(cdesk_cli::status::StatusArgs),
    /// Upload files, associate them with requirement slots, and commit.
    Upload(cdesk_cli::upload::UploadArgs),
    /// Check booking eligibility.
    Book(cdesk_cli::book::BookArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status(args) => cdesk_cli::status::run(&args, &cli.registry),
        Commands::Upload(args) => cdesk_cli::upload::run(&args, &cli.registry),
        Commands::Book(args) => cdesk_cli::book::run(&args, &cli.registry),
    }
}
