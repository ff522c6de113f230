//! Runboard CLI - Main Entry Point
//!
//! Parses a Playwright JSON report and publishes the run to a Notion
//! database, optionally prefixed with an AI summary of the failures.

use clap::{Parser, Subcommand};

use runboard_cli::commands::{publish, summary};
use runboard_cli::output::{self, print_error};

/// Runboard - Playwright run reports for Notion
#[derive(Parser)]
#[command(name = "runboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a run to the Notion Test Runs database
    Publish(publish::PublishArgs),

    /// Print a run summary locally
    Summary(summary::SummaryArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Publish(args) => publish::execute(args, cli.format).await,
        Commands::Summary(args) => summary::execute(args, cli.format),
        Commands::Version => {
            println!("Runboard CLI v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
