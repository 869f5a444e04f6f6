//! BW CLI - Blockwork page renderer.
//!
//! Provides commands for:
//! - `render`: Assemble an authored page and write the decorated HTML
//! - `theme-candidates`: Show (and optionally probe) the theme cascade for a path

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, ThemeCandidatesArgs};
use output::{Status, Tone};

/// BW - Blockwork page renderer.
#[derive(Parser)]
#[command(name = "bw", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a page and write the decorated HTML.
    Render(RenderArgs),
    /// Print the theme lookup cascade for a page path.
    ThemeCandidates(ThemeCandidatesArgs),
}

fn main() {
    let cli = Cli::parse();
    let status = Status::stderr();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::ThemeCandidates(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Page assembly is single-threaded; blocking I/O goes to the blocking pool.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");
    let result = match cli.command {
        Commands::Render(args) => rt.block_on(args.execute()),
        Commands::ThemeCandidates(args) => rt.block_on(args.execute()),
    };

    if let Err(err) = result {
        status.line(Tone::Fail, &format!("Error: {err}"));
        std::process::exit(1);
    }
}
