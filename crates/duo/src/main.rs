//! duo - Pandoc filter for theme-aware TikZ diagrams.
//!
//! Reads a Pandoc JSON document, renders every embedded `tikzpicture`,
//! `circuitikz` or `picture` environment into a black and a white image, and
//! writes the document back with MyST theme-toggle blocks in their place.
//!
//! ```text
//! pandoc chapter.tex --filter duo -t markdown -o chapter.md
//! ```

mod error;
mod filter;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use filter::FilterArgs;
use output::Output;

/// duo - theme-aware TikZ diagrams for Pandoc.
#[derive(Parser)]
#[command(name = "duo", version, about)]
struct Cli {
    #[command(flatten)]
    filter: FilterArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG (errors only when unset).
    // Render failures are printed by the filter run, not logged.
    // Logs go to stderr: stdout carries the document back to pandoc.
    let filter = if cli.filter.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.filter.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
