//! # Theme Manifest CLI
//!
//! This is the binary entry point for the `theme-manifest` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Executing the appropriate command based on the parsed arguments.
//!
//! The manifest logic lives in the `theme_manifest` library crate; the binary
//! is a thin wrapper that reports on it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
