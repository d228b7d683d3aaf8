//! CLI argument parsing, logging setup and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use theme_manifest::defaults::MANIFEST_DIR_ENV;
use theme_manifest::manifest::Manifest;
use theme_manifest::options::ManifestOptions;

use crate::commands;

/// Theme Manifest - Merge template manifests and inspect template groups
#[derive(Parser, Debug)]
#[command(name = "theme-manifest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Directory holding basekit.json and template.*.json manifests
    #[arg(
        short = 'd',
        long,
        global = true,
        value_name = "DIR",
        env = MANIFEST_DIR_ENV,
        default_value = "."
    )]
    manifest_dir: PathBuf,

    /// Report group reference cycles and unknown group references as errors
    #[arg(long, global = true)]
    strict: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count the visible templates in every group
    Count(commands::count::CountArgs),

    /// Merge the manifests and report whether they are consistent
    Validate(commands::validate::ValidateArgs),

    /// Print the merged manifest
    Show(commands::show::ShowArgs),

    /// Display how groups reference each other before flattening
    Tree(commands::tree::TreeArgs),

    /// Merge a release branch up into the following release branches
    UpstreamMerge(commands::upstream_merge::UpstreamMergeArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let options = if self.strict {
            ManifestOptions::strict()
        } else {
            ManifestOptions::default()
        };
        let manifest = || Manifest::with_options(&self.manifest_dir, options.clone());

        match self.command {
            Commands::Count(args) => commands::count::execute(args, &manifest()),
            Commands::Validate(args) => {
                commands::validate::execute(args, &manifest(), &self.color)
            }
            Commands::Show(args) => commands::show::execute(args, &manifest()),
            Commands::Tree(args) => commands::tree::execute(args, &self.manifest_dir, &options),
            Commands::UpstreamMerge(args) => {
                commands::upstream_merge::execute(args, &self.manifest_dir)
            }
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Initialise `env_logger` at `level` unless `RUST_LOG` says otherwise.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running inside tests
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
