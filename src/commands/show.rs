//! # Show Command Implementation
//!
//! This module implements the `show` subcommand, which prints the merged and
//! flattened manifest, or one section of it, as JSON or YAML.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::Value;

use theme_manifest::manifest::{Manifest, MergedManifest};
use theme_manifest::suggestions;

/// Part of the merged manifest to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    All,
    Version,
    Templates,
    Groups,
    Categories,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

/// Print the merged manifest
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Section to print.
    #[arg(short, long, value_enum, default_value = "all")]
    pub section: Section,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: Format,
}

/// Execute the `show` command.
pub fn execute(args: ShowArgs, manifest: &Manifest) -> Result<()> {
    let merged = manifest.merged().map_err(suggestions::for_error)?;
    println!("{}", render(merged, args.section, args.format)?);
    Ok(())
}

fn render(merged: &MergedManifest, section: Section, format: Format) -> Result<String> {
    let value = match section {
        Section::All => serde_json::to_value(merged)?,
        Section::Version => merged.version.clone(),
        Section::Templates => Value::Object(merged.templates.clone()),
        Section::Groups => serde_json::to_value(&merged.groups)?,
        Section::Categories => Value::Object(merged.categories.clone()),
    };

    let text = match format {
        Format::Json => serde_json::to_string_pretty(&value)?,
        Format::Yaml => serde_yaml::to_string(&value)?,
    };
    Ok(text.trim_end().to_string())
}
