//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which merges the
//! manifests of a directory and reports whether they form a consistent
//! catalog.
//!
//! ## Functionality
//!
//! - **Merge Validation**: Runs the full load, merge and dereference pipeline
//!   and reports the first structural error (duplicate keys or group names,
//!   missing sections, runaway group nesting).
//! - **Catalog Summary**: Prints the version and the number of manifests,
//!   templates, groups and locales.
//! - **Dangling References**: Warns about group entries naming templates
//!   that no manifest defines, and about groups that end up empty.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use theme_manifest::loader::discover_manifest_files;
use theme_manifest::manifest::{Manifest, MergedManifest};
use theme_manifest::output::{emoji, status, OutputConfig};
use theme_manifest::suggestions;

/// Merge the manifests and report whether they are consistent
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Fail when warnings are found, not only on errors.
    #[arg(long)]
    pub deny_warnings: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `manifest` - Lazily loaded manifest for the selected directory
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, manifest: &Manifest, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    println!(
        "{} Validating manifests in: {}",
        emoji(&out, "🔍", "[SCAN]"),
        manifest.path().display()
    );

    let merged = match manifest.merged() {
        Ok(merged) => {
            println!("{} Manifests merged successfully", status(&out, true));
            merged
        }
        Err(e) => {
            println!("{} Manifest merge failed: {}", status(&out, false), e);
            return Err(suggestions::for_error(e));
        }
    };

    let files = discover_manifest_files(manifest.path(), manifest.options())
        .map_err(suggestions::for_error)?;

    println!("\n{} Catalog Summary:", emoji(&out, "📊", "[INFO]"));
    println!("   Version: {}", merged.version);
    println!("   Manifest files: {}", files.len());
    println!("   Templates: {}", merged.templates.len());
    println!("   Groups: {}", merged.groups.len());
    println!("   Locales: {}", merged.categories.len());

    let warnings = collect_warnings(merged);
    for warning in &warnings {
        println!("{} {}", emoji(&out, "⚠️", "[WARN]"), warning);
    }

    println!("\n{} Validation Result:", emoji(&out, "🎯", "[RESULT]"));
    if warnings.is_empty() {
        println!("{} Manifests are valid", status(&out, true));
        return Ok(());
    }

    if args.deny_warnings {
        println!(
            "{} Manifests have {} warning(s) (--deny-warnings enabled)",
            status(&out, false),
            warnings.len()
        );
        return Err(anyhow::anyhow!(
            "Manifest validation failed with {} warning(s)",
            warnings.len()
        ));
    }

    println!(
        "{} Manifests are valid but have {} warning(s)",
        emoji(&out, "⚠️", "[WARN]"),
        warnings.len()
    );
    Ok(())
}

/// Problems that do not stop the merge but are likely mistakes.
fn collect_warnings(merged: &MergedManifest) -> Vec<String> {
    let mut warnings = Vec::new();
    for group in &merged.groups {
        if group.templates.is_empty() {
            warnings.push(format!("Group {} contains no templates", group.name));
        }
        let mut seen = Vec::new();
        for key in &group.templates {
            if !merged.templates.contains_key(key) && !seen.contains(&key) {
                warnings.push(format!(
                    "Group {} lists undefined template {}",
                    group.name, key
                ));
                seen.push(key);
            }
        }
    }
    warnings
}
