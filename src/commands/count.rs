//! # Count Command Implementation
//!
//! This module implements the `count` subcommand, which prints how many
//! templates every merged group contains.
//!
//! Each line reads `<group> => <visible>`. When a group contains hidden
//! templates the total follows as `(including hidden = <total>)`. Groups are
//! counted after flattening, so a group that references another group counts
//! the referenced templates too.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use theme_manifest::manifest::{Group, Manifest, MergedManifest};
use theme_manifest::suggestions;

/// Count the visible templates in every group
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Only count these groups.
    #[arg(value_name = "GROUP")]
    pub groups: Vec<String>,
}

/// Execute the `count` command.
pub fn execute(args: CountArgs, manifest: &Manifest) -> Result<()> {
    let merged = manifest.merged().map_err(suggestions::for_error)?;

    for line in count_lines(merged, &args.groups)? {
        println!("{}", line);
    }
    Ok(())
}

/// Build the report lines, in group order.
fn count_lines(merged: &MergedManifest, only: &[String]) -> Result<Vec<String>> {
    if let Some(unknown) = only.iter().find(|name| merged.group(name).is_none()) {
        let known: Vec<&str> = merged.groups.iter().map(|g| g.name.as_str()).collect();
        return Err(suggestions::group_not_found(unknown, &known));
    }

    Ok(merged
        .groups
        .iter()
        .filter(|group| only.is_empty() || only.contains(&group.name))
        .map(|group| count_line(group, merged))
        .collect())
}

fn count_line(group: &Group, merged: &MergedManifest) -> String {
    let total = group.templates.len();
    let hidden = group
        .templates
        .iter()
        .filter(|key| merged.template_is_hidden(key))
        .count();

    if hidden > 0 {
        format!(
            "{} => {} (including hidden = {})",
            group.name,
            total - hidden,
            total
        )
    } else {
        format!("{} => {}", group.name, total)
    }
}
