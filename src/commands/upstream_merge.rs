//! # Upstream Merge Command Implementation
//!
//! This module implements the `upstream-merge` subcommand, which carries the
//! changes of one release branch up into every later release branch.
//!
//! ## Functionality
//!
//! For each version `v` from `--current-version + 1` up to `--to-version`:
//!
//! 1.  **Checkout**: `release/<v>` is checked out.
//! 2.  **Merge**: `release/<current>` is merged into it.
//! 3.  **Commit or Roll Back**: With `--commit` the merge is committed and
//!     `release/<v>` is pushed to `origin`. Without it the merge is undone with
//!     `git reset --merge ORIG_HEAD`, which makes a plain run a dry run that
//!     still surfaces conflicts.
//!
//! Committing asks for confirmation unless `--yes` is given. Any git output
//! containing `fatal:` stops the command.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

use theme_manifest::git::{release_branch, GitRepo};
use theme_manifest::suggestions;

/// Merge a release branch up into the following release branches
#[derive(Args, Debug)]
pub struct UpstreamMergeArgs {
    /// Release version whose branch is merged upward.
    #[arg(long, value_name = "N")]
    pub current_version: u32,

    /// Last release version to merge into.
    #[arg(long, value_name = "M")]
    pub to_version: u32,

    /// Commit each merge and push the release branch.
    #[arg(long)]
    pub commit: bool,

    /// Skip the confirmation prompt before committing.
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the `upstream-merge` command.
///
/// `work_tree` is the git work tree holding the manifests; its repository is
/// expected at `<work_tree>/.git`.
pub fn execute(args: UpstreamMergeArgs, work_tree: &Path) -> Result<()> {
    check_range(args.current_version, args.to_version)?;

    let mut commit = args.commit;
    if commit && !args.yes {
        commit = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Commit and push merges of {} into release/{}..release/{}?",
                release_branch(args.current_version),
                args.current_version + 1,
                args.to_version
            ))
            .default(false)
            .interact()?;
        if !commit {
            println!("Commit cancelled, merges will be rolled back.");
        }
    }

    let repo = GitRepo::new(work_tree);
    let source = release_branch(args.current_version);

    for version in merge_targets(args.current_version, args.to_version) {
        let target = release_branch(version);
        println!("\n🔀 Merging {} into {}", source, target);

        let output = repo.checkout(&target).map_err(suggestions::for_error)?;
        print_output(&output);
        let output = repo.merge(&source).map_err(suggestions::for_error)?;
        print_output(&output);

        if commit {
            let output = repo
                .commit_all(&format!("merges from {}", source))
                .map_err(suggestions::for_error)?;
            print_output(&output);
            let output = repo
                .push("origin", &target)
                .map_err(suggestions::for_error)?;
            print_output(&output);
            println!("✅ Pushed {}", target);
        } else {
            let output = repo.reset_merge().map_err(suggestions::for_error)?;
            print_output(&output);
            println!("↩️  Rolled back merge into {}", target);
        }
    }

    Ok(())
}

fn check_range(current: u32, to: u32) -> Result<()> {
    if current == 0 || to == 0 || current >= to {
        return Err(suggestions::invalid_version_range(current, to));
    }
    Ok(())
}

/// Versions whose release branches receive the merge, in ascending order.
fn merge_targets(current: u32, to: u32) -> std::ops::RangeInclusive<u32> {
    current + 1..=to
}

fn print_output(output: &str) {
    let output = output.trim_end();
    if !output.is_empty() {
        println!("{}", output);
    }
}
