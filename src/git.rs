//! Thin wrapper over the system `git` binary.
//!
//! Used by the upstream merge command to move changes from one release
//! branch (`release/<n>`) up into later ones. Every command runs against an
//! explicit work tree and git directory, so the caller's current directory
//! does not matter.
//!
//! Git exits non-zero for ordinary outcomes such as merge conflicts, so the
//! exit status alone does not decide failure: output containing `fatal:` does.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Name of the branch holding a release version.
pub fn release_branch(version: u32) -> String {
    format!("release/{}", version)
}

/// Whether git output reports a fatal error.
pub fn is_fatal(output: &str) -> bool {
    output.to_lowercase().contains("fatal:")
}

/// A git work tree whose repository lives in `<work_tree>/.git`.
#[derive(Debug, Clone)]
pub struct GitRepo {
    work_tree: PathBuf,
}

impl GitRepo {
    pub fn new(work_tree: impl Into<PathBuf>) -> Self {
        Self {
            work_tree: work_tree.into(),
        }
    }

    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    fn location_args(&self) -> Vec<OsString> {
        let mut work_tree = OsString::from("--work-tree=");
        work_tree.push(self.work_tree.as_os_str());
        vec![
            work_tree,
            OsString::from("--git-dir"),
            self.work_tree.join(".git").into_os_string(),
        ]
    }

    /// Run `git <args>` and return its combined stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns `Error::GitCommand` if git cannot be started or its output
    /// contains `fatal:`.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        debug!("Running {} in {}", command, self.work_tree.display());

        let output = Command::new("git")
            .args(self.location_args())
            .args(args)
            .output()
            .map_err(|err| Error::GitCommand {
                command: command.clone(),
                output: err.to_string(),
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if is_fatal(&text) {
            return Err(Error::GitCommand {
                command,
                output: text.trim().to_string(),
            });
        }
        if !output.status.success() {
            debug!("{} exited with {}", command, output.status);
        }
        Ok(text)
    }

    pub fn checkout(&self, branch: &str) -> Result<String> {
        self.run(&["checkout", branch])
    }

    /// Merge `branch` into the checked out branch.
    pub fn merge(&self, branch: &str) -> Result<String> {
        self.run(&["merge", branch])
    }

    /// Commit every tracked change with `message`.
    pub fn commit_all(&self, message: &str) -> Result<String> {
        self.run(&["commit", "-am", message])
    }

    pub fn push(&self, remote: &str, branch: &str) -> Result<String> {
        self.run(&["push", remote, branch])
    }

    /// Abandon the last merge and restore the previous head.
    pub fn reset_merge(&self) -> Result<String> {
        self.run(&["reset", "--merge", "ORIG_HEAD"])
    }
}
