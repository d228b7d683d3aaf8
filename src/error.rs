//! # Error Handling
//!
//! This module defines the centralized error type for the `theme-manifest`
//! library. It uses the `thiserror` library to create an `Error` enum that
//! covers every failure the load, merge and dereference pipeline can report,
//! plus the failures of the `git` wrapper used by the upstream merge command.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries the file, section, key
//!   or group name needed to locate the problem in the manifest directory.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! `Error` is `Clone` so that a failed lazy load can be memoized by a
//! [`Manifest`](crate::manifest::Manifest) and handed back on every later
//! accessor call. For the same reason I/O failures are captured as text
//! rather than wrapping `std::io::Error`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for theme-manifest operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The manifest directory does not exist.
    #[error("Manifest path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// The manifest directory contains no primary or secondary manifest.
    #[error("No manifest files found in {}, should contain at least {primary}", path.display())]
    NoManifestsFound { path: PathBuf, primary: String },

    /// A manifest file could not be parsed as JSON.
    #[error("{file} is not valid JSON: {message}")]
    InvalidJson { file: String, message: String },

    /// A required top-level section is absent from a manifest.
    #[error("{section} section not found in manifest {file}")]
    MissingSection { section: String, file: String },

    /// A section exists but has the wrong shape.
    #[error("Invalid {section} section in manifest {file}: {message}")]
    InvalidSection {
        section: String,
        file: String,
        message: String,
    },

    /// Two manifests define a template under the same key.
    #[error("Duplicate template key {key} detected in manifest {file}")]
    DuplicateTemplateKey { key: String, file: String },

    /// Two manifests define a group with the same name.
    #[error("Duplicate group name {name} detected in manifest {file}")]
    DuplicateGroupName { name: String, file: String },

    /// Two manifests define the same key in a generic section.
    #[error("Duplicate key {key} detected in section {section} of manifest {file}")]
    DuplicateSectionKey {
        section: String,
        key: String,
        file: String,
    },

    /// Group references nest deeper than the configured ceiling.
    #[error("Maximum template group nesting level {limit} reached while resolving group {group}")]
    MaxNestingExceeded { group: String, limit: usize },

    /// A group reference points back to a group already being resolved.
    ///
    /// Only reported when cycle detection is enabled.
    #[error("Cycle detected in template group references: {cycle}")]
    GroupCycle { cycle: String },

    /// A group reference names a group that does not exist.
    ///
    /// Only reported when the missing group policy is `Error`.
    #[error("Group {group} references unknown group {name}")]
    UnknownGroup { group: String, name: String },

    /// A manifest file or directory could not be read.
    #[error("I/O error reading {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// A git command failed or reported a fatal error.
    #[error("Git command failed: {command} - {output}")]
    GitCommand { command: String, output: String },
}

impl Error {
    /// Build an [`Error::Io`] from a `std::io::Error` and the path involved.
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
