//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `theme-manifest` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! Commands that read manifests receive a lazily loaded
//! [`Manifest`](theme_manifest::manifest::Manifest) built from the global
//! `--manifest-dir` and `--strict` flags, and only use its accessors.

pub mod completions;
pub mod count;
pub mod show;
pub mod tree;
pub mod upstream_merge;
pub mod validate;
