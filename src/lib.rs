//! # Theme Manifest Library
//!
//! This library merges the JSON manifests describing a catalog of templates
//! (themes) into one model and flattens the named template groups they
//! define. It is used by the `theme-manifest` command-line tool but can be
//! embedded by anything that needs the merged catalog.
//!
//! ## Quick Example
//!
//! ```
//! use theme_manifest::manifest::Manifest;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(
//!     dir.path().join("basekit.json"),
//!     r#"{
//!         "version": "57",
//!         "templates": {"aurora": {}, "bistro": {}},
//!         "groups": [
//!             {"name": "Food", "templates": ["bistro"]},
//!             {"name": "Featured", "templates": ["aurora", "group:Food"]}
//!         ],
//!         "categories": {"en": ["Business"]}
//!     }"#,
//! )
//! .unwrap();
//!
//! let manifest = Manifest::new(dir.path());
//! let groups = manifest.groups().unwrap();
//! assert_eq!(groups[1].templates, vec!["aurora", "bistro"]);
//! assert_eq!(groups[2].name, "All");
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifests (`loader`)**: `basekit.json` is the primary manifest and
//!   anchors the catalog version. Any number of `template.*.json` secondary
//!   manifests add templates, groups, categories and other sections.
//! - **Merging (`merge`)**: sections are combined with per-section rules.
//!   Conflicting template keys, group names or section keys are errors.
//! - **Groups (`dereference`)**: a group entry `group:<name>` stands for the
//!   whole template list of another group and is expanded in place.
//! - **Lazy access (`manifest`)**: a [`manifest::Manifest`] runs the pipeline
//!   on first access and memoizes the result.
//!
//! ## Execution Flow
//!
//! 1.  **Load**: discover and parse the manifest files of a directory.
//! 2.  **Merge**: fold the documents into one model and append the `All`
//!     group listing every template.
//! 3.  **Dereference**: flatten group references inside every group.

pub mod defaults;
pub mod dereference;
pub mod error;
pub mod git;
pub mod loader;
pub mod manifest;
pub mod merge;
pub mod options;
pub mod output;
pub mod suggestions;

#[cfg(test)]
mod dereference_proptest;
