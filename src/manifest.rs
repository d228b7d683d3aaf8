//! # Merged Manifest
//!
//! This module holds the merged manifest model and the [`Manifest`] handle
//! that callers use to read it.
//!
//! ## Lazy Loading
//!
//! A [`Manifest`] is created from a directory path without touching the
//! filesystem. The first accessor call runs the whole pipeline:
//!
//! 1.  **Load** ([`crate::loader`]): discover and parse the manifest files.
//! 2.  **Merge** ([`crate::merge`]): fold the documents into one model and
//!     append the synthetic `All` group.
//! 3.  **Dereference** ([`crate::dereference`]): flatten `group:<name>`
//!     references inside every group.
//!
//! The outcome, success or failure, is memoized for the lifetime of the
//! handle. Later accessor calls are plain reads. A failed load keeps
//! returning the same error until [`Manifest::reload`] is called.
//!
//! ## Example
//!
//! ```no_run
//! use theme_manifest::manifest::Manifest;
//!
//! let manifest = Manifest::new("config/template_manifests");
//! for group in manifest.groups()? {
//!     println!("{} => {}", group.name, group.templates.len());
//! }
//! # Ok::<(), theme_manifest::error::Error>(())
//! ```

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dereference::dereference_groups;
use crate::error::{Error, Result};
use crate::loader::load_documents;
use crate::merge::merge_documents;
use crate::options::ManifestOptions;

/// A named, ordered list of template keys and `group:<name>` references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub templates: Vec<String>,
    /// Any other attributes of the group object, kept verbatim.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Group {
    /// Create a group without extra attributes.
    pub fn new<I, S>(name: impl Into<String>, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            templates: templates.into_iter().map(Into::into).collect(),
            attributes: Map::new(),
        }
    }
}

/// The aggregate produced by merging every manifest in a directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedManifest {
    /// Version of the primary manifest, `null` without one.
    pub version: Value,
    /// Template attributes keyed by template id, in merge order.
    pub templates: Map<String, Value>,
    pub groups: Vec<Group>,
    /// Category lists keyed by locale.
    pub categories: Map<String, Value>,
    /// Any other top-level section, each a flat mapping.
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

impl MergedManifest {
    /// First group with the given name.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Whether a template carries a non-null `hidden` attribute.
    ///
    /// Unknown template keys are reported as visible.
    pub fn template_is_hidden(&self, key: &str) -> bool {
        self.templates
            .get(key)
            .and_then(|template| template.get("hidden"))
            .is_some_and(|hidden| !hidden.is_null())
    }
}

/// Run the load, merge and dereference pipeline eagerly.
pub fn load_manifest(dir: &Path, options: &ManifestOptions) -> Result<MergedManifest> {
    let documents = load_documents(dir, options)?;
    let mut merged = merge_documents(&documents)?;
    merged.groups = dereference_groups(&merged.groups, &options.dereference)?;
    info!(
        "Merged {} manifest(s) from {}: {} templates, {} groups",
        documents.len(),
        dir.display(),
        merged.templates.len(),
        merged.groups.len()
    );
    Ok(merged)
}

#[derive(Debug)]
enum LoadState {
    Loaded(MergedManifest),
    Failed(Error),
}

/// Lazily loaded view over the manifests of one directory.
///
/// The handle is `Send` but not `Sync`: drive each instance from one thread.
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    options: ManifestOptions,
    state: OnceCell<LoadState>,
}

impl Manifest {
    /// Create a handle using the default options. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, ManifestOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: ManifestOptions) -> Self {
        Self {
            path: path.into(),
            options,
            state: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ManifestOptions {
        &self.options
    }

    /// True once the pipeline has run and succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state.get(), Some(LoadState::Loaded(_)))
    }

    /// True once the pipeline has run and failed.
    pub fn has_failed(&self) -> bool {
        matches!(self.state.get(), Some(LoadState::Failed(_)))
    }

    /// Forget the memoized outcome so the next accessor call loads again.
    pub fn reload(&mut self) {
        debug!("Resetting manifest state for {}", self.path.display());
        self.state = OnceCell::new();
    }

    /// The whole merged model.
    pub fn merged(&self) -> Result<&MergedManifest> {
        let state = self.state.get_or_init(|| {
            debug!("Loading manifests from {}", self.path.display());
            match load_manifest(&self.path, &self.options) {
                Ok(merged) => LoadState::Loaded(merged),
                Err(err) => LoadState::Failed(err),
            }
        });
        match state {
            LoadState::Loaded(merged) => Ok(merged),
            LoadState::Failed(err) => Err(err.clone()),
        }
    }

    pub fn templates(&self) -> Result<&Map<String, Value>> {
        Ok(&self.merged()?.templates)
    }

    /// Groups with fully flattened template lists, `All` last.
    pub fn groups(&self) -> Result<&[Group]> {
        Ok(&self.merged()?.groups)
    }

    pub fn categories(&self) -> Result<&Map<String, Value>> {
        Ok(&self.merged()?.categories)
    }

    pub fn version(&self) -> Result<&Value> {
        Ok(&self.merged()?.version)
    }

    /// Sections other than version, templates, groups and categories.
    pub fn sections(&self) -> Result<&Map<String, Value>> {
        Ok(&self.merged()?.sections)
    }
}
