//! Options controlling how manifests are discovered and how group references
//! are resolved.
//!
//! Every option has a default matching the historical behavior of the
//! manifest tooling, so `ManifestOptions::default()` is what most callers
//! want. The CLI switches to [`DereferenceOptions::strict`] with `--strict`.

use crate::defaults::{MAX_NESTING_LEVEL, PRIMARY_MANIFEST, SECONDARY_MANIFEST_PATTERN};

/// What to do when a group references a group name that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingGroupPolicy {
    /// Resolve the reference to no entries and log a warning.
    #[default]
    Ignore,
    /// Fail with [`Error::UnknownGroup`](crate::error::Error::UnknownGroup).
    Error,
}

/// Options for the group reference dereferencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DereferenceOptions {
    /// Deepest nesting level at which a referenced group may be resolved.
    pub max_nesting: usize,
    /// Fail fast with `GroupCycle` when a reference loops back to a group
    /// already on the resolution stack, instead of waiting for the nesting
    /// ceiling.
    pub detect_cycles: bool,
    /// Handling of references to unknown groups.
    pub missing_groups: MissingGroupPolicy,
}

impl DereferenceOptions {
    /// Cycle detection on, unknown group references rejected.
    pub fn strict() -> Self {
        Self {
            detect_cycles: true,
            missing_groups: MissingGroupPolicy::Error,
            ..Self::default()
        }
    }
}

impl Default for DereferenceOptions {
    fn default() -> Self {
        Self {
            max_nesting: MAX_NESTING_LEVEL,
            detect_cycles: false,
            missing_groups: MissingGroupPolicy::Ignore,
        }
    }
}

/// Options for the whole load, merge and dereference pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOptions {
    /// File name of the primary manifest.
    pub primary_manifest: String,
    /// Glob pattern identifying secondary manifests by file name.
    pub secondary_pattern: String,
    pub dereference: DereferenceOptions,
}

impl ManifestOptions {
    /// Default file names with strict group resolution.
    pub fn strict() -> Self {
        Self {
            dereference: DereferenceOptions::strict(),
            ..Self::default()
        }
    }
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            primary_manifest: PRIMARY_MANIFEST.to_string(),
            secondary_pattern: SECONDARY_MANIFEST_PATTERN.to_string(),
            dereference: DereferenceOptions::default(),
        }
    }
}
