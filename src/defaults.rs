//! Default values for theme-manifest.
//!
//! This module provides centralized constants used by the loader, the merger,
//! the dereferencer and the CLI commands, ensuring consistency and avoiding
//! duplication.

/// File name of the primary manifest. It anchors the merged version and must
/// carry the `version`, `templates`, `groups` and `categories` sections.
pub const PRIMARY_MANIFEST: &str = "basekit.json";

/// Glob pattern matched against file names to find secondary manifests.
pub const SECONDARY_MANIFEST_PATTERN: &str = "template.*.json";

/// Name of the synthetic group holding every merged template key.
pub const ALL_GROUP_NAME: &str = "All";

/// Prefix marking a group entry as a reference to another group.
pub const GROUP_REFERENCE_PREFIX: &str = "group:";

/// Deepest nesting level at which a referenced group may still be resolved.
pub const MAX_NESTING_LEVEL: usize = 99;

/// Environment variable naming the manifest directory for the CLI.
pub const MANIFEST_DIR_ENV: &str = "THEME_MANIFEST_DIR";

/// Section names with dedicated merge rules.
pub mod sections {
    pub const VERSION: &str = "version";
    pub const TEMPLATES: &str = "templates";
    pub const GROUPS: &str = "groups";
    pub const CATEGORIES: &str = "categories";
}

/// Returns the group name referenced by `entry`, if it is a group marker.
///
/// ```
/// use theme_manifest::defaults::group_reference;
///
/// assert_eq!(group_reference("group:Business"), Some("Business"));
/// assert_eq!(group_reference("business-1"), None);
/// ```
pub fn group_reference(entry: &str) -> Option<&str> {
    entry.strip_prefix(GROUP_REFERENCE_PREFIX)
}
