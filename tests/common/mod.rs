//! Shared test utilities for integration and E2E tests.
//!
//! This module provides manifest fixtures and helpers to reduce duplication
//! across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_primary(manifests::PRIMARY);
//!     fixture.command().arg("count").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Manifest JSON snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// Primary manifest with nested groups and a hidden template.
    pub const PRIMARY: &str = r#"{
    "version": "57",
    "templates": {
        "aurora": {"title": "Aurora"},
        "bistro": {"title": "Bistro"},
        "coast": {"title": "Coast", "hidden": true}
    },
    "groups": [
        {"name": "Food", "templates": ["bistro"]},
        {"name": "Featured", "templates": ["aurora", "group:Food", "coast"]}
    ],
    "categories": {"en": ["Business"], "de": ["Geschäft"]}
}"#;

    /// Partner manifest adding one template, one group and one category.
    pub const PARTNER: &str = r#"{
    "templates": {"delta": {"title": "Delta"}},
    "groups": [{"name": "Partner", "templates": ["delta", "group:Featured"]}],
    "categories": {"en": ["Partner"]}
}"#;

    /// Partner manifest redefining a template of [`PRIMARY`].
    pub const DUPLICATE_TEMPLATE: &str = r#"{
    "templates": {"aurora": {}},
    "groups": [],
    "categories": {}
}"#;

    /// Primary manifest whose groups reference each other in a loop.
    pub const CYCLE: &str = r#"{
    "version": 1,
    "templates": {"aurora": {}},
    "groups": [
        {"name": "A", "templates": ["group:B"]},
        {"name": "B", "templates": ["group:A"]}
    ],
    "categories": {}
}"#;

    /// Not JSON at all.
    pub const INVALID_JSON: &str = "{\"version\": 57,";
}

/// A temporary manifest directory.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_primary(manifests::PRIMARY)
///     .with_secondary("partner", manifests::PARTNER);
///
/// fixture.command().arg("count").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `basekit.json` primary manifest with the given content.
    pub fn with_primary(self, content: &str) -> Self {
        self.with_file("basekit.json", content)
    }

    /// Add a `template.<name>.json` secondary manifest.
    #[allow(dead_code)]
    pub fn with_secondary(self, name: &str, content: &str) -> Self {
        self.with_file(&format!("template.{}.json", name), content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command pointed at this fixture's manifest directory.
    ///
    /// Colors are disabled so assertions can match plain markers.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("theme-manifest");
        cmd.env_remove("THEME_MANIFEST_DIR")
            .env_remove("RUST_LOG")
            .arg("--manifest-dir")
            .arg(self.path())
            .arg("--color")
            .arg("never");
        cmd
    }
}
