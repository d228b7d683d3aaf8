//! # Manifest Document Loader
//!
//! Discovers the manifest files of a directory and parses each one into a
//! [`ManifestDocument`].
//!
//! ## Discovery
//!
//! Only files directly inside the directory are considered. A file is a
//! manifest when its name equals the primary manifest name (`basekit.json`)
//! or matches the secondary pattern (`template.*.json`). The primary manifest
//! always comes first, secondaries follow sorted by file name, so the merge
//! order does not depend on the order the filesystem lists entries in.
//!
//! ## Validation
//!
//! Every manifest needs a `templates` section. The primary manifest also needs
//! `version`, `groups` and `categories`. A section set to `null` counts as
//! missing. The shape of each section is checked later by the merger.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::debug;
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::defaults::sections;
use crate::error::{Error, Result};
use crate::options::ManifestOptions;

/// One parsed manifest file.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    /// File name relative to the manifest directory.
    pub file_name: String,
    /// Whether this is the primary manifest.
    pub primary: bool,
    /// Top-level sections in document order.
    pub sections: Map<String, Value>,
}

impl ManifestDocument {
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name).filter(|value| !value.is_null())
    }
}

/// List the manifest files directly inside `dir`, primary first.
///
/// # Errors
///
/// - `Error::PathNotFound` if `dir` is not an existing directory.
/// - `Error::NoManifestsFound` if no file qualifies.
/// - `Error::Io` if the directory cannot be listed.
pub fn discover_manifest_files(dir: &Path, options: &ManifestOptions) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::PathNotFound {
            path: dir.to_path_buf(),
        });
    }

    let secondary = Pattern::new(&options.secondary_pattern).map_err(|err| Error::Io {
        path: dir.to_path_buf(),
        message: format!(
            "invalid manifest pattern '{}': {}",
            options.secondary_pattern, err
        ),
    })?;

    let mut primary = None;
    let mut secondaries = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| Error::Io {
            path: err.path().unwrap_or(dir).to_path_buf(),
            message: err.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name == options.primary_manifest {
            primary = Some(entry.path().to_path_buf());
        } else if secondary.matches(name) {
            secondaries.push(entry.path().to_path_buf());
        }
    }

    secondaries.sort();
    let files: Vec<PathBuf> = primary.into_iter().chain(secondaries).collect();

    if files.is_empty() {
        return Err(Error::NoManifestsFound {
            path: dir.to_path_buf(),
            primary: options.primary_manifest.clone(),
        });
    }

    Ok(files)
}

/// Discover and parse every manifest in `dir`, primary first.
pub fn load_documents(dir: &Path, options: &ManifestOptions) -> Result<Vec<ManifestDocument>> {
    discover_manifest_files(dir, options)?
        .iter()
        .map(|path| {
            let primary = path
                .file_name()
                .is_some_and(|name| name == options.primary_manifest.as_str());
            load_document(path, primary)
        })
        .collect()
}

/// Read and parse a single manifest file.
pub fn load_document(path: &Path, primary: bool) -> Result<ManifestDocument> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let content = fs::read_to_string(path).map_err(|err| Error::io(path, &err))?;
    debug!("Loaded manifest {} ({} bytes)", path.display(), content.len());

    parse_document(&file_name, &content, primary)
}

/// Parse manifest content and check its required sections.
///
/// # Errors
///
/// - `Error::InvalidJson` if the content is not JSON or is the literal `null`.
/// - `Error::MissingSection` for the first required section that is absent.
pub fn parse_document(file_name: &str, content: &str, primary: bool) -> Result<ManifestDocument> {
    let value: Value = serde_json::from_str(content).map_err(|err| Error::InvalidJson {
        file: file_name.to_string(),
        message: err.to_string(),
    })?;

    let sections = match value {
        Value::Object(map) => map,
        Value::Null => {
            return Err(Error::InvalidJson {
                file: file_name.to_string(),
                message: "document is null".to_string(),
            })
        }
        // Arrays and scalars have no sections at all
        _ => Map::new(),
    };

    let document = ManifestDocument {
        file_name: file_name.to_string(),
        primary,
        sections,
    };

    let mut required = vec![sections::TEMPLATES];
    if primary {
        required.extend([sections::VERSION, sections::GROUPS, sections::CATEGORIES]);
    }
    for section in required {
        if document.section(section).is_none() {
            return Err(Error::MissingSection {
                section: section.to_string(),
                file: file_name.to_string(),
            });
        }
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PRIMARY: &str = r#"{
        "version": "57",
        "templates": {"aurora": {}},
        "groups": [],
        "categories": {}
    }"#;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_discover_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let result = discover_manifest_files(&missing, &ManifestOptions::default());
        assert_eq!(result.unwrap_err(), Error::PathNotFound { path: missing });
    }

    #[test]
    fn test_discover_no_manifests() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("readme.md"), "# themes").unwrap();
        fs::write(temp.path().join("templates.json"), "{}").unwrap();

        let result = discover_manifest_files(temp.path(), &ManifestOptions::default());
        assert!(matches!(result, Err(Error::NoManifestsFound { .. })));
    }

    #[test]
    fn test_discover_orders_primary_first() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("template.zeta.json"), "{}").unwrap();
        fs::write(temp.path().join("template.alpha.json"), "{}").unwrap();
        fs::write(temp.path().join("basekit.json"), "{}").unwrap();
        fs::write(temp.path().join("other.json"), "{}").unwrap();

        let files = discover_manifest_files(temp.path(), &ManifestOptions::default()).unwrap();
        assert_eq!(
            names(&files),
            vec!["basekit.json", "template.alpha.json", "template.zeta.json"]
        );
    }

    #[test]
    fn test_discover_ignores_nested_directories() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("template.dir.json");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("basekit.json"), PRIMARY).unwrap();
        fs::write(temp.path().join("basekit.json"), PRIMARY).unwrap();

        let files = discover_manifest_files(temp.path(), &ManifestOptions::default()).unwrap();
        assert_eq!(names(&files), vec!["basekit.json"]);
    }

    #[test]
    fn test_discover_with_custom_names() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("main.json"), PRIMARY).unwrap();
        fs::write(temp.path().join("extra-1.json"), "{}").unwrap();

        let options = ManifestOptions {
            primary_manifest: "main.json".to_string(),
            secondary_pattern: "extra-*.json".to_string(),
            ..Default::default()
        };
        let files = discover_manifest_files(temp.path(), &options).unwrap();
        assert_eq!(names(&files), vec!["main.json", "extra-1.json"]);
    }

    #[test]
    fn test_load_documents_marks_primary() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("basekit.json"), PRIMARY).unwrap();
        fs::write(
            temp.path().join("template.partner.json"),
            r#"{"templates": {"coast": {}}}"#,
        )
        .unwrap();

        let docs = load_documents(temp.path(), &ManifestOptions::default()).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].primary);
        assert_eq!(docs[0].file_name, "basekit.json");
        assert!(!docs[1].primary);
        assert_eq!(docs[1].file_name, "template.partner.json");
    }

    #[test]
    fn test_parse_invalid_json_names_file() {
        let result = parse_document("template.broken.json", "{\"templates\": ", false);
        match result {
            Err(Error::InvalidJson { file, .. }) => assert_eq!(file, "template.broken.json"),
            other => panic!("expected InvalidJson, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_null_document_is_invalid() {
        let result = parse_document("template.null.json", "null", false);
        assert!(matches!(result, Err(Error::InvalidJson { .. })));
    }

    #[test]
    fn test_parse_secondary_requires_templates() {
        let result = parse_document("template.a.json", r#"{"version": "58"}"#, false);
        assert_eq!(
            result.unwrap_err(),
            Error::MissingSection {
                section: "templates".to_string(),
                file: "template.a.json".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_null_section_counts_as_missing() {
        let result = parse_document("template.a.json", r#"{"templates": null}"#, false);
        assert!(matches!(result, Err(Error::MissingSection { .. })));
    }

    #[test]
    fn test_parse_array_document_lacks_templates() {
        let result = parse_document("template.a.json", "[1, 2]", false);
        assert!(matches!(
            result,
            Err(Error::MissingSection { ref section, .. }) if section == "templates"
        ));
    }

    #[test]
    fn test_parse_secondary_needs_only_templates() {
        let doc = parse_document("template.a.json", r#"{"templates": {}}"#, false).unwrap();
        assert!(!doc.primary);
        assert!(doc.section("groups").is_none());
    }

    #[test]
    fn test_parse_primary_requires_all_sections() {
        for (missing, content) in [
            ("version", r#"{"templates": {}, "groups": [], "categories": {}}"#),
            ("groups", r#"{"templates": {}, "version": 1, "categories": {}}"#),
            ("categories", r#"{"templates": {}, "version": 1, "groups": []}"#),
        ] {
            let err = parse_document("basekit.json", content, true).unwrap_err();
            assert_eq!(
                err,
                Error::MissingSection {
                    section: missing.to_string(),
                    file: "basekit.json".to_string(),
                }
            );
        }
    }

    #[test]
    fn test_parse_primary_complete() {
        let doc = parse_document("basekit.json", PRIMARY, true).unwrap();
        assert!(doc.primary);
        let keys: Vec<&String> = doc.sections.keys().collect();
        assert_eq!(keys, vec!["version", "templates", "groups", "categories"]);
    }
}
