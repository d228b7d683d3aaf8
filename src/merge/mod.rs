//! # Manifest Merger
//!
//! Folds a list of parsed [`ManifestDocument`]s into one [`MergedManifest`].
//!
//! ## Section Rules
//!
//! - **version**: taken from the primary manifest. Never merged as a section.
//! - **templates**: key union. A key defined twice is an error. Templates of a
//!   document whose effective version differs from the merged version are
//!   stamped with a `version` attribute first.
//! - **groups**: appended in order. A group name defined twice is an error.
//! - **categories**: per-locale concatenation of category lists.
//! - **anything else**: flat key union, a key defined twice is an error.
//!
//! The synthetic `All` group is appended once every document is merged. Group
//! references are left untouched; flattening them is the job of
//! [`crate::dereference`].

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::defaults::{sections, ALL_GROUP_NAME};
use crate::error::{Error, Result};
use crate::loader::ManifestDocument;
use crate::manifest::{Group, MergedManifest};

/// Merge documents in order. Groups keep their `group:<name>` references.
///
/// # Errors
///
/// - `Error::DuplicateTemplateKey`, `Error::DuplicateGroupName` and
///   `Error::DuplicateSectionKey` on conflicting definitions.
/// - `Error::InvalidSection` when a section has the wrong shape.
pub fn merge_documents(documents: &[ManifestDocument]) -> Result<MergedManifest> {
    let version = match documents
        .iter()
        .find(|document| document.primary)
        .and_then(|document| document.section(sections::VERSION))
    {
        Some(version) => version.clone(),
        None => {
            warn!("No primary manifest version found, merged version is null");
            Value::Null
        }
    };

    let mut merger = Merger::new(version);
    for document in documents {
        merger.merge_document(document)?;
    }
    Ok(merger.finish())
}

/// The version a document's templates belong to.
///
/// A document's own non-empty `version` wins, otherwise the merged version.
pub fn effective_version<'a>(document: &'a ManifestDocument, merged: &'a Value) -> &'a Value {
    match document.section(sections::VERSION) {
        Some(version) if !is_empty_version(version) => version,
        _ => merged,
    }
}

/// Compare versions by their scalar text, so `57` and `"57"` are equal.
pub fn same_version(a: &Value, b: &Value) -> bool {
    version_text(a) == version_text(b)
}

fn version_text(version: &Value) -> String {
    match version {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_empty_version(version: &Value) -> bool {
    match version {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

struct Merger {
    version: Value,
    templates: Map<String, Value>,
    groups: Vec<Group>,
    categories: Map<String, Value>,
    sections: Map<String, Value>,
}

impl Merger {
    fn new(version: Value) -> Self {
        Self {
            version,
            templates: Map::new(),
            groups: Vec::new(),
            categories: Map::new(),
            sections: Map::new(),
        }
    }

    fn merge_document(&mut self, document: &ManifestDocument) -> Result<()> {
        let effective = effective_version(document, &self.version);
        let stamp = (!same_version(effective, &self.version)).then(|| effective.clone());

        debug!(
            "Merging {}{}",
            document.file_name,
            stamp
                .as_ref()
                .map(|v| format!(" (templates stamped with version {})", version_text(v)))
                .unwrap_or_default()
        );

        for (name, section) in &document.sections {
            if section.is_null() {
                continue;
            }
            match name.as_str() {
                sections::VERSION => {}
                sections::TEMPLATES => self.merge_templates(document, section, stamp.as_ref())?,
                sections::GROUPS => self.merge_groups(document, section)?,
                sections::CATEGORIES => self.merge_categories(document, section)?,
                _ => self.merge_section(document, name, section)?,
            }
        }
        Ok(())
    }

    fn merge_templates(
        &mut self,
        document: &ManifestDocument,
        section: &Value,
        stamp: Option<&Value>,
    ) -> Result<()> {
        let incoming = expect_object(document, sections::TEMPLATES, section)?;

        for (key, template) in incoming {
            let Value::Object(attributes) = template else {
                return Err(invalid_section(
                    document,
                    sections::TEMPLATES,
                    format!("template {} is not an object", key),
                ));
            };
            if self.templates.contains_key(key) {
                return Err(Error::DuplicateTemplateKey {
                    key: key.clone(),
                    file: document.file_name.clone(),
                });
            }

            let mut attributes = attributes.clone();
            if let Some(version) = stamp {
                attributes.insert(sections::VERSION.to_string(), version.clone());
            }
            self.templates.insert(key.clone(), Value::Object(attributes));
        }
        Ok(())
    }

    fn merge_groups(&mut self, document: &ManifestDocument, section: &Value) -> Result<()> {
        let Value::Array(incoming) = section else {
            return Err(invalid_section(
                document,
                sections::GROUPS,
                "expected a list of groups".to_string(),
            ));
        };

        for (index, raw) in incoming.iter().enumerate() {
            let group: Group = serde_json::from_value(raw.clone()).map_err(|err| {
                invalid_section(document, sections::GROUPS, format!("group #{}: {}", index, err))
            })?;
            if self.groups.iter().any(|existing| existing.name == group.name) {
                return Err(Error::DuplicateGroupName {
                    name: group.name,
                    file: document.file_name.clone(),
                });
            }
            self.groups.push(group);
        }
        Ok(())
    }

    fn merge_categories(&mut self, document: &ManifestDocument, section: &Value) -> Result<()> {
        let incoming = expect_object(document, sections::CATEGORIES, section)?;

        for (locale, categories) in incoming {
            let Some(existing) = self.categories.get_mut(locale) else {
                self.categories.insert(locale.clone(), categories.clone());
                continue;
            };
            match (existing, categories) {
                (Value::Array(existing), Value::Array(categories)) => {
                    existing.extend(categories.iter().cloned());
                }
                (Value::Object(existing), Value::Object(categories)) => {
                    for (key, value) in categories {
                        existing.insert(key.clone(), value.clone());
                    }
                }
                _ => {
                    return Err(invalid_section(
                        document,
                        sections::CATEGORIES,
                        format!("locale {} cannot be combined with the existing entry", locale),
                    ))
                }
            }
        }
        Ok(())
    }

    fn merge_section(
        &mut self,
        document: &ManifestDocument,
        name: &str,
        section: &Value,
    ) -> Result<()> {
        let incoming = expect_object(document, name, section)?;

        let Some(Value::Object(existing)) = self.sections.get_mut(name) else {
            self.sections
                .insert(name.to_string(), Value::Object(incoming.clone()));
            return Ok(());
        };

        if let Some(key) = incoming.keys().find(|key| existing.contains_key(*key)) {
            return Err(Error::DuplicateSectionKey {
                section: name.to_string(),
                key: key.clone(),
                file: document.file_name.clone(),
            });
        }
        for (key, value) in incoming {
            existing.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn finish(mut self) -> MergedManifest {
        if self.groups.iter().any(|group| group.name == ALL_GROUP_NAME) {
            warn!(
                "A manifest defines a group named {}, references to it resolve to that group",
                ALL_GROUP_NAME
            );
        }
        let all = Group::new(ALL_GROUP_NAME, self.templates.keys().cloned());
        self.groups.push(all);

        MergedManifest {
            version: self.version,
            templates: self.templates,
            groups: self.groups,
            categories: self.categories,
            sections: self.sections,
        }
    }
}

fn expect_object<'a>(
    document: &ManifestDocument,
    section: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| invalid_section(document, section, "expected an object".to_string()))
}

fn invalid_section(document: &ManifestDocument, section: &str, message: String) -> Error {
    Error::InvalidSection {
        section: section.to_string(),
        file: document.file_name.clone(),
        message,
    }
}
