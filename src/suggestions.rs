//! # Error Suggestions
//!
//! Helpers that turn failures into messages telling users what went wrong
//! AND how to fix it. Library errors stay typed ([`crate::error::Error`]);
//! the CLI converts them here, at the edge, into `anyhow` errors with
//! `hint:` lines.
//!
//! ```rust,ignore
//! use theme_manifest::suggestions;
//!
//! let groups = manifest.groups().map_err(suggestions::for_error)?;
//! ```

use crate::defaults::MANIFEST_DIR_ENV;
use crate::error::Error;

/// Attach hints to a library error.
pub fn for_error(error: Error) -> anyhow::Error {
    let hints: Vec<String> = match &error {
        Error::PathNotFound { .. } => vec![
            "Use --manifest-dir to point at the manifest directory".to_string(),
            format!("Set the {} environment variable", MANIFEST_DIR_ENV),
        ],
        Error::NoManifestsFound { primary, .. } => vec![
            format!("Create a {} manifest in the directory", primary),
            "Secondary manifests must be named template.<name>.json".to_string(),
        ],
        Error::InvalidJson { file, .. } => {
            vec![format!("Check {} for trailing commas or unquoted keys", file)]
        }
        Error::MissingSection { section, .. } => {
            vec![format!("Add a \"{}\" entry at the top level", section)]
        }
        Error::DuplicateTemplateKey { key, .. } => {
            vec![format!("Rename or remove one of the {} templates", key)]
        }
        Error::DuplicateGroupName { name, .. } => vec![format!(
            "Group names must be unique across all manifests, rename one {} group",
            name
        )],
        Error::MaxNestingExceeded { .. } => vec![
            "Groups probably reference each other in a loop".to_string(),
            "Run with --strict to report the exact cycle".to_string(),
        ],
        Error::GroupCycle { .. } => {
            vec!["Remove one of the group: references to break the cycle".to_string()]
        }
        Error::UnknownGroup { .. } => vec![
            "Fix the group: reference or define the missing group".to_string(),
            "Without --strict unknown references resolve to no templates".to_string(),
        ],
        _ => Vec::new(),
    };

    let hints: String = hints
        .iter()
        .map(|hint| format!("\nhint: {}", hint))
        .collect();
    if hints.is_empty() {
        anyhow::Error::new(error)
    } else {
        anyhow::anyhow!("{}\n{}", error, hints)
    }
}

/// Error for a group name that is not in the merged manifest.
///
/// Suggests the closest known name when one is near enough.
pub fn group_not_found(name: &str, known: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(name, known)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Group not found: {name}{did_you_mean}\n\n\
         hint: Run 'theme-manifest count' to list every group"
    )
}

/// Error for an unusable upstream merge version range.
pub fn invalid_version_range(current: u32, to: u32) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid version range: {current} -> {to}\n\n\
         hint: --current-version and --to-version must be positive integers\n\
         hint: --current-version must be lower than --to-version"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(&input.to_lowercase(), &candidate.to_lowercase());
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Single rolling row instead of the full matrix
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, a_char) in a_chars.iter().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        previous = current;
    }

    previous[b_chars.len()]
}
