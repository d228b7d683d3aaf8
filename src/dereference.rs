//! # Group Reference Dereferencer
//!
//! A group entry of the form `group:<name>` stands for the whole template list
//! of the named group. Dereferencing replaces each such marker, in place, with
//! the referenced group's own fully expanded list, so that every group ends up
//! as a flat, ordered list of template keys.
//!
//! ## Resolution
//!
//! Each group is resolved on its own against the full, shared group list, so
//! a group may reference groups defined before or after it. Resolution walks
//! an explicit stack of frames rather than recursing: the group being resolved
//! sits at depth 0 and every referenced group is resolved one level deeper
//! than its referrer. Entering a group deeper than
//! [`DereferenceOptions::max_nesting`] fails with `MaxNestingExceeded`, which
//! is also how reference cycles are caught by default. With
//! [`DereferenceOptions::detect_cycles`] set, a reference back to a group
//! already on the stack fails straight away with `GroupCycle`.
//!
//! A reference to a group that does not exist resolves to nothing and is
//! logged as a warning, unless [`MissingGroupPolicy::Error`] is selected.

use std::slice;

use log::warn;

use crate::defaults::group_reference;
use crate::error::{Error, Result};
use crate::manifest::Group;
use crate::options::{DereferenceOptions, MissingGroupPolicy};

/// Flatten the template list of every group.
///
/// Group order, names and extra attributes are kept as they are.
pub fn dereference_groups(groups: &[Group], options: &DereferenceOptions) -> Result<Vec<Group>> {
    groups
        .iter()
        .map(|group| {
            Ok(Group {
                templates: resolve_group(group, groups, options)?,
                ..group.clone()
            })
        })
        .collect()
}

struct Frame<'a> {
    name: &'a str,
    depth: usize,
    pending: slice::Iter<'a, String>,
    resolved: Vec<String>,
}

impl<'a> Frame<'a> {
    fn new(group: &'a Group, depth: usize) -> Self {
        Self {
            name: &group.name,
            depth,
            pending: group.templates.iter(),
            resolved: Vec::new(),
        }
    }
}

/// Expand the template list of `group` against `groups`.
///
/// # Errors
///
/// - `Error::MaxNestingExceeded` when a reference chain is deeper than
///   `options.max_nesting`.
/// - `Error::GroupCycle` when `options.detect_cycles` is set and a reference
///   loops back.
/// - `Error::UnknownGroup` when the missing group policy is `Error`.
pub fn resolve_group(
    group: &Group,
    groups: &[Group],
    options: &DereferenceOptions,
) -> Result<Vec<String>> {
    let mut stack = vec![Frame::new(group, 0)];
    let mut flattened = Vec::new();

    while let Some(frame) = stack.last_mut() {
        let Some(entry) = frame.pending.next() else {
            // Splice the finished group into its referrer at the marker position
            if let Some(done) = stack.pop() {
                match stack.last_mut() {
                    Some(parent) => parent.resolved.extend(done.resolved),
                    None => flattened = done.resolved,
                }
            }
            continue;
        };

        let Some(name) = group_reference(entry) else {
            frame.resolved.push(entry.clone());
            continue;
        };

        let referrer = frame.name;
        let depth = frame.depth + 1;

        let Some(target) = groups.iter().find(|candidate| candidate.name == name) else {
            match options.missing_groups {
                MissingGroupPolicy::Ignore => {
                    warn!(
                        "Group {} references unknown group {}, reference resolves to no templates",
                        referrer, name
                    );
                    continue;
                }
                MissingGroupPolicy::Error => {
                    return Err(Error::UnknownGroup {
                        group: referrer.to_string(),
                        name: name.to_string(),
                    })
                }
            }
        };

        if options.detect_cycles && stack.iter().any(|open| open.name == name) {
            let mut path: Vec<&str> = stack.iter().map(|open| open.name).collect();
            path.push(name);
            return Err(Error::GroupCycle {
                cycle: path.join(" -> "),
            });
        }

        if depth > options.max_nesting {
            return Err(Error::MaxNestingExceeded {
                group: name.to_string(),
                limit: options.max_nesting,
            });
        }

        stack.push(Frame::new(target, depth));
    }

    Ok(flattened)
}
