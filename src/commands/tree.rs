//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays how template
//! groups reference each other before they are flattened.
//!
//! ## Functionality
//!
//! - **Reference Visualization**: Every `group:<name>` entry is shown as a
//!   subtree holding the entries of the referenced group.
//! - **Depth Control**: Supports `--depth` flag to limit how many levels of
//!   references are expanded.
//! - **Broken References**: Unknown groups and references back to a group
//!   already on the path are marked instead of expanded.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::path::Path;

use theme_manifest::defaults::group_reference;
use theme_manifest::loader::load_documents;
use theme_manifest::manifest::{Group, MergedManifest};
use theme_manifest::merge::merge_documents;
use theme_manifest::options::ManifestOptions;
use theme_manifest::suggestions;

/// Display how groups reference each other before flattening
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Only display this group.
    #[arg(short, long, value_name = "NAME")]
    pub group: Option<String>,

    /// Maximum depth of group references to expand.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the entries of each group itself.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
///
/// Loads and merges the manifests without flattening the groups, then prints
/// one tree per selected group.
pub fn execute(args: TreeArgs, manifest_dir: &Path, options: &ManifestOptions) -> Result<()> {
    println!("🌳 Template group tree for: {}", manifest_dir.display());

    let documents = load_documents(manifest_dir, options).map_err(suggestions::for_error)?;
    let merged = merge_documents(&documents).map_err(suggestions::for_error)?;

    let roots = select_groups(&merged, args.group.as_deref())?;
    let max_depth = args.depth.unwrap_or(usize::MAX);
    for group in roots {
        let node = build_tree_node(group, &merged, max_depth, &mut Vec::new());
        print_tree(&node).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    }

    Ok(())
}

fn select_groups<'a>(merged: &'a MergedManifest, name: Option<&str>) -> Result<Vec<&'a Group>> {
    match name {
        None => Ok(merged.groups.iter().collect()),
        Some(name) => match merged.group(name) {
            Some(group) => Ok(vec![group]),
            None => {
                let known: Vec<&str> = merged.groups.iter().map(|g| g.name.as_str()).collect();
                Err(suggestions::group_not_found(name, &known))
            }
        },
    }
}

/// Build a tree node for `group`. `path` holds the groups being expanded above it.
fn build_tree_node<'a>(
    group: &'a Group,
    merged: &'a MergedManifest,
    max_depth: usize,
    path: &mut Vec<&'a str>,
) -> TreeNode {
    path.push(&group.name);
    let children = group
        .templates
        .iter()
        .map(|entry| match group_reference(entry) {
            None => TreeNode::leaf(entry.clone()),
            Some(name) if path.contains(&name) => TreeNode::leaf(format!("{} (cycle)", entry)),
            Some(name) => match merged.group(name) {
                None => TreeNode::leaf(format!("{} (missing)", entry)),
                Some(_) if path.len() > max_depth => TreeNode::leaf(entry.clone()),
                Some(referenced) => {
                    let mut node = build_tree_node(referenced, merged, max_depth, path);
                    node.label = entry.clone();
                    node
                }
            },
        })
        .collect();
    path.pop();

    TreeNode {
        label: group.name.clone(),
        children,
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone, Debug)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: vec![],
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
