//! Arc sidebar import implementation
//!
//! Arc stores its sidebar as a flat item graph: spaces reference container
//! ids, items reference each other through `parentID` and `childrenIds`.
//! The two do not always agree: `childrenIds` is the authoritative,
//! ordered side of the relationship and always wins. Items are indexed by
//! id before traversal and each space's forest is built from its pinned
//! container only.
//!
//! Null tolerance is deliberate: a missing leaf field degrades to a
//! sentinel value or skips one item, never the whole import. An earlier
//! revision aborted the entire import on a single null `savedTitle`.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::workspace::{
    count_nodes, is_importable_url, Folder, Link, Node, Workspace, WORKSPACE_PALETTE,
};

/// Result of an Arc sidebar import operation.
#[derive(Debug, Clone)]
pub struct ArcImportResult {
    pub workspaces: Vec<Workspace>,
    pub workspaces_created: usize,
    pub links_imported: usize,
    pub folders_imported: usize,
}

/// Errors that can occur during Arc sidebar import.
///
/// Only structural problems are fatal; field-level nulls never are.
#[derive(Debug, Error)]
pub enum ArcImportError {
    #[error("The Arc sidebar file could not be found.")]
    FileNotFound,

    #[error("The Arc sidebar file could not be read as JSON: {0}")]
    InvalidJson(String),

    #[error("No sidebar data was found in the file.")]
    NoDataContainer,

    #[error("Failed to parse Arc sidebar: {0}")]
    ParsingFailed(String),
}

// Input schema for StorableSidebar.json. Every leaf field is optional so
// nulls and omissions deserialize cleanly.

#[derive(Debug, Default, Deserialize)]
struct StorableSidebar {
    #[serde(default)]
    sidebar: Option<Sidebar>,
}

#[derive(Debug, Default, Deserialize)]
struct Sidebar {
    #[serde(default)]
    containers: Vec<SidebarContainer>,
}

/// One entry of `sidebar.containers`. Arc's global container carries
/// neither spaces nor items and deserializes with both empty.
#[derive(Debug, Default, Deserialize)]
struct SidebarContainer {
    #[serde(default)]
    spaces: Vec<Space>,
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Space {
    #[serde(default)]
    #[allow(dead_code)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "containerIDs")]
    container_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "parentID")]
    parent_id: Option<String>,
    #[serde(default, rename = "childrenIds")]
    children_ids: Option<Vec<String>>,
    #[serde(default)]
    data: Option<ItemData>,
}

#[derive(Debug, Default, Deserialize)]
struct ItemData {
    #[serde(default)]
    tab: Option<TabData>,
}

#[derive(Debug, Default, Deserialize)]
struct TabData {
    #[serde(default, rename = "savedTitle")]
    saved_title: Option<String>,
    #[serde(default, rename = "savedURL")]
    saved_url: Option<String>,
    #[serde(default, rename = "timeLastActiveAt")]
    #[allow(dead_code)]
    time_last_active_at: Option<f64>,
}

/// Import Arc bookmarks from a `StorableSidebar.json`, synchronously.
///
/// Use [`import_arc_bookmarks`] to run the same work on a blocking worker
/// thread.
pub fn import_arc_file(path: &Path) -> Result<ArcImportResult, ArcImportError> {
    if !path.exists() {
        return Err(ArcImportError::FileNotFound);
    }

    let content = fs::read_to_string(path).map_err(|e| ArcImportError::InvalidJson(e.to_string()))?;
    let document: StorableSidebar =
        serde_json::from_str(&content).map_err(|e| ArcImportError::InvalidJson(e.to_string()))?;

    let sidebar = document.sidebar.ok_or(ArcImportError::NoDataContainer)?;

    let mut workspaces = Vec::new();
    let mut found_data_container = false;

    for container in &sidebar.containers {
        if container.spaces.is_empty() && container.items.is_empty() {
            // Global container, or an empty shell
            continue;
        }
        found_data_container = true;

        let lookup = build_item_lookup(&container.items);
        for (index, space) in container.spaces.iter().enumerate() {
            workspaces.push(build_space_workspace(
                space,
                index,
                &container.items,
                &lookup,
            ));
        }
    }

    if !found_data_container {
        return Err(ArcImportError::NoDataContainer);
    }

    let mut links_imported = 0;
    let mut folders_imported = 0;
    for workspace in &workspaces {
        let counts = count_nodes(&workspace.nodes);
        links_imported += counts.links;
        folders_imported += counts.folders;
    }

    info!(
        "Arc import: {} workspaces, {} links, {} folders",
        workspaces.len(),
        links_imported,
        folders_imported
    );

    Ok(ArcImportResult {
        workspaces_created: workspaces.len(),
        workspaces,
        links_imported,
        folders_imported,
    })
}

/// Import Arc bookmarks off the caller's context.
///
/// File read and parse run to completion on a blocking worker thread; the
/// result is handed back as an owned value. No cancellation, no partial
/// delivery.
pub async fn import_arc_bookmarks(path: PathBuf) -> Result<ArcImportResult, ArcImportError> {
    tokio::task::spawn_blocking(move || import_arc_file(&path))
        .await
        .map_err(|e| ArcImportError::ParsingFailed(format!("Import task failed: {}", e)))?
}

fn build_item_lookup(items: &[Item]) -> HashMap<&str, &Item> {
    let mut lookup = HashMap::new();
    for item in items {
        if let Some(id) = item.id.as_deref() {
            lookup.insert(id, item);
        }
    }
    lookup
}

fn build_space_workspace(
    space: &Space,
    index: usize,
    items: &[Item],
    lookup: &HashMap<&str, &Item>,
) -> Workspace {
    let name = space
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Untitled".to_string());
    let color = WORKSPACE_PALETTE[index % WORKSPACE_PALETTE.len()];

    let nodes = match pinned_container_id(&space.container_ids) {
        Some(container_id) => {
            let mut visited = HashSet::new();
            visited.insert(container_id.to_string());
            resolve_children(container_id, items, lookup, &mut visited)
        }
        None => {
            debug!("Space {:?} has no pinned container id", name);
            Vec::new()
        }
    };

    Workspace::new(name, color, nodes)
}

/// The pinned container id is the entry immediately after the literal
/// `"pinned"` token. Real exports commonly order the list
/// `["unpinned", <id>, "pinned", <id>]`; entries before the token belong
/// to the unpinned container and are never traversed.
fn pinned_container_id(container_ids: &[String]) -> Option<&str> {
    let position = container_ids.iter().position(|id| id == "pinned")?;
    container_ids.get(position + 1).map(String::as_str)
}

/// Resolve the ordered children of `parent_id` into nodes.
///
/// When the parent exists in the lookup map with a non-empty
/// `childrenIds`, that list is authoritative, even when a child's own `parentID`
/// may legitimately point elsewhere. Otherwise every item whose
/// `parentID` matches is collected in items-array order as a last resort.
///
/// `visited` is shared across the whole space traversal: it breaks cycles
/// in the item graph and ensures an item claimed by some folder's
/// `childrenIds` never also surfaces through the `parentID` fallback.
fn resolve_children(
    parent_id: &str,
    items: &[Item],
    lookup: &HashMap<&str, &Item>,
    visited: &mut HashSet<String>,
) -> Vec<Node> {
    let child_ids: Vec<&str> = match lookup.get(parent_id) {
        Some(parent) if parent.children_ids.as_ref().is_some_and(|ids| !ids.is_empty()) => parent
            .children_ids
            .as_ref()
            .map(|ids| ids.iter().map(String::as_str).collect())
            .unwrap_or_default(),
        _ => items
            .iter()
            .filter(|item| item.parent_id.as_deref() == Some(parent_id))
            .filter_map(|item| item.id.as_deref())
            .collect(),
    };

    let mut nodes = Vec::new();

    for child_id in child_ids {
        if visited.contains(child_id) {
            debug!("Skipping already-visited item {}", child_id);
            continue;
        }
        let Some(item) = lookup.get(child_id) else {
            continue;
        };
        visited.insert(child_id.to_string());

        match item.data.as_ref().and_then(|data| data.tab.as_ref()) {
            Some(tab) => {
                // A saved tab is a link. No usable URL means this one item
                // is dropped; the import carries on.
                let Some(url) = tab.saved_url.as_deref().filter(|u| is_importable_url(u)) else {
                    debug!("Skipping Arc tab {} without a usable saved URL", child_id);
                    continue;
                };
                let title = tab
                    .saved_title
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Untitled".to_string());
                nodes.push(Node::Link(Link::new(title, url.to_string())));
            }
            None => {
                let name = item
                    .title
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Untitled Folder".to_string());
                let children = resolve_children(child_id, items, lookup, visited);
                nodes.push(Node::Folder(Folder::new(name, children)));
            }
        }
    }

    nodes
}
