use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Fixed accent palette for workspaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkspaceColor {
    Sky,
    Ember,
    Moss,
    Lavender,
    Ocean,
    Slate,
}

impl Default for WorkspaceColor {
    fn default() -> Self {
        WorkspaceColor::Sky
    }
}

/// Palette order used when assigning colors to a batch of new workspaces.
pub const WORKSPACE_PALETTE: [WorkspaceColor; 6] = [
    WorkspaceColor::Sky,
    WorkspaceColor::Ember,
    WorkspaceColor::Moss,
    WorkspaceColor::Lavender,
    WorkspaceColor::Ocean,
    WorkspaceColor::Slate,
];

/// A single bookmark pointing at a URL.
///
/// The `url` is always non-empty and syntactically valid; candidates that
/// cannot satisfy that are dropped by the importers instead of being
/// constructed (see [`is_importable_url`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_path: Option<PathBuf>,
}

impl Link {
    pub fn new(title: String, url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            url,
            favicon_path: None,
        }
    }
}

/// A folder holding an ordered list of child nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    pub children: Vec<Node>,
    pub is_expanded: bool,
}

impl Folder {
    pub fn new(name: String, children: Vec<Node>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            children,
            is_expanded: false,
        }
    }
}

/// A node in the bookmark tree.
///
/// Child order is meaningful (display and re-import order) and ids are
/// unique within a tree. A folder never contains itself or an ancestor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Link(Link),
    Folder(Folder),
}

impl Node {
    pub fn id(&self) -> Uuid {
        match self {
            Node::Link(link) => link.id,
            Node::Folder(folder) => folder.id,
        }
    }

    /// The user-visible label: a link's title or a folder's name.
    pub fn label(&self) -> &str {
        match self {
            Node::Link(link) => &link.title,
            Node::Folder(folder) => &folder.name,
        }
    }
}

/// A named group of root-level nodes, one per imported browser space or
/// bookmark file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    pub color_id: WorkspaceColor,
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_profile: Option<String>,
}

impl Workspace {
    pub fn new(name: String, color_id: WorkspaceColor, nodes: Vec<Node>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color_id,
            nodes,
            browser_profile: None,
        }
    }
}

/// Link and folder totals for a forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeCounts {
    pub links: usize,
    pub folders: usize,
}

/// Count links and folders by walking a forest.
///
/// Import statistics are always recomputed from the final tree with this
/// walk, never accumulated during parsing, so reported counts match the
/// returned nodes.
pub fn count_nodes(nodes: &[Node]) -> NodeCounts {
    let mut counts = NodeCounts::default();

    for node in nodes {
        match node {
            Node::Link(_) => counts.links += 1,
            Node::Folder(folder) => {
                counts.folders += 1;
                let child_counts = count_nodes(&folder.children);
                counts.links += child_counts.links;
                counts.folders += child_counts.folders;
            }
        }
    }

    counts
}

/// Whether a candidate URL may become a [`Link`].
///
/// Links never carry an empty, `javascript:`, or `chrome://` URL, and the
/// URL must parse. Importers silently drop candidates that fail.
pub fn is_importable_url(url: &str) -> bool {
    !url.is_empty()
        && !url.starts_with("javascript:")
        && !url.starts_with("chrome://")
        && Url::parse(url).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(title: &str, url: &str) -> Node {
        Node::Link(Link::new(title.to_string(), url.to_string()))
    }

    #[test]
    fn test_count_nodes_walks_nested_folders() {
        let forest = vec![
            link("A", "https://a.com"),
            Node::Folder(Folder::new(
                "Outer".to_string(),
                vec![
                    link("B", "https://b.com"),
                    Node::Folder(Folder::new(
                        "Inner".to_string(),
                        vec![link("C", "https://c.com")],
                    )),
                ],
            )),
        ];

        let counts = count_nodes(&forest);
        assert_eq!(counts.links, 3);
        assert_eq!(counts.folders, 2);
    }

    #[test]
    fn test_count_nodes_empty_forest() {
        assert_eq!(count_nodes(&[]), NodeCounts::default());
    }

    #[test]
    fn test_is_importable_url() {
        assert!(is_importable_url("https://example.com"));
        assert!(is_importable_url("http://example.com/path?q=1"));
        assert!(!is_importable_url(""));
        assert!(!is_importable_url("javascript:void(0)"));
        assert!(!is_importable_url("chrome://settings"));
        assert!(!is_importable_url("not a url"));
    }

    #[test]
    fn test_node_serde_round_trip() {
        let forest = Node::Folder(Folder::new(
            "Work".to_string(),
            vec![link("Docs", "https://docs.example.com")],
        ));

        let json = serde_json::to_string(&forest).unwrap();
        assert!(json.contains("\"type\":\"folder\""));
        assert!(json.contains("\"isExpanded\":false"));

        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, forest);
    }

    #[test]
    fn test_workspace_serde_round_trip() {
        let workspace = Workspace::new(
            "Imported".to_string(),
            WorkspaceColor::Ember,
            vec![link("A", "https://a.com")],
        );

        let json = serde_json::to_string(&workspace).unwrap();
        assert!(json.contains("\"colorId\":\"ember\""));
        // Absent profile is omitted entirely
        assert!(!json.contains("browserProfile"));

        let back: Workspace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, workspace);
    }
}
