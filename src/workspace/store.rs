use std::collections::HashSet;

use log::debug;
use thiserror::Error;
use uuid::Uuid;

use super::models::{is_importable_url, Folder, Link, Node, Workspace, WorkspaceColor};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(Uuid),

    #[error("Node not found: {0}")]
    NodeNotFound(Uuid),

    #[error("Node is not a folder: {0}")]
    NotAFolder(Uuid),

    #[error("No workspace is selected")]
    NoSelection,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// In-memory collection of workspaces and the current selection.
///
/// This is the single merge target for imported forests. All mutation goes
/// through `&mut self`; one writer context must own the store so the
/// id-uniqueness and ordering invariants hold.
#[derive(Debug, Default)]
pub struct WorkspaceStore {
    workspaces: Vec<Workspace>,
    selected_id: Option<Uuid>,
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn workspace(&self, id: Uuid) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn selected_workspace(&self) -> Option<&Workspace> {
        self.selected_id.and_then(|id| self.workspace(id))
    }

    /// Create an empty workspace and select it.
    pub fn create_workspace(&mut self, name: String, color_id: WorkspaceColor) -> Uuid {
        let name = non_empty_or(name, "Untitled");
        let workspace = Workspace::new(name, color_id, Vec::new());
        let id = workspace.id;
        self.workspaces.push(workspace);
        self.selected_id = Some(id);
        id
    }

    pub fn select_workspace(&mut self, id: Uuid) -> Result<()> {
        if self.workspace(id).is_none() {
            return Err(StoreError::WorkspaceNotFound(id));
        }
        self.selected_id = Some(id);
        Ok(())
    }

    pub fn rename_workspace(&mut self, id: Uuid, name: String) -> Result<()> {
        let workspace = self
            .workspaces
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(StoreError::WorkspaceNotFound(id))?;
        workspace.name = non_empty_or(name, "Untitled");
        Ok(())
    }

    pub fn delete_workspace(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .workspaces
            .iter()
            .position(|w| w.id == id)
            .ok_or(StoreError::WorkspaceNotFound(id))?;
        self.workspaces.remove(index);
        if self.selected_id == Some(id) {
            self.selected_id = self.workspaces.first().map(|w| w.id);
        }
        Ok(())
    }

    /// Add a link to the selected workspace, under `parent_id` or at the
    /// root. The URL must satisfy the same validity rules the importers
    /// enforce.
    pub fn add_link(&mut self, url: &str, title: &str, parent_id: Option<Uuid>) -> Result<Uuid> {
        if !is_importable_url(url) {
            return Err(StoreError::InvalidUrl(url.to_string()));
        }
        let title = non_empty_or(title.to_string(), "Untitled");
        let link = Link::new(title, url.to_string());
        let id = link.id;
        self.insert_node(Node::Link(link), parent_id)?;
        Ok(id)
    }

    /// Add an empty folder to the selected workspace.
    pub fn add_folder(&mut self, name: &str, parent_id: Option<Uuid>) -> Result<Uuid> {
        let name = non_empty_or(name.to_string(), "Untitled Folder");
        let folder = Folder::new(name, Vec::new());
        let id = folder.id;
        self.insert_node(Node::Folder(folder), parent_id)?;
        Ok(id)
    }

    pub fn rename_node(&mut self, id: Uuid, name: &str) -> Result<()> {
        let node = self
            .workspaces
            .iter_mut()
            .find_map(|w| find_node_mut(&mut w.nodes, id))
            .ok_or(StoreError::NodeNotFound(id))?;
        match node {
            Node::Link(link) => link.title = non_empty_or(name.to_string(), "Untitled"),
            Node::Folder(folder) => folder.name = non_empty_or(name.to_string(), "Untitled Folder"),
        }
        Ok(())
    }

    pub fn remove_node(&mut self, id: Uuid) -> Result<()> {
        for workspace in &mut self.workspaces {
            if remove_from(&mut workspace.nodes, id) {
                return Ok(());
            }
        }
        Err(StoreError::NodeNotFound(id))
    }

    pub fn set_folder_expanded(&mut self, id: Uuid, expanded: bool) -> Result<()> {
        let node = self
            .workspaces
            .iter_mut()
            .find_map(|w| find_node_mut(&mut w.nodes, id))
            .ok_or(StoreError::NodeNotFound(id))?;
        match node {
            Node::Folder(folder) => {
                folder.is_expanded = expanded;
                Ok(())
            }
            Node::Link(_) => Err(StoreError::NotAFolder(id)),
        }
    }

    /// Merge an imported workspace into the store as a new workspace and
    /// select it.
    ///
    /// Node ordering and imported node ids are preserved; a node whose id
    /// collides with one already merged gets a fresh id, its children are
    /// unaffected.
    pub fn merge_workspace(&mut self, imported: Workspace) -> Uuid {
        let Workspace {
            id,
            name,
            color_id,
            nodes,
            browser_profile,
        } = imported;

        let mut workspace = Workspace {
            id,
            name: non_empty_or(name, "Untitled"),
            color_id,
            nodes: Vec::new(),
            browser_profile,
        };

        let mut seen = HashSet::new();
        merge_into(&mut workspace.nodes, nodes, &mut seen);

        let id = workspace.id;
        self.workspaces.push(workspace);
        self.selected_id = Some(id);
        id
    }

    /// Merge a forest into the root of an existing workspace.
    ///
    /// Same identity rules as [`merge_workspace`]; the collision set is
    /// seeded with the ids already present in the target workspace.
    pub fn merge_forest(&mut self, workspace_id: Uuid, nodes: Vec<Node>) -> Result<()> {
        let workspace = self
            .workspaces
            .iter_mut()
            .find(|w| w.id == workspace_id)
            .ok_or(StoreError::WorkspaceNotFound(workspace_id))?;

        let mut seen = HashSet::new();
        collect_ids(&workspace.nodes, &mut seen);
        merge_into(&mut workspace.nodes, nodes, &mut seen);
        Ok(())
    }

    fn insert_node(&mut self, node: Node, parent_id: Option<Uuid>) -> Result<()> {
        let selected = self.selected_id.ok_or(StoreError::NoSelection)?;
        let workspace = self
            .workspaces
            .iter_mut()
            .find(|w| w.id == selected)
            .ok_or(StoreError::WorkspaceNotFound(selected))?;

        match parent_id {
            None => {
                workspace.nodes.push(node);
                Ok(())
            }
            Some(parent_id) => {
                match find_node_mut(&mut workspace.nodes, parent_id) {
                    Some(Node::Folder(folder)) => {
                        folder.children.push(node);
                        Ok(())
                    }
                    Some(Node::Link(_)) => Err(StoreError::NotAFolder(parent_id)),
                    None => Err(StoreError::NodeNotFound(parent_id)),
                }
            }
        }
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn find_node_mut(nodes: &mut [Node], id: Uuid) -> Option<&mut Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Folder(folder) = node {
            if let Some(found) = find_node_mut(&mut folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_from(nodes: &mut Vec<Node>, id: Uuid) -> bool {
    if let Some(index) = nodes.iter().position(|n| n.id() == id) {
        nodes.remove(index);
        return true;
    }
    for node in nodes {
        if let Node::Folder(folder) = node {
            if remove_from(&mut folder.children, id) {
                return true;
            }
        }
    }
    false
}

fn collect_ids(nodes: &[Node], seen: &mut HashSet<Uuid>) {
    for node in nodes {
        seen.insert(node.id());
        if let Node::Folder(folder) = node {
            collect_ids(&folder.children, seen);
        }
    }
}

fn merge_into(target: &mut Vec<Node>, nodes: Vec<Node>, seen: &mut HashSet<Uuid>) {
    for node in nodes {
        match node {
            Node::Link(mut link) => {
                if !seen.insert(link.id) {
                    debug!("Re-minting colliding link id {}", link.id);
                    link.id = Uuid::new_v4();
                    seen.insert(link.id);
                }
                target.push(Node::Link(link));
            }
            Node::Folder(mut folder) => {
                if !seen.insert(folder.id) {
                    debug!("Re-minting colliding folder id {}", folder.id);
                    folder.id = Uuid::new_v4();
                    seen.insert(folder.id);
                }
                let children = std::mem::take(&mut folder.children);
                merge_into(&mut folder.children, children, seen);
                target.push(Node::Folder(folder));
            }
        }
    }
}
