use std::borrow::Cow;

use super::models::Node;

/// Filter a forest by a case-insensitive substring query.
///
/// Matches link titles, link URLs, and folder names. A folder survives
/// when its own name matches (children kept as-is) or when at least one
/// descendant survives, in which case only the surviving descendants are
/// kept. An empty or whitespace-only query is an identity: the input is
/// returned borrowed, no new tree is allocated.
pub fn filter_nodes<'a>(nodes: &'a [Node], query: &str) -> Cow<'a, [Node]> {
    let query = query.trim();
    if query.is_empty() {
        return Cow::Borrowed(nodes);
    }

    let needle = query.to_lowercase();
    Cow::Owned(filter_forest(nodes, &needle))
}

fn filter_forest(nodes: &[Node], needle: &str) -> Vec<Node> {
    let mut kept = Vec::new();

    for node in nodes {
        match node {
            Node::Link(link) => {
                if link.title.to_lowercase().contains(needle)
                    || link.url.to_lowercase().contains(needle)
                {
                    kept.push(node.clone());
                }
            }
            Node::Folder(folder) => {
                if folder.name.to_lowercase().contains(needle) {
                    kept.push(node.clone());
                    continue;
                }
                let children = filter_forest(&folder.children, needle);
                if !children.is_empty() {
                    let mut pruned = folder.clone();
                    pruned.children = children;
                    kept.push(Node::Folder(pruned));
                }
            }
        }
    }

    kept
}
