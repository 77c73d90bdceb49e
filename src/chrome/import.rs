//! Chrome bookmark HTML import implementation
//!
//! Converts a Netscape-format bookmark file to a single workspace using a
//! line-by-line scanner with stack-based nesting. Parsing is best-effort:
//! malformed lines are skipped, never fatal.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use regex::Regex;
use thiserror::Error;

use crate::workspace::{
    count_nodes, is_importable_url, Folder, Link, Node, Workspace, WorkspaceColor,
};

/// Result of a Chrome bookmark import operation.
#[derive(Debug, Clone)]
pub struct ChromeImportResult {
    pub workspace: Workspace,
    pub links_imported: usize,
    pub folders_imported: usize,
}

/// Errors that can occur during Chrome bookmark import.
#[derive(Debug, Error)]
pub enum ChromeImportError {
    #[error("The selected file could not be found.")]
    FileNotFound,

    #[error("The selected file is not a valid Chrome bookmarks HTML file.")]
    InvalidHtml,

    #[error("No bookmarks were found in the file.")]
    NoBookmarksFound,

    #[error("Failed to parse Chrome bookmarks: {0}")]
    ParsingFailed(String),
}

/// Chrome's fixed top-level container folders. When one of these closes at
/// root depth its children are spliced directly into the root instead of
/// being wrapped in a folder.
const TOP_LEVEL_FOLDER_NAMES: [&str; 4] = [
    "Bookmarks bar",
    "Other bookmarks",
    "Mobile bookmarks",
    "Bookmarks Bar",
];

/// Import bookmarks from a Chrome bookmarks HTML export, synchronously.
///
/// Use [`import_chrome_bookmarks`] to run the same work on a blocking
/// worker thread.
pub fn import_chrome_file(path: &Path) -> Result<ChromeImportResult, ChromeImportError> {
    if !path.exists() {
        return Err(ChromeImportError::FileNotFound);
    }

    let content =
        fs::read_to_string(path).map_err(|e| ChromeImportError::ParsingFailed(e.to_string()))?;

    // Validate this is a Netscape bookmark file
    if !content.contains("NETSCAPE-Bookmark-file-1")
        && !content.contains("<DL>")
        && !content.contains("<dl>")
    {
        return Err(ChromeImportError::InvalidHtml);
    }

    let nodes = parse_bookmarks_html(&content);

    if nodes.is_empty() {
        return Err(ChromeImportError::NoBookmarksFound);
    }

    let counts = count_nodes(&nodes);
    info!(
        "Chrome import: {} links, {} folders",
        counts.links, counts.folders
    );

    let workspace = Workspace::new("Chrome Bookmarks".to_string(), WorkspaceColor::Ember, nodes);

    Ok(ChromeImportResult {
        workspace,
        links_imported: counts.links,
        folders_imported: counts.folders,
    })
}

/// Import Chrome bookmarks off the caller's context.
///
/// File read and parse run to completion on a blocking worker thread; the
/// result is handed back as an owned value. There is no cancellation and
/// no partial delivery: the call yields a complete tree or an error.
pub async fn import_chrome_bookmarks(
    path: PathBuf,
) -> Result<ChromeImportResult, ChromeImportError> {
    tokio::task::spawn_blocking(move || import_chrome_file(&path))
        .await
        .map_err(|e| ChromeImportError::ParsingFailed(format!("Import task failed: {}", e)))?
}

/// Parse bookmark HTML with a single forward pass over lines.
///
/// `stack` holds the forest being built at each nesting depth;
/// `folder_names` is the parallel stack of folder headers waiting for
/// their `</DL>`.
fn parse_bookmarks_html(content: &str) -> Vec<Node> {
    let folder_re = Regex::new(r"(?i)<DT><H3[^>]*>(.*?)</H3>").unwrap();
    let link_re = Regex::new(r#"(?i)<DT><A\s+HREF="([^"]*)"[^>]*>(.*?)</A>"#).unwrap();
    let dl_open_re = Regex::new(r"(?i)<DL>").unwrap();
    let dl_close_re = Regex::new(r"(?i)</DL>").unwrap();

    let mut stack: Vec<Vec<Node>> = vec![Vec::new()];
    let mut folder_names: Vec<String> = Vec::new();
    // Whether the last header line opened a folder (the next <DL> is its
    // contents).
    let mut pending_folder = false;

    for line in content.lines() {
        let trimmed = line.trim();

        // Folder header: <DT><H3 ...>Name</H3>
        if let Some(caps) = folder_re.captures(trimmed) {
            let mut name = decode_entities(&caps[1]);
            if name.is_empty() {
                name = "Untitled Folder".to_string();
            }
            folder_names.push(name);
            pending_folder = true;
            continue;
        }

        // Link: <DT><A HREF="url" ...>Title</A>
        if let Some(caps) = link_re.captures(trimmed) {
            let url = &caps[1];
            let mut title = decode_entities(&caps[2]);
            if title.is_empty() {
                title = "Untitled".to_string();
            }

            if !is_importable_url(url) {
                debug!("Skipping bookmark with invalid URL: {:?}", url);
                continue;
            }

            if let Some(top) = stack.last_mut() {
                top.push(Node::Link(Link::new(title, url.to_string())));
            }
            continue;
        }

        // <DL> begins folder contents
        if dl_open_re.is_match(trimmed) {
            if pending_folder {
                stack.push(Vec::new());
                pending_folder = false;
            }
            // With no pending folder this is structural (the outermost
            // list) and carries no nesting of its own.
            continue;
        }

        // </DL> ends folder contents. An underflowing close (malformed
        // nesting) is ignored rather than aborting the parse.
        if dl_close_re.is_match(trimmed) {
            if stack.len() > 1 && !folder_names.is_empty() {
                let children = stack.pop().unwrap_or_default();
                let name = folder_names.pop().unwrap_or_default();

                if stack.len() == 1 && TOP_LEVEL_FOLDER_NAMES.contains(&name.as_str()) {
                    // Flatten Chrome's container folder into the root
                    if let Some(top) = stack.last_mut() {
                        top.extend(children);
                    }
                } else if let Some(top) = stack.last_mut() {
                    top.push(Node::Folder(Folder::new(name, children)));
                }
            }
            continue;
        }
    }

    stack.into_iter().next().unwrap_or_default()
}

/// Decode the five entities the Netscape export format escapes.
///
/// Single pass: replacement text is emitted verbatim and never rescanned,
/// so a title written as `&amp;amp;` decodes to `&amp;` and no further.
fn decode_entities(input: &str) -> String {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
    ];

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let mut matched = false;
        for (entity, replacement) in ENTITIES {
            if rest.starts_with(entity) {
                out.push(replacement);
                rest = &rest[entity.len()..];
                matched = true;
                break;
            }
        }
        if !matched {
            out.push('&');
            rest = &rest[1..];
        }
    }

    out.push_str(rest);
    out
}
