//! Bookmark manager import core.
//!
//! Normalizes bookmark data exported by third-party browsers into a single
//! in-memory tree of [`Node`]s grouped into [`Workspace`]s:
//!
//! - [`chrome`] imports Chrome's Netscape-format bookmark HTML export
//! - [`arc`] imports Arc's `StorableSidebar.json`
//! - [`workspace`] holds the tree model, the search filter, and the
//!   [`WorkspaceStore`] that imported forests are merged into
//!
//! Data flow: raw file bytes go through a format-specific importer, which
//! returns an owned forest plus derived statistics (or a typed error);
//! the consumer then merges that forest into its live workspace store.
//! The importers are independent of each other and never touch application
//! state directly.

pub mod arc;
pub mod chrome;
pub mod workspace;

pub use arc::{import_arc_bookmarks, import_arc_file, ArcImportError, ArcImportResult};
pub use chrome::{
    import_chrome_bookmarks, import_chrome_file, ChromeImportError, ChromeImportResult,
};
pub use workspace::{
    count_nodes, filter_nodes, Folder, Link, Node, NodeCounts, StoreError, Workspace,
    WorkspaceColor, WorkspaceStore,
};
