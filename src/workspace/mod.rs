//! Workspace tree model
//!
//! The shared data model both importers produce and the application
//! consumes:
//! - `Node` (link or folder) and `Workspace` containers
//! - `WorkspaceStore`, the in-memory single-writer merge target
//! - `filter_nodes`, the case-insensitive search filter

mod filter;
mod models;
mod store;

pub use filter::*;
pub use models::*;
pub use store::*;
