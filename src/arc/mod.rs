//! Arc browser import module
//!
//! Handles importing Arc's `StorableSidebar.json` into one workspace per
//! Arc space. The format is unversioned and reverse-engineered; the
//! importer tolerates nulls and missing fields everywhere below the
//! container level. Supports:
//! - Pinned-container resolution per space (unpinned tabs are never taken)
//! - `childrenIds`-ordered traversal with a `parentID` fallback
//! - Cycle-safe traversal of the flat item graph

mod import;

pub use import::*;
