//! Chrome bookmark import module
//!
//! Handles importing Netscape-format bookmark HTML exports (Chrome's
//! "Export bookmarks" output) into a workspace. Supports:
//! - Nested folder hierarchies with preserved ordering
//! - Flattening of Chrome's fixed top-level container folders
//! - HTML entity decoding in titles and folder names
//! - Silent skipping of `javascript:`/`chrome://`/invalid link URLs

mod import;

pub use import::*;
