//! Site structure and page rendering for the tspin guide engine.
//!
//! This crate provides:
//! - [`Site`]: unified document rendering, save operations and navigation
//! - [`NavNode`]/[`NavOrdering`]: ordered sidebar forest with injectable
//!   ordering tables
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use tspin_site::Site;
//! use tspin_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("content")));
//! let site = Arc::new(Site::new(storage));
//!
//! // Sidebar tree for the UI
//! let tree = site.navigation()?;
//!
//! // Render a page
//! let page = site.render("basics/overview")?;
//! # Ok(())
//! # }
//! ```

mod nav;
mod site;

pub use nav::{NavNode, NavOrdering};
pub use site::{
    BreadcrumbItem, EditorRenderResult, PageRenderResult, RenderError, Site,
};

// Re-exported for convenience so collaborators only need this crate.
pub use tspin_renderer::{Citation, Heading};
