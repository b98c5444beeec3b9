//! refpress - VitePress API reference from Doxygen XML
//!
//! Reads the XML Doxygen writes for a C++ library and produces the
//! reference section of a VitePress site: a sidebar manifest with one
//! collapsible section per documented group, one markdown page per class,
//! and optionally the site's `config.mts`.

pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod output;
pub mod parser;
pub mod sidebar;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use inventory::Inventory;
pub use output::{GenerationReport, ReferenceGenerator};
pub use sidebar::{SidebarEntry, SidebarManifest, SidebarSection};
