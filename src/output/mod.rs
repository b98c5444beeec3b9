// Output generation module
//
// Everything that lands on disk goes through `write_if_changed`, so a
// regeneration with identical input leaves file timestamps alone.

pub mod generator;
pub mod pages;
pub mod templates;
pub mod vitepress;

pub use generator::*;
pub use pages::*;
pub use templates::*;
pub use vitepress::*;

use crate::error::Result;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// First line of every generated reference page
pub const PAGE_HEADER: &str = "<!-- AUTO-GENERATED — do not edit. -->\n";

/// Write `content` to `path` unless the file already holds exactly that
///
/// Parent directories are created as needed. Returns whether the file was
/// written.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if path.is_file() && fs::read(path)? == content.as_bytes() {
        tracing::debug!(path = %path.display(), "unchanged");
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), "written");
    Ok(true)
}

/// Whether a markdown file was produced by this tool
pub fn is_generated_page(path: &Path) -> Result<bool> {
    let file = fs::File::open(path)?;
    let mut first = String::new();
    BufReader::new(file).read_line(&mut first)?;
    Ok(first.trim_end() == PAGE_HEADER.trim_end())
}
