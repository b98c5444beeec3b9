//! Sidebar manifest
//!
//! The navigation tree VitePress renders for the reference section: an
//! ordered list of sections, each an ordered list of label/link entries.
//! A manifest is built once, wholesale, from an [`Inventory`] and is only
//! read afterwards.

pub mod emit;
pub mod validate;

pub use emit::*;
pub use validate::*;

use crate::config::ReferenceConfig;
use crate::inventory::Inventory;
use serde::{Deserialize, Serialize};

/// One navigation link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarEntry {
    pub text: String,
    pub link: String,
}

/// One collapsible navigation category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarSection {
    pub text: String,
    #[serde(default)]
    pub collapsed: bool,
    /// Display order
    pub items: Vec<SidebarEntry>,
}

/// The ordered list of sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SidebarManifest {
    sections: Vec<SidebarSection>,
}

impl SidebarEntry {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }
}

impl SidebarSection {
    pub fn new(text: impl Into<String>, collapsed: bool) -> Self {
        Self {
            text: text.into(),
            collapsed,
            items: Vec::new(),
        }
    }

    /// Append an entry after the existing ones
    pub fn with_entry(mut self, entry: SidebarEntry) -> Self {
        self.items.push(entry);
        self
    }
}

impl SidebarManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manifest from sections in their final order
    pub fn from_sections(sections: Vec<SidebarSection>) -> Self {
        Self { sections }
    }

    /// Build the manifest for every group that has documented classes
    ///
    /// Sections follow group names and entries follow class names, both
    /// case-insensitively, so the same inventory always yields the same
    /// manifest.
    pub fn from_inventory(inventory: &Inventory, reference: &ReferenceConfig) -> Self {
        let base = reference.normalized_base();
        let mut manifest = Self::new();

        for group in inventory.sorted_groups() {
            let section = inventory
                .sorted_classes(group)
                .into_iter()
                .fold(SidebarSection::new(&group.name, reference.collapsed), |s, class| {
                    s.with_entry(SidebarEntry::new(
                        &class.display,
                        format!("{}{}/{}", base, group.slug, class.slug),
                    ))
                });

            if section.items.is_empty() {
                continue;
            }
            manifest.push_section(section);
        }

        manifest
    }

    /// Append a section after the existing ones
    pub fn push_section(&mut self, section: SidebarSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[SidebarSection] {
        &self.sections
    }

    pub fn section(&self, text: &str) -> Option<&SidebarSection> {
        self.sections.iter().find(|s| s.text == text)
    }

    /// Every entry with its section, in display order
    pub fn entries(&self) -> impl Iterator<Item = (&SidebarSection, &SidebarEntry)> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter().map(move |e| (s, e)))
    }

    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|(_, e)| e.link.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}
