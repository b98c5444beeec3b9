// Reference page generation
//
// Classes are parsed and rendered in parallel, then written one by one in
// inventory order so logs and reports are stable between runs.

use crate::config::ReferenceConfig;
use crate::error::Result;
use crate::inventory::{Inventory, Resolver};
use crate::output::templates::TemplateEngine;
use crate::output::{is_generated_page, write_if_changed};
use crate::parser::{ClassDocParser, DoxygenSource};
use crate::sidebar::page_path;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A rendered page not yet written
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub class_id: String,
    pub path: PathBuf,
    pub content: String,
}

/// What a page run did on disk
#[derive(Debug, Clone, Default)]
pub struct PageReport {
    pub written: usize,
    pub unchanged: usize,
    pub pruned: Vec<PathBuf>,
}

impl PageReport {
    pub fn total(&self) -> usize {
        self.written + self.unchanged
    }
}

/// Renders one markdown page per grouped class
pub struct PageGenerator<'a> {
    source: &'a DoxygenSource,
    inventory: &'a Inventory,
    reference: &'a ReferenceConfig,
    engine: &'a TemplateEngine,
    src_root: PathBuf,
    verbose: bool,
}

impl<'a> PageGenerator<'a> {
    pub fn new(
        source: &'a DoxygenSource,
        inventory: &'a Inventory,
        reference: &'a ReferenceConfig,
        engine: &'a TemplateEngine,
        src_root: &Path,
    ) -> Self {
        Self {
            source,
            inventory,
            reference,
            engine,
            src_root: src_root.to_path_buf(),
            verbose: false,
        }
    }

    /// Show a progress bar while rendering
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Page URL of a class, `None` for ungrouped classes
    fn class_link(&self, class_id: &str) -> Option<String> {
        let class = self.inventory.class(class_id)?;
        let group = self.inventory.group(class.group_id.as_deref()?)?;
        Some(format!(
            "{}{}/{}",
            self.reference.normalized_base(),
            group.slug,
            class.slug
        ))
    }

    /// Parse and render every page without touching the filesystem
    pub fn render_all(&self) -> Result<Vec<RenderedPage>> {
        let base = self.reference.normalized_base();
        let resolver = Resolver::new(self.inventory, &base);
        let parser = ClassDocParser::new(self.inventory, &resolver, &self.reference.fence_lang);

        let targets: Vec<(&str, String)> = self
            .inventory
            .grouped_classes()
            .filter_map(|c| self.class_link(&c.id).map(|link| (c.id.as_str(), link)))
            .collect();

        let progress = if self.verbose {
            let pb = ProgressBar::new(targets.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let pages = targets
            .par_iter()
            .map(|(class_id, link)| -> Result<Option<RenderedPage>> {
                let page = match self.source.compound_def(class_id)? {
                    Some(def) => {
                        let doc = parser.parse(&def);
                        tracing::debug!(class = %doc.name, "rendering page");
                        Some(RenderedPage {
                            class_id: class_id.to_string(),
                            path: page_path(&self.src_root, link),
                            content: self.engine.render_class(&doc, &self.reference.fence_lang)?,
                        })
                    }
                    None => {
                        tracing::warn!(refid = %class_id, "class compound has no compounddef, no page");
                        None
                    }
                };

                if let Some(ref pb) = progress {
                    pb.set_message(class_id.to_string());
                    pb.inc(1);
                }
                Ok(page)
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(pb) = progress {
            pb.finish_with_message("Rendering complete");
        }

        Ok(pages.into_iter().flatten().collect())
    }

    /// Write already rendered pages, optionally pruning stale generated pages
    pub fn write(&self, pages: &[RenderedPage], prune: bool) -> Result<PageReport> {
        let mut report = PageReport::default();

        for page in pages {
            if write_if_changed(&page.path, &page.content)? {
                report.written += 1;
            } else {
                report.unchanged += 1;
            }
        }

        if prune {
            let produced: HashSet<&Path> = pages.iter().map(|p| p.path.as_path()).collect();
            report.pruned = self.prune(&produced)?;
        }

        Ok(report)
    }

    /// Delete generated pages under the reference directory not in `keep`
    fn prune(&self, keep: &HashSet<&Path>) -> Result<Vec<PathBuf>> {
        let reference_dir = self
            .src_root
            .join(self.reference.normalized_base().trim_matches('/'));
        if !reference_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut stale = Vec::new();
        for entry in WalkDir::new(&reference_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |e| e != "md") {
                continue;
            }
            if !keep.contains(path) && is_generated_page(path)? {
                stale.push(path.to_path_buf());
            }
        }

        for path in &stale {
            tracing::info!(path = %path.display(), "pruning stale page");
            fs::remove_file(path)?;
        }

        Ok(stale)
    }
}
