// Reference generator
//
// Drives one run end to end: load the inventory, build and emit the sidebar
// manifest, render class pages, and optionally the VitePress site config.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::inventory::Inventory;
use crate::output::pages::{PageGenerator, PageReport};
use crate::output::templates::TemplateEngine;
use crate::output::vitepress::write_site_config;
use crate::parser::DoxygenSource;
use crate::sidebar::{validate, write_manifest, SidebarManifest};
use std::path::{Path, PathBuf};

/// Generates the reference section of a VitePress site
pub struct ReferenceGenerator {
    config: Config,
    template_engine: TemplateEngine,
    verbose: bool,
}

impl ReferenceGenerator {
    /// Create a new generator
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let template_engine = TemplateEngine::new()?;
        Ok(Self {
            config,
            template_engine,
            verbose: false,
        })
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open the XML directory and load the inventory with exclusions applied
    pub fn load(&self, xml_dir: &Path) -> Result<(DoxygenSource, Inventory)> {
        let source = DoxygenSource::open(xml_dir)?;
        let mut inventory = source.load_inventory()?;

        let excluded = inventory.exclude_groups(&self.config.reference.exclude_groups)?;
        if excluded > 0 {
            tracing::info!(excluded, "groups excluded by pattern");
        }

        Ok((source, inventory))
    }

    /// Build the manifest, refusing one that breaks its invariants
    pub fn manifest(&self, inventory: &Inventory) -> Result<SidebarManifest> {
        let manifest = SidebarManifest::from_inventory(inventory, &self.config.reference);

        let report = validate(&manifest);
        for issue in report.warnings() {
            tracing::warn!("{}", issue);
        }
        if let Some(issue) = report.errors().next() {
            return Err(Error::manifest(issue.to_string()));
        }

        Ok(manifest)
    }

    /// Run the full pipeline
    pub fn generate(&self, xml_dir: &Path) -> Result<GenerationReport> {
        let (source, inventory) = self.load(xml_dir)?;
        self.emit(&source, &inventory)
    }

    /// Render every page, then write the sidebar, the pages and the site config
    ///
    /// Nothing is written unless every page renders.
    pub fn emit(&self, source: &DoxygenSource, inventory: &Inventory) -> Result<GenerationReport> {
        let manifest = self.manifest(inventory)?;
        let mut report = GenerationReport {
            groups: manifest.len(),
            classes: manifest.entry_count(),
            ..Default::default()
        };

        let pages = PageGenerator::new(
            source,
            inventory,
            &self.config.reference,
            &self.template_engine,
            &self.config.src_root(),
        )
        .with_verbose(self.verbose);
        let rendered = pages.render_all()?;

        let sidebar_path = self.config.sidebar_path();
        report.sidebar_written = write_manifest(
            &manifest,
            &sidebar_path,
            self.config.reference.sidebar_format,
        )?;
        report.sidebar_path = sidebar_path;

        report.pages = pages.write(&rendered, self.config.output.prune)?;

        if self.config.site.emit_config {
            let (path, changed) = write_site_config(&self.template_engine, &self.config)?;
            tracing::debug!(path = %path.display(), changed, "site config");
            report.site_config = Some(changed);
        }

        Ok(report)
    }
}

/// Report of what was generated
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub groups: usize,
    pub classes: usize,
    pub sidebar_path: PathBuf,
    pub sidebar_written: bool,
    pub pages: PageReport,
    /// `Some(changed)` when the site config was rendered
    pub site_config: Option<bool>,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        format!(
            "Generated {} pages ({} written, {} unchanged, {} pruned), sidebar: {} sections, {}, site config: {}",
            self.pages.total(),
            self.pages.written,
            self.pages.unchanged,
            self.pages.pruned.len(),
            self.groups,
            if self.sidebar_written { "updated" } else { "unchanged" },
            match self.site_config {
                Some(true) => "updated",
                Some(false) => "unchanged",
                None => "no",
            }
        )
    }
}
