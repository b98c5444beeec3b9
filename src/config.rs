use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "refpress.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub reference: ReferenceConfig,
    pub output: OutputConfig,
}

/// Top-level site options handed to VitePress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: Option<String>,
    pub lang: String,
    pub base: String,
    /// Directory under the docs root holding the markdown sources
    pub src_dir: PathBuf,
    pub logo: Option<LogoConfig>,
    pub head: Vec<HeadTag>,
    pub nav: Vec<NavLink>,
    pub search: SearchProvider,
    pub footer: Option<FooterConfig>,
    /// Render `.vitepress/config.mts`
    pub emit_config: bool,
}

/// Logo paths for light and dark themes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoConfig {
    pub light: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
}

/// A tag injected into every page's `<head>`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeadTag {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A top navigation link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavLink {
    pub text: String,
    pub link: String,
}

/// Footer text
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FooterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Search provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    #[default]
    Local,
    None,
}

/// Reference section settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// URL prefix of every reference page
    pub base_path: String,
    /// Whether sidebar sections start collapsed
    pub collapsed: bool,
    /// File name of the sidebar module under `.vitepress/`
    pub sidebar_file: String,
    pub sidebar_format: SidebarFormat,
    /// Glob patterns matched against group names
    pub exclude_groups: Vec<String>,
    /// Language tag for code listings
    pub fence_lang: String,
}

/// Sidebar output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SidebarFormat {
    #[default]
    Ts,
    Json,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory containing `.vitepress/`
    pub docs_root: PathBuf,
    /// Remove generated pages that are no longer produced
    pub prune: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "API Reference".to_string(),
            description: None,
            lang: "en-US".to_string(),
            base: "/".to_string(),
            src_dir: PathBuf::from("pages"),
            logo: None,
            head: Vec::new(),
            nav: Vec::new(),
            search: SearchProvider::default(),
            footer: None,
            emit_config: false,
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            base_path: "/reference/".to_string(),
            collapsed: true,
            sidebar_file: "auto-reference-sidebar.ts".to_string(),
            sidebar_format: SidebarFormat::default(),
            exclude_groups: Vec::new(),
            fence_lang: "cpp".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            docs_root: PathBuf::from("docs"),
            prune: false,
        }
    }
}

impl ReferenceConfig {
    /// Base path with exactly one leading and one trailing slash
    pub fn normalized_base(&self) -> String {
        let trimmed = self.base_path.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        }
    }

    /// Sidebar file name adjusted to the configured format
    pub fn sidebar_file_name(&self) -> String {
        let stem = self
            .sidebar_file
            .strip_suffix(".ts")
            .or_else(|| self.sidebar_file.strip_suffix(".json"))
            .unwrap_or(&self.sidebar_file);
        match self.sidebar_format {
            SidebarFormat::Ts => format!("{}.ts", stem),
            SidebarFormat::Json => format!("{}.json", stem),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file, or return defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Directory holding the page sources (`<docs_root>/<src_dir>`)
    pub fn src_root(&self) -> PathBuf {
        self.output.docs_root.join(&self.site.src_dir)
    }

    /// Directory holding VitePress config files
    pub fn vitepress_dir(&self) -> PathBuf {
        self.output.docs_root.join(".vitepress")
    }

    /// Path of the generated sidebar module
    pub fn sidebar_path(&self) -> PathBuf {
        self.vitepress_dir().join(self.reference.sidebar_file_name())
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        docs_root: Option<PathBuf>,
        base_path: Option<String>,
        format: Option<String>,
        expanded: bool,
        site_config: bool,
        prune: bool,
    ) {
        if let Some(root) = docs_root {
            self.output.docs_root = root;
        }

        if let Some(base) = base_path {
            self.reference.base_path = base;
        }

        if let Some(fmt) = format {
            self.reference.sidebar_format = match fmt.as_str() {
                "json" => SidebarFormat::Json,
                _ => SidebarFormat::Ts,
            };
        }

        if expanded {
            self.reference.collapsed = false;
        }

        if site_config {
            self.site.emit_config = true;
        }

        if prune {
            self.output.prune = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.reference.base_path.starts_with('/') {
            return Err(Error::config_validation("base_path must start with '/'"));
        }

        let sidebar_file = self.reference.sidebar_file.trim();
        if sidebar_file.is_empty() {
            return Err(Error::config_validation("sidebar_file cannot be empty"));
        }

        if sidebar_file.contains('/') || sidebar_file.contains('\\') {
            return Err(Error::config_validation(
                "sidebar_file must be a file name, not a path",
            ));
        }

        if self.site.src_dir.is_absolute() {
            return Err(Error::config_validation("src_dir must be relative to the docs root"));
        }

        for pattern in &self.reference.exclude_groups {
            glob::Pattern::new(pattern)?;
        }

        Ok(())
    }
}
