// Manifest integrity checks
//
// Structural checks need only the manifest. Page checks also look at the
// docs tree: every link must have a page, and generated pages should be
// reachable from the sidebar.

use crate::error::Result;
use crate::output::is_generated_page;
use crate::sidebar::SidebarManifest;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How bad an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single integrity problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    DuplicateSection { text: String },
    DuplicateLink { link: String },
    DuplicateLabel { section: String, text: String },
    EmptySection { text: String },
    MissingPage { link: String, path: PathBuf },
    OrphanPage { path: PathBuf },
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::DuplicateSection { .. }
            | Issue::DuplicateLink { .. }
            | Issue::MissingPage { .. } => Severity::Error,
            Issue::DuplicateLabel { .. } | Issue::EmptySection { .. } | Issue::OrphanPage { .. } => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::DuplicateSection { text } => write!(f, "duplicate section label '{}'", text),
            Issue::DuplicateLink { link } => write!(f, "link '{}' appears more than once", link),
            Issue::DuplicateLabel { section, text } => {
                write!(f, "section '{}' has more than one entry labelled '{}'", section, text)
            }
            Issue::EmptySection { text } => write!(f, "section '{}' has no entries", text),
            Issue::MissingPage { link, path } => {
                write!(f, "link '{}' has no page (expected {})", link, path.display())
            }
            Issue::OrphanPage { path } => {
                write!(f, "generated page {} is not linked from the sidebar", path.display())
            }
        }
    }
}

/// Result of checking a manifest
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub issues: Vec<Issue>,
}

impl CheckReport {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Warning)
    }

    /// No errors; warnings are allowed
    pub fn is_clean(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} errors, {} warnings",
            self.errors().count(),
            self.warnings().count()
        )
    }
}

/// Structural checks on the manifest alone
pub fn validate(manifest: &SidebarManifest) -> CheckReport {
    let mut report = CheckReport::default();
    let mut section_labels = HashSet::new();
    let mut link_counts: HashMap<&str, usize> = HashMap::new();

    for section in manifest.sections() {
        if !section_labels.insert(section.text.as_str()) {
            report.issues.push(Issue::DuplicateSection {
                text: section.text.clone(),
            });
        }

        if section.items.is_empty() {
            report.issues.push(Issue::EmptySection {
                text: section.text.clone(),
            });
        }

        let mut labels = HashSet::new();
        for entry in &section.items {
            if !labels.insert(entry.text.as_str()) {
                report.issues.push(Issue::DuplicateLabel {
                    section: section.text.clone(),
                    text: entry.text.clone(),
                });
            }
            *link_counts.entry(entry.link.as_str()).or_insert(0) += 1;
        }
    }

    // Report duplicates once each, in manifest order
    let mut reported = HashSet::new();
    for link in manifest.links() {
        if link_counts[link] > 1 && reported.insert(link) {
            report.issues.push(Issue::DuplicateLink {
                link: link.to_string(),
            });
        }
    }

    report
}

/// Structural checks plus page existence and orphan detection
///
/// `src_root` is the directory VitePress serves pages from; `base_path` is
/// the URL prefix of the reference section.
pub fn check_pages(manifest: &SidebarManifest, src_root: &Path, base_path: &str) -> Result<CheckReport> {
    let mut report = validate(manifest);

    for link in manifest.links() {
        if !page_candidates(src_root, link).iter().any(|p| p.is_file()) {
            report.issues.push(Issue::MissingPage {
                link: link.to_string(),
                path: page_path(src_root, link),
            });
        }
    }

    let reference_dir = src_root.join(base_path.trim_matches('/'));
    if reference_dir.is_dir() {
        let linked: HashSet<PathBuf> = manifest.links().map(|l| page_path(src_root, l)).collect();

        let mut pages = Vec::new();
        for entry in WalkDir::new(&reference_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |e| e == "md") && is_generated_page(path)? {
                pages.push(path.to_path_buf());
            }
        }

        for page in pages {
            if !linked.contains(&page) {
                report.issues.push(Issue::OrphanPage { path: page });
            }
        }
    }

    Ok(report)
}

/// Markdown file a link resolves to (`/reference/math/vector2` -> `<src>/reference/math/vector2.md`)
pub fn page_path(src_root: &Path, link: &str) -> PathBuf {
    let path = link.split('#').next().unwrap_or(link).trim_matches('/');
    if link.ends_with('/') || path.is_empty() {
        src_root.join(path).join("index.md")
    } else {
        src_root.join(format!("{}.md", path))
    }
}

fn page_candidates(src_root: &Path, link: &str) -> Vec<PathBuf> {
    let path = link.split('#').next().unwrap_or(link).trim_matches('/');
    vec![
        page_path(src_root, link),
        src_root.join(path).join("index.md"),
    ]
}
