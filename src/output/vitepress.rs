// VitePress site config (`.vitepress/config.mts`)

use crate::config::{Config, SearchProvider, SidebarFormat};
use crate::error::Result;
use crate::output::templates::{ConfigContext, TemplateEngine};
use crate::output::write_if_changed;
use serde_json::{json, Value};
use std::path::PathBuf;

/// File name of the rendered site config under `.vitepress/`
pub const SITE_CONFIG_FILE: &str = "config.mts";

/// Render the site config for the given settings
pub fn render_site_config(engine: &TemplateEngine, config: &Config) -> Result<String> {
    let sidebar_file = config.reference.sidebar_file_name();
    let sidebar_module = match config.reference.sidebar_format {
        SidebarFormat::Ts => sidebar_file
            .strip_suffix(".ts")
            .unwrap_or(&sidebar_file)
            .to_string(),
        SidebarFormat::Json => sidebar_file.clone(),
    };

    let context = ConfigContext {
        site: &config.site,
        src_dir: config.site.src_dir.to_string_lossy().replace('\\', "/"),
        head: config.site.head.iter().map(head_tuple).collect(),
        reference_base: config.reference.normalized_base(),
        sidebar_module,
        local_search: config.site.search == SearchProvider::Local,
    };

    engine.render_config(&context)
}

/// Render and write the site config, returning its path and whether it changed
pub fn write_site_config(engine: &TemplateEngine, config: &Config) -> Result<(PathBuf, bool)> {
    let path = config.vitepress_dir().join(SITE_CONFIG_FILE);
    let content = render_site_config(engine, config)?;
    let changed = write_if_changed(&path, &content)?;
    Ok((path, changed))
}

fn head_tuple(tag: &crate::config::HeadTag) -> Value {
    match &tag.content {
        Some(content) => json!([tag.tag, tag.attrs, content]),
        None => json!([tag.tag, tag.attrs]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FooterConfig, HeadTag, LogoConfig, NavLink};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn engine() -> TemplateEngine {
        TemplateEngine::new().unwrap()
    }

    #[test]
    fn test_default_site_config() {
        let config = Config::default();
        let out = render_site_config(&engine(), &config).unwrap();

        assert!(out.starts_with("// AUTO-GENERATED — do not edit.\n"));
        assert!(out.contains("import referenceSidebar from './auto-reference-sidebar';"));
        assert!(out.contains("  title: \"API Reference\",\n"));
        assert!(out.contains("  srcDir: \"pages\",\n"));
        assert!(out.contains("  head: [],\n"));
        assert!(out.contains("      \"/reference/\": referenceSidebar,\n"));
        assert!(out.contains("search: { provider: 'local' }"));
        assert!(!out.contains("description:"));
        assert!(!out.contains("footer:"));
        assert!(!out.contains("logo:"));
    }

    #[test]
    fn test_full_site_config() {
        let mut config = Config::default();
        config.site.title = "Gleam".to_string();
        config.site.description = Some("Rendering library".to_string());
        config.site.logo = Some(LogoConfig {
            light: "/logo.svg".to_string(),
            dark: None,
        });
        let mut attrs = BTreeMap::new();
        attrs.insert("rel".to_string(), "icon".to_string());
        attrs.insert("href".to_string(), "/favicon.ico".to_string());
        config.site.head = vec![HeadTag {
            tag: "link".to_string(),
            attrs,
            content: None,
        }];
        config.site.nav = vec![NavLink {
            text: "Guide".to_string(),
            link: "/guide/".to_string(),
        }];
        config.site.search = SearchProvider::None;
        config.site.footer = Some(FooterConfig {
            message: None,
            copyright: Some("MIT".to_string()),
        });
        config.reference.sidebar_format = SidebarFormat::Json;

        let out = render_site_config(&engine(), &config).unwrap();

        assert!(out.contains("import referenceSidebar from './auto-reference-sidebar.json';"));
        assert!(out.contains("  description: \"Rendering library\",\n"));
        assert!(out.contains(r#"head: [["link",{"href":"/favicon.ico","rel":"icon"}]],"#));
        assert!(out.contains(r#"logo: {"light":"/logo.svg"},"#));
        assert!(out.contains(r#"nav: [{"link":"/guide/","text":"Guide"}],"#)
            || out.contains(r#"nav: [{"text":"Guide","link":"/guide/"}],"#));
        assert!(out.contains(r#"footer: {"copyright":"MIT"},"#));
        assert!(!out.contains("search:"));
    }

    #[test]
    fn test_write_site_config() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.docs_root = dir.path().to_path_buf();

        let (path, changed) = write_site_config(&engine(), &config).unwrap();
        assert!(changed);
        assert_eq!(path, dir.path().join(".vitepress/config.mts"));

        let (_, changed) = write_site_config(&engine(), &config).unwrap();
        assert!(!changed);
    }
}
