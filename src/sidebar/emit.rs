// Sidebar manifest serialization
//
// The TypeScript module wraps the pretty-printed JSON array so VitePress can
// import it with full typing. Reading accepts either form.

use crate::config::SidebarFormat;
use crate::error::{Error, Result};
use crate::output::write_if_changed;
use crate::sidebar::SidebarManifest;
use std::path::Path;

/// Comment on the first line of generated files
pub const GENERATED_BANNER: &str = "AUTO-GENERATED — do not edit.";

const EXPORT_NAME: &str = "referenceSidebar";

/// Render the manifest as a VitePress sidebar module
pub fn render_module(manifest: &SidebarManifest) -> Result<String> {
    let json = serde_json::to_string_pretty(manifest)?;
    Ok(format!(
        "// {banner}\n\
         import type {{ DefaultTheme }} from 'vitepress';\n\n\
         const {name}: DefaultTheme.SidebarItem[] = {json};\n\n\
         export default {name};\n",
        banner = GENERATED_BANNER,
        name = EXPORT_NAME,
        json = json,
    ))
}

/// Render the manifest as a bare JSON array
pub fn render_json(manifest: &SidebarManifest) -> Result<String> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

pub fn render(manifest: &SidebarManifest, format: SidebarFormat) -> Result<String> {
    match format {
        SidebarFormat::Ts => render_module(manifest),
        SidebarFormat::Json => render_json(manifest),
    }
}

/// Write the manifest, returning whether the file changed
pub fn write_manifest(manifest: &SidebarManifest, path: &Path, format: SidebarFormat) -> Result<bool> {
    let content = render(manifest, format)?;
    write_if_changed(path, &content)
}

/// Parse a previously emitted manifest (TypeScript module or JSON)
pub fn parse_manifest(source: &str) -> Result<SidebarManifest> {
    let trimmed = source.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| Error::manifest(format!("invalid JSON manifest: {}", e)));
    }

    let assign = source
        .find("SidebarItem[]")
        .and_then(|i| source[i..].find('=').map(|j| i + j + 1))
        .or_else(|| source.find("= [").map(|i| i + 1))
        .ok_or_else(|| Error::manifest("no sidebar array assignment found"))?;

    let body = &source[assign..];
    let start = body
        .find('[')
        .ok_or_else(|| Error::manifest("no array literal after assignment"))?;
    let end = body
        .rfind(']')
        .filter(|&end| end > start)
        .ok_or_else(|| Error::manifest("unterminated array literal"))?;

    serde_json::from_str(&body[start..=end])
        .map_err(|e| Error::manifest(format!("array literal is not JSON: {}", e)))
}

/// Read a manifest file from disk
pub fn read_manifest(path: &Path) -> Result<SidebarManifest> {
    if !path.is_file() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }
    let source = std::fs::read_to_string(path)?;
    parse_manifest(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidebar::{SidebarEntry, SidebarSection};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn manifest() -> SidebarManifest {
        SidebarManifest::from_sections(vec![SidebarSection::new("Math", true)
            .with_entry(SidebarEntry::new("Vector2", "/reference/math/vector2"))
            .with_entry(SidebarEntry::new("Vector3", "/reference/math/vector3"))])
    }

    #[test]
    fn test_render_module() {
        let ts = render_module(&manifest()).unwrap();
        let expected = r#"// AUTO-GENERATED — do not edit.
import type { DefaultTheme } from 'vitepress';

const referenceSidebar: DefaultTheme.SidebarItem[] = [
  {
    "text": "Math",
    "collapsed": true,
    "items": [
      {
        "text": "Vector2",
        "link": "/reference/math/vector2"
      },
      {
        "text": "Vector3",
        "link": "/reference/math/vector3"
      }
    ]
  }
];

export default referenceSidebar;
"#;
        assert_eq!(ts, expected);
    }

    #[test]
    fn test_non_ascii_written_verbatim() {
        let m = SidebarManifest::from_sections(vec![SidebarSection::new("Géométrie", false)
            .with_entry(SidebarEntry::new("Ébauche", "/reference/geometrie/ebauche"))]);
        let ts = render_module(&m).unwrap();
        assert!(ts.contains("\"Géométrie\""));
        assert!(!ts.contains("\\u"));
    }

    #[test]
    fn test_parse_module() {
        let ts = render_module(&manifest()).unwrap();
        assert_eq!(parse_manifest(&ts).unwrap(), manifest());
    }

    #[test]
    fn test_parse_json() {
        let json = render_json(&manifest()).unwrap();
        assert_eq!(parse_manifest(&json).unwrap(), manifest());
    }

    #[test]
    fn test_parse_missing_collapsed_defaults() {
        let m = parse_manifest(r#"[{"text": "Core", "items": []}]"#).unwrap();
        assert!(!m.sections()[0].collapsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_manifest("export default {};"),
            Err(Error::Manifest(_))
        ));
        assert!(matches!(
            parse_manifest("const s: DefaultTheme.SidebarItem[] = [ { text: 'x' } ];"),
            Err(Error::Manifest(_))
        ));
    }

    #[test]
    fn test_parse_malformed_json_is_manifest_error() {
        assert!(matches!(
            parse_manifest(r#"[{"text": 1}]"#),
            Err(Error::Manifest(_))
        ));
        assert!(matches!(
            parse_manifest(r#"[{"text": "Math", "items": ["#),
            Err(Error::Manifest(_))
        ));
    }

    #[test]
    fn test_write_manifest_if_changed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".vitepress/auto-reference-sidebar.ts");

        assert!(write_manifest(&manifest(), &path, SidebarFormat::Ts).unwrap());
        assert!(!write_manifest(&manifest(), &path, SidebarFormat::Ts).unwrap());
        assert_eq!(read_manifest(&path).unwrap(), manifest());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_manifest(Path::new("/nonexistent/sidebar.ts")).unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
    }
}
