// Template engine for reference pages and the VitePress config

use crate::config::SiteConfig;
use crate::error::Result;
use crate::parser::{escape_angle_brackets, ClassDoc};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

/// Template engine wrapping Tera with custom filters and templates
pub struct TemplateEngine {
    tera: Tera,
}

/// Values read by the site config template
#[derive(Debug, Serialize)]
pub struct ConfigContext<'a> {
    pub site: &'a SiteConfig,
    pub src_dir: String,
    /// `[tag, attrs, content?]` tuples in VitePress form
    pub head: Vec<Value>,
    pub reference_base: String,
    /// Import path of the sidebar module relative to `.vitepress/`
    pub sidebar_module: String,
    pub local_search: bool,
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("macros.md", include_str!("../../templates/macros.md.tera")),
            ("class.md", include_str!("../../templates/class.md.tera")),
            ("config.mts", include_str!("../../templates/config.mts.tera")),
        ])?;

        register_filters(&mut tera);
        Ok(Self { tera })
    }

    /// Render the markdown page of one class
    pub fn render_class(&self, class: &ClassDoc, fence_lang: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("class", class);
        context.insert("fence_lang", fence_lang);

        Ok(self.tera.render("class.md", &context)?)
    }

    /// Render `.vitepress/config.mts`
    pub fn render_config(&self, config: &ConfigContext<'_>) -> Result<String> {
        let context = Context::from_serialize(config)?;
        Ok(self.tera.render("config.mts", &context)?)
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("anchor", anchor);
    tera.register_filter("paragraphs", paragraphs);
    tera.register_filter("badge", badge);
    tera.register_filter("md_cell", md_cell);
    tera.register_filter("angle", angle);
}

/// Explicit heading id (`length` -> ` {#length}`)
fn anchor(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let id = value.as_str().unwrap_or("").trim();
    if id.is_empty() {
        return Ok(Value::String(String::new()));
    }
    Ok(Value::String(format!(" {{#{}}}", id)))
}

/// Join a list of paragraphs with blank lines
fn paragraphs(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match value {
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            Ok(Value::String(parts.join("\n\n")))
        }
        Value::String(s) => Ok(Value::String(s.trim().to_string())),
        Value::Null => Ok(Value::String(String::new())),
        other => Err(tera::Error::msg(format!(
            "paragraphs expects a list of strings, got {}",
            other
        ))),
    }
}

/// VitePress badge component
fn badge(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value.as_str().unwrap_or("");
    let kind = args.get("kind").and_then(|v| v.as_str()).unwrap_or("info");
    Ok(Value::String(format!(
        "<Badge type=\"{}\" text=\"{}\" />",
        kind,
        text.replace('"', "&quot;")
    )))
}

/// Make text safe inside a markdown table cell
fn md_cell(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value.as_str().unwrap_or("");
    let cell = s
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|");
    Ok(Value::String(cell))
}

fn angle(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(escape_angle_brackets(value.as_str().unwrap_or(""))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::PAGE_HEADER;
    use crate::parser::{FunctionDoc, NoteDoc, ParamDoc, VarDoc};

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn test_anchor() {
        let args = HashMap::new();
        assert_eq!(anchor(&s("length"), &args).unwrap(), s(" {#length}"));
        assert_eq!(anchor(&s(""), &args).unwrap(), s(""));
    }

    #[test]
    fn test_paragraphs() {
        let args = HashMap::new();
        let value = serde_json::json!(["First.", "  ", "Second."]);
        assert_eq!(paragraphs(&value, &args).unwrap(), s("First.\n\nSecond."));
        assert_eq!(paragraphs(&Value::Null, &args).unwrap(), s(""));
        assert!(paragraphs(&serde_json::json!(3), &args).is_err());
    }

    #[test]
    fn test_badge() {
        let mut args = HashMap::new();
        assert_eq!(
            badge(&s("static"), &args).unwrap(),
            s("<Badge type=\"info\" text=\"static\" />")
        );
        args.insert("kind".to_string(), s("tip"));
        assert_eq!(
            badge(&s("preferred"), &args).unwrap(),
            s("<Badge type=\"tip\" text=\"preferred\" />")
        );
    }

    #[test]
    fn test_md_cell() {
        let args = HashMap::new();
        assert_eq!(md_cell(&s("a | b\nc"), &args).unwrap(), s("a \\| b c"));
    }

    #[test]
    fn test_angle() {
        let args = HashMap::new();
        assert_eq!(angle(&s("operator<"), &args).unwrap(), s("operator&lt;"));
    }

    fn camera() -> ClassDoc {
        ClassDoc {
            id: "classgleam_1_1_camera".to_string(),
            name: "gleam::Camera".to_string(),
            display: "Camera".to_string(),
            kind: "class".to_string(),
            include: Some("gleam/camera.hpp".to_string()),
            brief: vec!["Base camera.".to_string()],
            notes: vec![NoteDoc {
                kind: "tip".to_string(),
                text: "Cameras are cheap to copy.".to_string(),
            }],
            variables: vec![VarDoc {
                id: "fov".to_string(),
                name: "fov".to_string(),
                anchor: "fov".to_string(),
                type_text: "float".to_string(),
                type_md: "float".to_string(),
                initializer: Some("60.0f".to_string()),
                brief: vec!["Vertical field of view.".to_string()],
                ..Default::default()
            }],
            functions: vec![FunctionDoc {
                id: "look_at".to_string(),
                name: "LookAt".to_string(),
                anchor: "lookat".to_string(),
                virtuality: "virtual".to_string(),
                signature: "virtual void LookAt(const Vector3& target)".to_string(),
                params: vec![ParamDoc {
                    name: "target".to_string(),
                    type_text: "const Vector3&".to_string(),
                    type_md: "const Vector3&".to_string(),
                    default: None,
                    description: "Point to face.".to_string(),
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_class_page() {
        let engine = TemplateEngine::new().unwrap();
        let page = engine.render_class(&camera(), "cpp").unwrap();

        assert!(page.starts_with(PAGE_HEADER));
        assert!(page.contains("# Camera\n"));
        assert!(page.contains("Base camera.\n"));
        assert!(page.contains("#include <gleam/camera.hpp>"));
        assert!(page.contains("::: tip\nCameras are cheap to copy.\n:::"));
        assert!(page.contains("## Properties"));
        assert!(page.contains("float fov = 60.0f;"));
        assert!(page.contains("## Functions"));
        assert!(page.contains("### LookAt() <Badge type=\"info\" text=\"virtual\" /> {#lookat}"));
        assert!(page.contains("| `target` | const Vector3& | Point to face. |"));
        assert!(!page.contains("## Constructors"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let engine = TemplateEngine::new().unwrap();
        let a = engine.render_class(&camera(), "cpp").unwrap();
        let b = engine.render_class(&camera(), "cpp").unwrap();
        assert_eq!(a, b);
    }
}
