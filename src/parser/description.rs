// Doxygen description markup to markdown

use crate::inventory::Resolver;
use crate::parser::xml::XmlNode;

/// Renders `briefdescription` / `detaileddescription` trees as markdown
#[derive(Debug, Clone, Copy)]
pub struct DescriptionRenderer<'a> {
    resolver: Option<&'a Resolver>,
    fence_lang: &'a str,
}

impl<'a> DescriptionRenderer<'a> {
    pub fn new(resolver: Option<&'a Resolver>, fence_lang: &'a str) -> Self {
        Self {
            resolver,
            fence_lang,
        }
    }

    /// Paragraphs of a description, skipping parameter documentation
    pub fn paragraphs(&self, desc: Option<&XmlNode>) -> Vec<String> {
        let Some(desc) = desc else {
            return Vec::new();
        };

        let mut paras = Vec::new();
        collect_paras(desc, false, &mut paras);

        paras
            .into_iter()
            .map(|p| self.inlines(p))
            .filter(|md| !md.is_empty())
            .collect()
    }

    /// Paragraphs joined with blank lines
    pub fn markdown(&self, desc: Option<&XmlNode>) -> String {
        self.paragraphs(desc).join("\n\n")
    }

    /// Every paragraph under the node, parameter documentation included
    pub fn all_paragraphs(&self, desc: Option<&XmlNode>) -> Vec<String> {
        let Some(desc) = desc else {
            return Vec::new();
        };

        desc.descendants_named("para")
            .into_iter()
            .map(|p| self.inlines(p))
            .filter(|md| !md.is_empty())
            .collect()
    }

    /// Text of the `simplesect` blocks of a kind (`return`, `note`, ...)
    pub fn simplesects(&self, desc: Option<&XmlNode>, kind: &str) -> Vec<String> {
        let Some(desc) = desc else {
            return Vec::new();
        };

        desc.descendants_named("simplesect")
            .into_iter()
            .filter(|s| s.attr("kind") == Some(kind))
            .map(|s| self.all_paragraphs(Some(s)).join(" "))
            .filter(|md| !md.is_empty())
            .collect()
    }

    /// Inline markdown for one element, trimmed
    pub fn inlines(&self, node: &XmlNode) -> String {
        let mut out = String::new();
        self.walk(node, &mut out);
        out.trim().to_string()
    }

    fn walk(&self, node: &XmlNode, out: &mut String) {
        out.push_str(&node.text);

        for child in &node.children {
            match child.tag.as_str() {
                "emphasis" => out.push_str(&format!("*{}*", self.inlines(child))),
                "bold" => out.push_str(&format!("**{}**", self.inlines(child))),
                "computeroutput" => {
                    let code = self.inlines(child).replace('\n', " ");
                    out.push_str(&format!("`{}`", code));
                }
                "ref" => out.push_str(&self.reference(child)),
                "ulink" => {
                    let label = self.inlines(child);
                    match child.attr("url") {
                        Some(url) if !label.is_empty() => {
                            out.push_str(&format!("[{}]({})", label, url))
                        }
                        _ => out.push_str(&label),
                    }
                }
                "linebreak" => out.push_str("  \n"),
                "sp" => out.push(' '),
                "programlisting" => out.push_str(&self.program_listing(child)),
                "itemizedlist" => out.push_str(&self.list(child, false)),
                "orderedlist" => out.push_str(&self.list(child, true)),
                "simplesect" | "parameterlist" => {}
                _ => self.walk(child, out),
            }

            out.push_str(&child.tail);
        }
    }

    fn reference(&self, node: &XmlNode) -> String {
        let mut label = self.inlines(node);
        if label.is_empty() {
            label = node.text.clone();
        }

        match (self.resolver, node.attr("refid")) {
            (Some(resolver), Some(refid)) => resolver.link_md(refid, &label),
            _ => label,
        }
    }

    fn list(&self, node: &XmlNode, ordered: bool) -> String {
        let mut out = String::from("\n");
        for (i, item) in node.children_named("listitem").enumerate() {
            let text = self.all_paragraphs(Some(item)).join(" ");
            if ordered {
                out.push_str(&format!("{}. {}\n", i + 1, text));
            } else {
                out.push_str(&format!("- {}\n", text));
            }
        }
        out
    }

    /// Fenced code block from a `programlisting`
    pub fn program_listing(&self, listing: &XmlNode) -> String {
        let lines: Vec<String> = listing
            .children_named("codeline")
            .map(|line| {
                let mut pieces = String::new();
                code_walk(line, &mut pieces);
                pieces
            })
            .collect();

        let code = lines.join("\n");
        let code = code.trim_end_matches('\n');
        format!("\n```{}\n{}\n```\n", self.fence_lang, code)
    }
}

fn code_walk(node: &XmlNode, out: &mut String) {
    out.push_str(&node.text);
    for child in &node.children {
        match child.tag.as_str() {
            "sp" => out.push(' '),
            "linebreak" => out.push('\n'),
            _ => code_walk(child, out),
        }
        out.push_str(&child.tail);
    }
}

/// Top-level paragraphs outside parameter lists, in document order
fn collect_paras<'n>(node: &'n XmlNode, in_param: bool, out: &mut Vec<&'n XmlNode>) {
    let in_param = in_param || matches!(node.tag.as_str(), "parameterlist" | "parameterdescription");

    if node.tag == "para" {
        if !in_param {
            out.push(node);
        }
        return;
    }

    for child in &node.children {
        collect_paras(child, in_param, out);
    }
}
