// Class page content extracted from a class compound
//
// Only public members are kept. Types are stored twice: plain text for code
// blocks and markdown with cross-reference links for headings.

use crate::inventory::{display_name, slugify, Inventory, Resolver};
use crate::parser::description::DescriptionRenderer;
use crate::parser::xml::XmlNode;
use serde::Serialize;

/// One piece of a `<type>` element
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TypePart {
    pub text: String,
    pub refid: Option<String>,
}

/// A C++ type as written in the declaration
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TypeRef {
    pub parts: Vec<TypePart>,
}

/// A documented function or constructor
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FunctionDoc {
    pub id: String,
    pub name: String,
    pub anchor: String,
    pub is_static: bool,
    /// `non-virtual`, `virtual` or `pure-virtual`
    pub virtuality: String,
    pub return_text: String,
    pub return_md: String,
    pub signature: String,
    pub params: Vec<ParamDoc>,
    pub brief: Vec<String>,
    pub details: Vec<String>,
    pub returns: Option<String>,
}

/// A function parameter
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ParamDoc {
    pub name: String,
    pub type_text: String,
    pub type_md: String,
    pub default: Option<String>,
    pub description: String,
}

/// A public data member
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct VarDoc {
    pub id: String,
    pub name: String,
    pub anchor: String,
    pub is_static: bool,
    pub type_text: String,
    pub type_md: String,
    pub initializer: Option<String>,
    pub brief: Vec<String>,
    pub details: Vec<String>,
}

/// A member enum
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct EnumDoc {
    pub id: String,
    pub name: String,
    pub anchor: String,
    pub scoped: bool,
    pub brief: Vec<String>,
    pub details: Vec<String>,
    pub values: Vec<EnumValueDoc>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct EnumValueDoc {
    pub name: String,
    pub brief: String,
}

/// A member typedef or alias
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TypedefDoc {
    pub id: String,
    pub name: String,
    pub anchor: String,
    pub definition: String,
    pub brief: Vec<String>,
}

/// An admonition attached to the class description
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NoteDoc {
    /// VitePress container kind (`tip`, `warning`, `info`)
    pub kind: String,
    pub text: String,
}

/// Everything rendered on one class page
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ClassDoc {
    pub id: String,
    pub name: String,
    pub display: String,
    /// `class` or `struct`
    pub kind: String,
    pub include: Option<String>,
    /// Base classes, linked where they have a page
    pub bases: Vec<String>,
    pub brief: Vec<String>,
    pub details: Vec<String>,
    pub notes: Vec<NoteDoc>,
    pub constructors: Vec<FunctionDoc>,
    pub factories: Vec<FunctionDoc>,
    pub functions: Vec<FunctionDoc>,
    pub variables: Vec<VarDoc>,
    pub enums: Vec<EnumDoc>,
    pub typedefs: Vec<TypedefDoc>,
}

impl TypeRef {
    /// Collect type parts, dropping specifiers that leak into `<type>`
    pub fn from_node(node: Option<&XmlNode>) -> Self {
        let Some(node) = node else {
            return Self::default();
        };

        let mut parts = Vec::new();
        if !node.text.is_empty() {
            parts.push(TypePart {
                text: node.text.clone(),
                refid: None,
            });
        }

        for child in &node.children {
            parts.push(TypePart {
                text: child.text_content(),
                refid: if child.tag == "ref" {
                    child.attr("refid").map(str::to_string)
                } else {
                    None
                },
            });
            if !child.tail.is_empty() {
                parts.push(TypePart {
                    text: child.tail.clone(),
                    refid: None,
                });
            }
        }

        parts.retain(|p| !matches!(p.text.trim(), "override" | "=0" | "= 0"));
        Self { parts }
    }

    /// Plain declaration text
    pub fn as_text(&self) -> String {
        let raw: String = self.parts.iter().map(|p| p.text.as_str()).collect();
        tighten(&raw)
    }

    /// Markdown with linked parts and escaped angle brackets
    pub fn as_markdown(&self, resolver: &Resolver) -> String {
        let mut out = String::new();
        for part in &self.parts {
            let text = escape_angle_brackets(&part.text);
            match &part.refid {
                Some(refid) => out.push_str(&resolver.link_md(refid, text.trim())),
                None => out.push_str(&text),
            }
        }
        tighten(&out)
    }

    pub fn is_empty(&self) -> bool {
        self.as_text().is_empty()
    }
}

/// Builds [`ClassDoc`]s from class compounds
pub struct ClassDocParser<'a> {
    inventory: &'a Inventory,
    resolver: &'a Resolver,
    descriptions: DescriptionRenderer<'a>,
}

impl<'a> ClassDocParser<'a> {
    pub fn new(inventory: &'a Inventory, resolver: &'a Resolver, fence_lang: &'a str) -> Self {
        Self {
            inventory,
            resolver,
            descriptions: DescriptionRenderer::new(Some(resolver), fence_lang),
        }
    }

    /// Parse a `compounddef` element
    pub fn parse(&self, def: &XmlNode) -> ClassDoc {
        let name = def.child_text("compoundname").trim().to_string();
        let display = display_name(&name).to_string();

        let bases = def
            .children_named("basecompoundref")
            .filter(|b| b.attr("prot").unwrap_or("public") == "public")
            .map(|b| {
                let label = b.text.trim();
                match b.attr("refid") {
                    Some(refid) => self.resolver.link_md(refid, label),
                    None => escape_angle_brackets(label),
                }
            })
            .collect();

        let detailed = def.child("detaileddescription");
        let mut notes = Vec::new();
        for (sect, kind) in [("note", "tip"), ("warning", "warning"), ("attention", "warning"), ("see", "info")] {
            for text in self.descriptions.simplesects(detailed, sect) {
                notes.push(NoteDoc {
                    kind: kind.to_string(),
                    text,
                });
            }
        }

        let mut doc = ClassDoc {
            id: def.attr("id").unwrap_or_default().to_string(),
            kind: def.attr("kind").unwrap_or("class").to_string(),
            include: def
                .child("includes")
                .map(|i| i.text.trim().to_string())
                .filter(|s| !s.is_empty()),
            bases,
            brief: self.descriptions.paragraphs(def.child("briefdescription")),
            details: self.descriptions.paragraphs(detailed),
            notes,
            name,
            display,
            ..Default::default()
        };

        for section in def.children_named("sectiondef") {
            for member in section.children_named("memberdef") {
                if member.attr("prot") != Some("public") {
                    continue;
                }

                match member.attr("kind") {
                    Some("variable") => doc.variables.push(self.variable(member)),
                    Some("function") => self.classify_function(&mut doc, member),
                    Some("enum") => doc.enums.push(self.enumeration(member)),
                    Some("typedef") => doc.typedefs.push(self.typedef(member)),
                    _ => {}
                }
            }
        }

        doc
    }

    fn classify_function(&self, doc: &mut ClassDoc, member: &XmlNode) {
        if is_defaulted_or_deleted(member) {
            return;
        }

        let name = member.child_text("name").trim();
        let return_type = TypeRef::from_node(member.child("type"));

        if name == doc.display || return_type.is_empty() {
            // destructors have no return type either
            if !name.starts_with('~') {
                doc.constructors.push(self.function(member));
            }
            return;
        }

        let func = self.function(member);
        if func.is_static && return_type.as_text().contains(doc.display.as_str()) {
            doc.factories.push(func);
        } else {
            doc.functions.push(func);
        }
    }

    fn anchor(&self, member: &XmlNode, name: &str) -> String {
        member
            .attr("id")
            .and_then(|id| self.inventory.members.get(id))
            .map(|m| m.anchor.clone())
            .unwrap_or_else(|| slugify(name))
    }

    fn function(&self, member: &XmlNode) -> FunctionDoc {
        let name = member.child_text("name").trim().to_string();
        let return_type = TypeRef::from_node(member.child("type"));
        let detailed = member.child("detaileddescription");
        let param_docs = self.param_descriptions(detailed);

        let params = member
            .children_named("param")
            .map(|p| {
                let mut pname = p.child_text("declname").trim().to_string();
                if pname.is_empty() {
                    pname = p.child_text("defname").trim().to_string();
                }
                let ty = TypeRef::from_node(p.child("type"));
                let default = p
                    .child("defval")
                    .map(|d| tighten(&d.text_content()))
                    .filter(|d| !d.is_empty());
                let description = param_docs
                    .iter()
                    .find(|(n, _)| *n == pname)
                    .map(|(_, d)| d.clone())
                    .unwrap_or_default();
                ParamDoc {
                    type_text: ty.as_text(),
                    type_md: ty.as_markdown(self.resolver),
                    name: pname,
                    default,
                    description,
                }
            })
            .collect();

        let signature = format!(
            "{}{}",
            member.child_text("definition"),
            member.child_text("argsstring")
        );

        FunctionDoc {
            id: member.attr("id").unwrap_or_default().to_string(),
            anchor: self.anchor(member, &name),
            is_static: member.bool_attr("static"),
            virtuality: member.attr("virt").unwrap_or("non-virtual").to_string(),
            return_text: return_type.as_text(),
            return_md: return_type.as_markdown(self.resolver),
            signature: tighten(&signature),
            params,
            brief: self.descriptions.paragraphs(member.child("briefdescription")),
            details: self.descriptions.paragraphs(detailed),
            returns: self.descriptions.simplesects(detailed, "return").into_iter().next(),
            name,
        }
    }

    /// Parameter name to description, from `parameterlist kind="param"`
    fn param_descriptions(&self, detailed: Option<&XmlNode>) -> Vec<(String, String)> {
        let Some(detailed) = detailed else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for list in detailed.descendants_named("parameterlist") {
            if list.attr("kind") != Some("param") {
                continue;
            }
            for item in list.children_named("parameteritem") {
                let description = self
                    .descriptions
                    .all_paragraphs(item.child("parameterdescription"))
                    .join(" ");
                for name in item.descendants_named("parametername") {
                    let name = name.text_content().trim().to_string();
                    if !name.is_empty() {
                        out.push((name, description.clone()));
                    }
                }
            }
        }
        out
    }

    fn variable(&self, member: &XmlNode) -> VarDoc {
        let name = member.child_text("name").trim().to_string();
        let ty = TypeRef::from_node(member.child("type"));

        VarDoc {
            id: member.attr("id").unwrap_or_default().to_string(),
            anchor: self.anchor(member, &name),
            is_static: member.bool_attr("static"),
            type_text: ty.as_text(),
            type_md: ty.as_markdown(self.resolver),
            initializer: member
                .child("initializer")
                .and_then(|i| clean_initializer(&i.text_content())),
            brief: self.descriptions.paragraphs(member.child("briefdescription")),
            details: self.descriptions.paragraphs(member.child("detaileddescription")),
            name,
        }
    }

    fn enumeration(&self, member: &XmlNode) -> EnumDoc {
        let name = member.child_text("name").trim().to_string();

        EnumDoc {
            id: member.attr("id").unwrap_or_default().to_string(),
            anchor: self.anchor(member, &name),
            scoped: member.bool_attr("strong") || member.bool_attr("scoped"),
            brief: self.descriptions.paragraphs(member.child("briefdescription")),
            details: self.descriptions.paragraphs(member.child("detaileddescription")),
            values: member
                .children_named("enumvalue")
                .map(|v| EnumValueDoc {
                    name: v.child_text("name").trim().to_string(),
                    brief: self.descriptions.markdown(v.child("briefdescription")),
                })
                .collect(),
            name,
        }
    }

    fn typedef(&self, member: &XmlNode) -> TypedefDoc {
        let name = member.child_text("name").trim().to_string();

        TypedefDoc {
            id: member.attr("id").unwrap_or_default().to_string(),
            anchor: self.anchor(member, &name),
            definition: member
                .child("definition")
                .map(|d| tighten(&d.text_content()))
                .unwrap_or_default(),
            brief: self.descriptions.paragraphs(member.child("briefdescription")),
            name,
        }
    }
}

fn is_defaulted_or_deleted(member: &XmlNode) -> bool {
    ["definition", "argsstring"].iter().any(|tag| {
        let compact: String = member
            .child_text(tag)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        compact.contains("=default") || compact.contains("=delete")
    })
}

/// Display form of a variable initializer (`= { 60.0f };` -> `60.0f`)
pub fn clean_initializer(raw: &str) -> Option<String> {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix('=') {
        s = rest.trim();
    }
    if let Some(rest) = s.strip_suffix(';') {
        s = rest.trim();
    }
    while let Some(inner) = s.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
        s = inner.trim();
    }

    let cleaned = tighten(s).replace("( )", "()");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Collapse whitespace and doxygen's padding inside template brackets
fn tighten(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace("&lt; ", "&lt;")
        .replace(" &gt;", "&gt;")
}

/// Escape `<` and `>` so VitePress does not read them as HTML
pub fn escape_angle_brackets(s: &str) -> String {
    s.replace('<', "&lt;").replace('>', "&gt;")
}
