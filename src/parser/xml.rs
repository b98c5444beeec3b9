// Minimal element tree over quick-xml events.
//
// Doxygen descriptions are mixed content, so every node keeps its leading
// `text` and the `tail` text that follows its closing tag.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::HashMap;

/// An XML element with mixed content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    /// Text before the first child
    pub text: String,
    /// Text after this element's end tag, inside the parent
    pub tail: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Parse a document and return its root element
    pub fn parse(xml: &str) -> Result<XmlNode> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut stack = vec![XmlNode::new("#document")];

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(element(&reader, &e)?),
                Event::Empty(e) => {
                    let node = element(&reader, &e)?;
                    push_child(&mut stack, node);
                }
                Event::End(_) => {
                    if stack.len() > 1 {
                        if let Some(node) = stack.pop() {
                            push_child(&mut stack, node);
                        }
                    }
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    append_text(&mut stack, &text);
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?;
                    append_text(&mut stack, &decode_entity(&entity));
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    append_text(&mut stack, &text);
                }
                Event::Eof => break,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        // Close anything left open by a truncated document
        while stack.len() > 1 {
            if let Some(node) = stack.pop() {
                push_child(&mut stack, node);
            }
        }

        stack
            .pop()
            .and_then(|doc| doc.children.into_iter().next())
            .ok_or_else(|| Error::other("document has no root element"))
    }

    /// Attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Attribute interpreted as a doxygen boolean (`yes`, `true`, `1`)
    pub fn bool_attr(&self, name: &str) -> bool {
        matches!(
            self.attr(name).map(str::to_ascii_lowercase).as_deref(),
            Some("yes") | Some("true") | Some("1")
        )
    }

    /// First direct child with the given tag
    pub fn child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given tag
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// All descendants with the given tag, in document order
    pub fn descendants_named<'a>(&'a self, tag: &str) -> Vec<&'a XmlNode> {
        let mut out = Vec::new();
        for child in &self.children {
            if child.tag == tag {
                out.push(child);
            }
            out.extend(child.descendants_named(tag));
        }
        out
    }

    /// Leading text of a direct child, or empty
    pub fn child_text(&self, tag: &str) -> &str {
        self.child(tag).map(|c| c.text.as_str()).unwrap_or("")
    }

    /// All text inside this element, tails of children included
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
            out.push_str(&child.tail);
        }
        out
    }
}

fn element(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<XmlNode> {
    let tag = reader.decoder().decode(e.name().as_ref())?.into_owned();
    let mut node = XmlNode::new(tag);

    for attr in e.attributes().flatten() {
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        node.attrs.insert(key, value);
    }

    Ok(node)
}

fn push_child(stack: &mut [XmlNode], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

/// Append text to the open element, or to the tail of its last child
fn append_text(stack: &mut [XmlNode], text: &str) {
    if let Some(node) = stack.last_mut() {
        if let Some(last_child) = node.children.last_mut() {
            last_child.tail.push_str(text);
        } else {
            node.text.push_str(text);
        }
    }
}

fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "apos" => "'".to_string(),
        "quot" => "\"".to_string(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}
