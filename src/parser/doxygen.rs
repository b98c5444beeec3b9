// Doxygen XML directory reader
//
// `index.xml` lists every compound; each compound lives in `<refid>.xml`.
// Groups become sidebar sections, classes and structs become pages.

use crate::error::{Error, Result};
use crate::inventory::{slugify, unique_slug, ClassEntry, Group, Inventory, MemberEntry};
use crate::parser::xml::XmlNode;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One `<compound>` entry of `index.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRef {
    pub refid: String,
    pub kind: String,
    pub name: String,
}

impl CompoundRef {
    pub fn is_group(&self) -> bool {
        self.kind == "group"
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind.as_str(), "class" | "struct")
    }
}

/// A directory of Doxygen XML output
#[derive(Debug, Clone)]
pub struct DoxygenSource {
    xml_dir: PathBuf,
}

impl DoxygenSource {
    /// Open a Doxygen XML directory; it must contain `index.xml`
    pub fn open(xml_dir: &Path) -> Result<Self> {
        let index = xml_dir.join("index.xml");
        if !index.is_file() {
            return Err(Error::PathNotFound(index));
        }
        Ok(Self {
            xml_dir: xml_dir.to_path_buf(),
        })
    }

    pub fn compound_path(&self, refid: &str) -> PathBuf {
        self.xml_dir.join(format!("{}.xml", refid))
    }

    /// Read and parse one XML file
    fn parse_file(&self, path: &Path) -> Result<XmlNode> {
        let contents = std::fs::read_to_string(path)?;
        XmlNode::parse(&contents).map_err(|e| Error::xml(path, e.to_string()))
    }

    /// List the compounds in `index.xml`
    pub fn compounds(&self) -> Result<Vec<CompoundRef>> {
        let index = self.parse_file(&self.xml_dir.join("index.xml"))?;

        Ok(index
            .children_named("compound")
            .filter_map(|c| {
                let refid = c.attr("refid")?.to_string();
                Some(CompoundRef {
                    refid,
                    kind: c.attr("kind").unwrap_or_default().to_string(),
                    name: c.child_text("name").trim().to_string(),
                })
            })
            .collect())
    }

    /// Load the `compounddef` of a compound, `None` when the file has none
    pub fn compound_def(&self, refid: &str) -> Result<Option<XmlNode>> {
        let path = self.compound_path(refid);
        if !path.is_file() {
            return Err(Error::MissingCompound(refid.to_string()));
        }

        let root = self.parse_file(&path)?;
        if root.tag == "compounddef" {
            return Ok(Some(root));
        }
        Ok(root.children.into_iter().find(|c| c.tag == "compounddef"))
    }

    /// Build the inventory of groups, classes and linkable members
    pub fn load_inventory(&self) -> Result<Inventory> {
        let compounds = self.compounds()?;
        let mut inventory = Inventory::new();

        for compound in compounds.iter().filter(|c| c.is_group()) {
            let Some(def) = self.compound_def(&compound.refid)? else {
                tracing::warn!(refid = %compound.refid, "group compound has no compounddef, skipping");
                continue;
            };
            inventory.add_group(group_from_def(&compound.refid, &def));
        }

        let class_refs: Vec<&CompoundRef> = compounds.iter().filter(|c| c.is_class()).collect();
        let loaded = class_refs
            .par_iter()
            .map(|c| self.compound_def(&c.refid).map(|def| (*c, def)))
            .collect::<Result<Vec<_>>>()?;

        for (compound, def) in loaded {
            let Some(def) = def else {
                tracing::warn!(refid = %compound.refid, "class compound has no compounddef, skipping");
                continue;
            };

            let name = def.child_text("compoundname").trim().to_string();
            tracing::debug!(refid = %compound.refid, class = %name, "loaded class");
            inventory.add_class(ClassEntry::new(compound.refid.clone(), name));
            for member in public_members(&compound.refid, &def) {
                inventory.add_member(member);
            }
        }

        inventory.link_groups();
        inventory.assign_class_slugs();

        tracing::info!(
            groups = inventory.groups.len(),
            classes = inventory.classes.len(),
            "inventory loaded"
        );

        Ok(inventory)
    }
}

fn group_from_def(refid: &str, def: &XmlNode) -> Group {
    let title = def.child_text("title").trim();
    let compound_name = def.child_text("compoundname").trim();
    let name = if !title.is_empty() {
        title
    } else if !compound_name.is_empty() {
        compound_name
    } else {
        "Group"
    };

    let mut group = Group::new(refid, name);
    group.class_ids = def
        .children_named("innerclass")
        .filter_map(|c| c.attr("refid"))
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();
    group
}

/// Public members of a class with per-class unique anchors
fn public_members(class_id: &str, def: &XmlNode) -> Vec<MemberEntry> {
    let mut used: HashSet<String> = HashSet::new();
    let mut members = Vec::new();

    for section in def.children_named("sectiondef") {
        for member in section.children_named("memberdef") {
            if member.attr("prot") != Some("public") {
                continue;
            }
            let Some(id) = member.attr("id") else {
                continue;
            };

            let name = member.child_text("name").trim().to_string();
            let anchor = unique_slug(&slugify(&name), &mut used);

            members.push(MemberEntry {
                id: id.to_string(),
                class_id: class_id.to_string(),
                name,
                anchor,
            });
        }
    }

    members
}
