// Inventory of documented symbols
//
// Groups and classes discovered in Doxygen XML, keyed by refid. All maps are
// ordered so that every derived artifact is reproducible.

pub mod resolver;
pub mod slug;

pub use resolver::*;
pub use slug::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A doxygen group (`@defgroup`), rendered as one sidebar section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    /// Display title
    pub name: String,
    pub slug: String,
    /// Member class refids in document order
    pub class_ids: Vec<String>,
}

/// A documented class or struct
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassEntry {
    pub id: String,
    /// Fully qualified name (`gleam::Camera`)
    pub name: String,
    /// Last path segment (`Camera`)
    pub display: String,
    pub group_id: Option<String>,
    pub slug: String,
}

/// A public class member that can be linked to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberEntry {
    pub id: String,
    pub class_id: String,
    pub name: String,
    /// Heading anchor on the class page
    pub anchor: String,
}

/// Everything the generator knows about the documented library
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub groups: BTreeMap<String, Group>,
    pub classes: BTreeMap<String, ClassEntry>,
    pub members: BTreeMap<String, MemberEntry>,
}

impl ClassEntry {
    /// Create a class entry from its fully qualified name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let display = display_name(&name).to_string();
        Self {
            id: id.into(),
            name,
            display,
            group_id: None,
            slug: String::new(),
        }
    }
}

impl Group {
    /// Create a group with a slug derived from its name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            class_ids: Vec::new(),
        }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&mut self, group: Group) {
        self.groups.insert(group.id.clone(), group);
    }

    pub fn add_class(&mut self, class: ClassEntry) {
        self.classes.insert(class.id.clone(), class);
    }

    pub fn add_member(&mut self, member: MemberEntry) {
        self.members.insert(member.id.clone(), member);
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn class(&self, id: &str) -> Option<&ClassEntry> {
        self.classes.get(id)
    }

    /// Link classes to groups and drop group references to unknown classes
    ///
    /// A class listed by several groups belongs to the last one in refid order.
    pub fn link_groups(&mut self) {
        for group in self.groups.values_mut() {
            let classes = &self.classes;
            group.class_ids.retain(|cid| classes.contains_key(cid));
        }

        for class in self.classes.values_mut() {
            class.group_id = None;
        }

        for group in self.groups.values() {
            for cid in &group.class_ids {
                if let Some(class) = self.classes.get_mut(cid) {
                    class.group_id = Some(group.id.clone());
                }
            }
        }
    }

    /// Drop groups whose name matches any of the glob patterns
    pub fn exclude_groups(&mut self, patterns: &[String]) -> Result<usize> {
        if patterns.is_empty() {
            return Ok(0);
        }

        let compiled = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let before = self.groups.len();
        self.groups.retain(|_, g| {
            let excluded = compiled.iter().any(|p| p.matches(&g.name));
            if excluded {
                tracing::debug!(group = %g.name, "excluding group");
            }
            !excluded
        });

        self.link_groups();
        self.assign_class_slugs();
        Ok(before - self.groups.len())
    }

    /// Assign class slugs, unique within each group
    ///
    /// Group slugs that collide are made unique first (`math`, `math-2`).
    pub fn assign_class_slugs(&mut self) {
        let mut group_slugs: HashSet<String> = HashSet::new();
        for group in self.groups.values_mut() {
            group.slug = unique_slug(&slugify(&group.name), &mut group_slugs);
        }

        let mut by_group: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for class in self.classes.values() {
            let gid = class.group_id.clone().unwrap_or_else(|| "_ungrouped".to_string());
            by_group.entry(gid).or_default().push(class.id.clone());
        }

        for ids in by_group.values_mut() {
            ids.sort_by_key(|id| {
                let c = &self.classes[id];
                (c.display.to_lowercase(), c.name.to_lowercase())
            });

            let mut used: HashSet<String> = HashSet::new();
            for id in ids.iter() {
                let Some(class) = self.classes.get_mut(id) else {
                    continue;
                };

                let base = snake_slug(&class.display);
                let mut slug = base.clone();

                if used.contains(&slug) {
                    if let Some(ns) = namespace_hint(&class.name) {
                        slug = format!("{}_{}", base, slugify(ns));
                    }
                }
                if used.contains(&slug) {
                    slug = format!("{}-{}", base, short_hash(&class.name, 6));
                }

                class.slug = unique_slug(&slug, &mut used);
            }
        }
    }

    /// Classes owned by a group, sorted by display name, then qualified name
    pub fn sorted_classes(&self, group: &Group) -> Vec<&ClassEntry> {
        let mut classes: Vec<&ClassEntry> = group
            .class_ids
            .iter()
            .filter_map(|cid| self.classes.get(cid))
            .filter(|c| c.group_id.as_deref() == Some(group.id.as_str()))
            .collect();
        classes.sort_by_key(|c| (c.display.to_lowercase(), c.name.to_lowercase()));
        classes.dedup_by(|a, b| a.id == b.id);
        classes
    }

    /// Groups with at least one class, sorted by name
    pub fn sorted_groups(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self
            .groups
            .values()
            .filter(|g| {
                g.class_ids.iter().any(|cid| {
                    self.classes
                        .get(cid)
                        .map_or(false, |c| c.group_id.as_deref() == Some(g.id.as_str()))
                })
            })
            .collect();
        groups.sort_by_key(|g| (g.name.to_lowercase(), g.name.clone()));
        groups
    }

    /// Classes that belong to a group and therefore get a page
    pub fn grouped_classes(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.values().filter(|c| c.group_id.is_some())
    }
}

/// Last segment of a qualified name
pub fn display_name(qualified: &str) -> &str {
    qualified.rsplit("::").next().unwrap_or(qualified)
}

/// Enclosing scope of a qualified name (`gleam::detail::Foo` -> `detail`)
fn namespace_hint(qualified: &str) -> Option<&str> {
    let parts: Vec<&str> = qualified.split("::").collect();
    if parts.len() >= 2 {
        Some(parts[parts.len() - 2])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Inventory {
        let mut inv = Inventory::new();
        let mut math = Group::new("group___math_group", "Math");
        math.class_ids = vec![
            "classgleam_1_1_vector3".to_string(),
            "classgleam_1_1_vector2".to_string(),
            "classgleam_1_1_missing".to_string(),
        ];
        inv.add_group(math);
        inv.add_group(Group::new("group___empty", "Empty"));
        inv.add_class(ClassEntry::new("classgleam_1_1_vector2", "gleam::Vector2"));
        inv.add_class(ClassEntry::new("classgleam_1_1_vector3", "gleam::Vector3"));
        inv.add_class(ClassEntry::new("classgleam_1_1_helper", "gleam::detail::Helper"));
        inv.link_groups();
        inv.assign_class_slugs();
        inv
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("gleam::Camera"), "Camera");
        assert_eq!(display_name("Camera"), "Camera");
        assert_eq!(display_name("gleam::detail::Helper"), "Helper");
    }

    #[test]
    fn test_group_slug() {
        let group = Group::new("group___scene", " Scene Graph ");
        assert_eq!(group.name, "Scene Graph");
        assert_eq!(group.slug, "scene-graph");
    }

    #[test]
    fn test_link_groups_filters_missing() {
        let inv = sample();
        let math = inv.group("group___math_group").unwrap();
        assert_eq!(math.class_ids.len(), 2);
        assert_eq!(
            inv.class("classgleam_1_1_vector2").unwrap().group_id.as_deref(),
            Some("group___math_group")
        );
        assert!(inv.class("classgleam_1_1_helper").unwrap().group_id.is_none());
    }

    #[test]
    fn test_sorted_classes_by_display() {
        let inv = sample();
        let math = inv.group("group___math_group").unwrap();
        let names: Vec<_> = inv.sorted_classes(math).iter().map(|c| c.display.as_str()).collect();
        assert_eq!(names, vec!["Vector2", "Vector3"]);
    }

    #[test]
    fn test_sorted_groups_skips_empty() {
        let inv = sample();
        let names: Vec<_> = inv.sorted_groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Math"]);
    }

    #[test]
    fn test_assign_class_slugs() {
        let inv = sample();
        assert_eq!(inv.class("classgleam_1_1_vector2").unwrap().slug, "vector2");
        assert_eq!(inv.class("classgleam_1_1_helper").unwrap().slug, "helper");
    }

    #[test]
    fn test_slug_collisions() {
        let mut inv = Inventory::new();
        let mut g = Group::new("g", "Core");
        g.class_ids = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        inv.add_group(g);
        // sorted by qualified name: b, a, c, d
        inv.add_class(ClassEntry::new("a", "gleam::Timer"));
        inv.add_class(ClassEntry::new("b", "gleam::detail::Timer"));
        inv.add_class(ClassEntry::new("c", "other::detail::Timer"));
        inv.add_class(ClassEntry::new("d", "third::detail::Timer"));
        inv.link_groups();
        inv.assign_class_slugs();

        assert_eq!(inv.class("b").unwrap().slug, "timer");
        assert_eq!(inv.class("a").unwrap().slug, "timer_gleam");
        assert_eq!(inv.class("c").unwrap().slug, "timer_detail");
        let fourth = &inv.class("d").unwrap().slug;
        assert!(fourth.starts_with("timer-"));
        assert_eq!(fourth.len(), "timer-".len() + 6);
    }

    #[test]
    fn test_exclude_groups() {
        let mut inv = sample();
        let mut internal = Group::new("group___internal", "Internal Details");
        internal.class_ids = vec!["classgleam_1_1_helper".to_string()];
        inv.add_group(internal);
        inv.link_groups();
        assert!(inv.class("classgleam_1_1_helper").unwrap().group_id.is_some());

        let removed = inv.exclude_groups(&["Internal*".to_string()]).unwrap();
        assert_eq!(removed, 1);
        assert!(inv.group("group___internal").is_none());
        assert!(inv.class("classgleam_1_1_helper").unwrap().group_id.is_none());
    }

    #[test]
    fn test_class_in_two_groups_listed_once() {
        let mut inv = sample();
        let mut extra = Group::new("group___zz_extra", "Extra");
        extra.class_ids = vec!["classgleam_1_1_vector2".to_string()];
        inv.add_group(extra);
        inv.link_groups();

        let v2 = inv.class("classgleam_1_1_vector2").unwrap();
        assert_eq!(v2.group_id.as_deref(), Some("group___zz_extra"));

        let math = inv.group("group___math_group").unwrap();
        let names: Vec<_> = inv.sorted_classes(math).iter().map(|c| c.display.as_str()).collect();
        assert_eq!(names, vec!["Vector3"]);

        inv.exclude_groups(&["Extra".to_string()]).unwrap();
        let v2 = inv.class("classgleam_1_1_vector2").unwrap();
        assert_eq!(v2.group_id.as_deref(), Some("group___math_group"));
    }

    #[test]
    fn test_group_slug_collisions() {
        let mut inv = Inventory::new();
        inv.add_group(Group::new("group___a", "Math"));
        inv.add_group(Group::new("group___b", "math!"));
        inv.assign_class_slugs();
        assert_eq!(inv.group("group___a").unwrap().slug, "math");
        assert_eq!(inv.group("group___b").unwrap().slug, "math-2");
    }

    #[test]
    fn test_group_slug_suffix_not_taken_twice() {
        let mut inv = Inventory::new();
        inv.add_group(Group::new("group___a", "Math"));
        inv.add_group(Group::new("group___b", "math!"));
        inv.add_group(Group::new("group___c", "Math 2"));
        inv.assign_class_slugs();

        let slugs: HashSet<_> = inv.groups.values().map(|g| g.slug.as_str()).collect();
        assert_eq!(slugs.len(), 3);
        assert_eq!(inv.group("group___c").unwrap().slug, "math-2-2");
    }

    #[test]
    fn test_grouped_classes() {
        let inv = sample();
        assert_eq!(inv.grouped_classes().count(), 2);
    }
}
