// Refid to URL resolution for cross-references

use crate::inventory::Inventory;
use std::collections::HashMap;

/// Maps doxygen refids to reference page URLs
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    urls: HashMap<String, String>,
}

impl Resolver {
    /// Build the lookup for every grouped class and its members
    pub fn new(inventory: &Inventory, base_path: &str) -> Self {
        let base = format!("{}/", base_path.trim_end_matches('/'));
        let mut urls = HashMap::new();

        for class in inventory.grouped_classes() {
            let Some(group) = class.group_id.as_deref().and_then(|g| inventory.group(g)) else {
                continue;
            };
            urls.insert(
                class.id.clone(),
                format!("{}{}/{}", base, group.slug, class.slug),
            );
        }

        for member in inventory.members.values() {
            if let Some(class_url) = urls.get(&member.class_id) {
                let url = format!("{}#{}", class_url, member.anchor);
                urls.insert(member.id.clone(), url);
            }
        }

        Self { urls }
    }

    /// URL of a class page or member anchor
    pub fn url(&self, refid: &str) -> Option<&str> {
        self.urls.get(refid).map(String::as_str)
    }

    /// Markdown link for a refid, or the bare label when it cannot be resolved
    pub fn link_md(&self, refid: &str, label: &str) -> String {
        match self.url(refid) {
            Some(url) if !label.is_empty() => format!("[{}]({})", label, url),
            _ => label.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{ClassEntry, Group, MemberEntry};

    fn inventory() -> Inventory {
        let mut inv = Inventory::new();
        let mut cameras = Group::new("group___cameras", "Cameras");
        cameras.class_ids = vec!["classgleam_1_1_perspective_camera".to_string()];
        inv.add_group(cameras);
        inv.add_class(ClassEntry::new(
            "classgleam_1_1_perspective_camera",
            "gleam::PerspectiveCamera",
        ));
        inv.add_class(ClassEntry::new("classgleam_1_1_hidden", "gleam::Hidden"));
        inv.add_member(MemberEntry {
            id: "classgleam_1_1_perspective_camera_1a0".to_string(),
            class_id: "classgleam_1_1_perspective_camera".to_string(),
            name: "fov".to_string(),
            anchor: "fov".to_string(),
        });
        inv.link_groups();
        inv.assign_class_slugs();
        inv
    }

    #[test]
    fn test_class_url() {
        let resolver = Resolver::new(&inventory(), "/reference/");
        assert_eq!(
            resolver.url("classgleam_1_1_perspective_camera"),
            Some("/reference/cameras/perspective_camera")
        );
    }

    #[test]
    fn test_member_url() {
        let resolver = Resolver::new(&inventory(), "/reference");
        assert_eq!(
            resolver.url("classgleam_1_1_perspective_camera_1a0"),
            Some("/reference/cameras/perspective_camera#fov")
        );
    }

    #[test]
    fn test_ungrouped_class_unresolved() {
        let resolver = Resolver::new(&inventory(), "/reference/");
        assert_eq!(resolver.url("classgleam_1_1_hidden"), None);
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn test_link_md() {
        let resolver = Resolver::new(&inventory(), "/reference/");
        assert_eq!(
            resolver.link_md("classgleam_1_1_perspective_camera", "PerspectiveCamera"),
            "[PerspectiveCamera](/reference/cameras/perspective_camera)"
        );
        assert_eq!(resolver.link_md("unknown", "Thing"), "Thing");
        assert_eq!(resolver.link_md("classgleam_1_1_perspective_camera", ""), "");
    }
}
