// URL slug helpers

use sha1::{Digest, Sha1};
use std::collections::HashSet;

/// Convert text to a URL-friendly slug (`Math Utilities` -> `math-utilities`)
pub fn slugify(s: &str) -> String {
    let slug = s
        .trim()
        .to_lowercase()
        .replace("::", "-")
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "x".to_string()
    } else {
        slug
    }
}

/// Convert a CamelCase symbol name to snake_case (`FrameTimer` -> `frame_timer`)
///
/// Digits do not start a new word, so `Texture2D` becomes `texture2d`.
pub fn snake_slug(s: &str) -> String {
    let chars: Vec<char> = s.replace("::", "_").chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || (next_lower && prev.is_alphanumeric()) {
                out.push('_');
            }
        }

        if c.is_alphanumeric() || c == '_' {
            out.extend(c.to_lowercase());
        } else {
            out.push('_');
        }
    }

    let slug = out
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() {
        "x".to_string()
    } else {
        slug
    }
}

/// First `len` hex characters of the SHA-1 of `s`
pub fn short_hash(s: &str, len: usize) -> String {
    let digest = Sha1::digest(s.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    hex.chars().take(len).collect()
}

/// Claim `base`, or the first free `base-2`, `base-3`... in `used`
pub fn unique_slug(base: &str, used: &mut HashSet<String>) -> String {
    let mut slug = base.to_string();
    let mut n = 1;
    while used.contains(&slug) {
        n += 1;
        slug = format!("{}-{}", base, n);
    }
    used.insert(slug.clone());
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Math"), "math");
        assert_eq!(slugify("  Scene Graph  "), "scene-graph");
        assert_eq!(slugify("gleam::detail"), "gleam-detail");
        assert_eq!(slugify("operator=="), "operator");
        assert_eq!(slugify("C++ Utilities"), "c-utilities");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "x");
        assert_eq!(slugify("=="), "x");
    }

    #[test]
    fn test_snake_slug() {
        assert_eq!(snake_slug("Camera"), "camera");
        assert_eq!(snake_slug("OrthographicCamera"), "orthographic_camera");
        assert_eq!(snake_slug("FrameTimer"), "frame_timer");
        assert_eq!(snake_slug("SharedContext"), "shared_context");
        assert_eq!(snake_slug("Box3"), "box3");
        assert_eq!(snake_slug("Texture2D"), "texture2d");
        assert_eq!(snake_slug("HTTPServer"), "http_server");
        assert_eq!(snake_slug("gleam::Vector3"), "gleam_vector3");
    }

    #[test]
    fn test_snake_slug_empty() {
        assert_eq!(snake_slug(""), "x");
        assert_eq!(snake_slug("<>"), "x");
    }

    #[test]
    fn test_short_hash_matches_sha1() {
        assert_eq!(short_hash("abc", 6), "a9993e");
        assert_eq!(short_hash("abc", 40), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_unique_slug_skips_taken_suffixes() {
        let mut used = HashSet::new();
        used.insert("math-2".to_string());
        assert_eq!(unique_slug("math", &mut used), "math");
        assert_eq!(unique_slug("math", &mut used), "math-3");
        assert_eq!(unique_slug("math-2", &mut used), "math-2-2");
        assert_eq!(used.len(), 4);
    }

    #[test]
    fn test_short_hash_is_stable() {
        let a = short_hash("gleam::Vector3", 6);
        assert_eq!(a.len(), 6);
        assert_eq!(a, short_hash("gleam::Vector3", 6));
        assert_ne!(a, short_hash("gleam::detail::Vector3", 6));
    }
}
