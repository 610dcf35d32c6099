//! Path composition and placeholder handling
//!
//! Patterns are made of `/`-separated segments. A segment written as
//! `{name}` is a path parameter; every other segment is literal text.
//!
//! # Examples
//!
//! ```
//! use routeforge_core::path::{join_method_path, normalize_base_path, strip_placeholders};
//!
//! let base = normalize_base_path("users");
//! assert_eq!(base, "/users");
//!
//! let pattern = join_method_path(&base, "{id}/posts");
//! assert_eq!(pattern, "/users/{id}/posts");
//! assert_eq!(strip_placeholders(&pattern), "/users/posts");
//! ```

use crate::resource::{ResourceCatalog, ResourceDescriptor, ResourceId};
use std::collections::{HashMap, HashSet};

/// Raw path parameter values captured by [`match_path`]
pub type PathParams = HashMap<String, String>;

/// Check whether a single segment is a `{name}` placeholder
pub fn is_placeholder(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
}

/// Check whether any segment of `path` is a placeholder
pub fn contains_placeholder(path: &str) -> bool {
    path.split('/').any(is_placeholder)
}

/// Remove every `/{param}` segment, keeping literal text untouched
pub fn strip_placeholders(pattern: &str) -> String {
    let mut stripped = String::with_capacity(pattern.len());
    let mut segments = pattern.split('/');

    // text in front of the first separator is never a `/{param}` occurrence
    if let Some(head) = segments.next() {
        stripped.push_str(head);
    }
    for segment in segments {
        if !is_placeholder(segment) {
            stripped.push('/');
            stripped.push_str(segment);
        }
    }
    stripped
}

/// Erase parameter names, so `/users/{id}` and `/users/{uid}` share a shape
pub fn structural_shape(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|segment| if is_placeholder(segment) { "{}" } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalize a resource's own declared base path
///
/// An empty declaration stays empty; anything else gets a leading `/`.
pub fn normalize_base_path(declared: &str) -> String {
    if declared.is_empty() || declared.starts_with('/') {
        declared.to_string()
    } else {
        format!("/{}", declared)
    }
}

/// Append a method-level relative path to a base path
///
/// No slash deduplication happens here; declarations are trusted to be
/// well-formed.
pub fn join_method_path(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        base.to_string()
    } else if relative.starts_with('/') {
        format!("{}{}", base, relative)
    } else {
        format!("{}/{}", base, relative)
    }
}

/// Compose the absolute base path of a resource
///
/// The resource's own normalized path is prefixed with the composed path of
/// its parent, as long as the parent is a resource the catalog recognizes.
/// The walk stops at the first unrecognized ancestor.
pub fn compose_base_path<C>(catalog: &C, resource: &ResourceDescriptor) -> String
where
    C: ResourceCatalog + ?Sized,
{
    let mut parts = vec![normalize_base_path(resource.base_path())];
    let mut seen: HashSet<ResourceId> = HashSet::from([resource.id()]);
    let mut parent = resource.parent();

    while let Some(ancestor) = parent.and_then(|id| catalog.lookup(id)) {
        // a cyclic parent chain ends where it starts repeating
        if !seen.insert(ancestor.id()) {
            break;
        }
        parts.push(normalize_base_path(ancestor.base_path()));
        parent = ancestor.parent();
    }

    parts.iter().rev().map(String::as_str).collect()
}

/// Match a route pattern against a concrete request path
///
/// Returns the raw parameter strings when every literal segment matches.
pub fn match_path(pattern: &str, path: &str) -> Option<PathParams> {
    let pattern_parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pattern_part, path_part) in pattern_parts.iter().zip(path_parts.iter()) {
        if is_placeholder(pattern_part) {
            let name = &pattern_part[1..pattern_part.len() - 1];
            params.insert(name.to_string(), path_part.to_string());
        } else if pattern_part != path_part {
            return None;
        }
    }

    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("users"), "/users");
        assert_eq!(normalize_base_path("/users"), "/users");
        assert_eq!(normalize_base_path(""), "");
    }

    #[test]
    fn test_join_method_path() {
        assert_eq!(join_method_path("/api/admin", ""), "/api/admin");
        assert_eq!(join_method_path("/users", "/me"), "/users/me");
        assert_eq!(join_method_path("/users", "{id}"), "/users/{id}");
        assert_eq!(join_method_path("", "health"), "/health");
    }

    #[test]
    fn test_join_does_not_collapse_slashes() {
        assert_eq!(join_method_path("/users/", "/me"), "/users//me");
    }

    #[test]
    fn test_placeholders() {
        assert!(is_placeholder("{id}"));
        assert!(!is_placeholder("{"));
        assert!(!is_placeholder("id"));
        assert!(contains_placeholder("/users/{id}"));
        assert!(!contains_placeholder("/users/me"));
        assert!(!contains_placeholder(""));
    }

    #[test]
    fn test_strip_placeholders() {
        assert_eq!(strip_placeholders("/users/{id}"), "/users");
        assert_eq!(strip_placeholders("/users/me"), "/users/me");
        assert_eq!(
            strip_placeholders("/users/{id}/posts/{post}"),
            "/users/posts"
        );
        assert_eq!(strip_placeholders("/{id}"), "");
        assert_eq!(strip_placeholders(""), "");
    }

    #[test]
    fn test_structural_shape() {
        assert_eq!(structural_shape("/users/{id}"), "/users/{}");
        assert_eq!(
            structural_shape("/users/{id}"),
            structural_shape("/users/{uid}")
        );
        assert_ne!(structural_shape("/users/{id}"), structural_shape("/users/me"));
    }

    #[test]
    fn test_match_path_with_param() {
        let params = match_path("/users/{id}", "/users/123").unwrap();
        assert_eq!(params.get("id"), Some(&"123".to_string()));
    }

    #[test]
    fn test_match_path_multiple_params() {
        let params = match_path("/users/{user_id}/posts/{post_id}", "/users/1/posts/2").unwrap();
        assert_eq!(params.get("user_id"), Some(&"1".to_string()));
        assert_eq!(params.get("post_id"), Some(&"2".to_string()));
    }

    #[test]
    fn test_match_path_no_match() {
        assert!(match_path("/users/{id}", "/posts/123").is_none());
        assert!(match_path("/users/{id}", "/users").is_none());
        assert!(match_path("/users/me", "/users/you").is_none());
    }
}
