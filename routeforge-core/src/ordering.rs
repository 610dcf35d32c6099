//! Specificity ordering
//!
//! One rule orders both the buckets of a method and the routes inside a
//! bucket: more literal text sorts first. A dispatcher walking the table in
//! this order and stopping at the first structural match therefore always
//! lands on the most specific route, e.g. `/users/me` before `/users/{id}`.
//!
//! Both orders are total. Two bucket keys compare equal only when they are
//! the same string; two routes compare equal only when verb and pattern are
//! the same, which the table never lets happen.

use crate::route::Route;
use std::cmp::Ordering;
use std::fmt;

/// Longer literal content first
fn by_specificity(a_literal: &str, b_literal: &str) -> Ordering {
    b_literal.len().cmp(&a_literal.len())
}

/// Order two routes of the same bucket
///
/// Longer pattern (after removing parameter segments) first, then verb
/// name, then the full pattern as written.
pub fn compare_routes(a: &Route, b: &Route) -> Ordering {
    by_specificity(a.literal_pattern(), b.literal_pattern())
        .then_with(|| a.http_method().cmp(&b.http_method()))
        .then_with(|| a.pattern().cmp(b.pattern()))
}

/// Order two bucket keys: longer prefix first, then lexicographically
pub fn compare_bucket_keys(a: &str, b: &str) -> Ordering {
    by_specificity(a, b).then_with(|| a.cmp(b))
}

/// Literal path prefix grouping the routes of one resource
///
/// Its `Ord` is [`compare_bucket_keys`], so a `BTreeMap` keyed by it iterates
/// most specific prefix first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BucketKey(String);

impl BucketKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for BucketKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_bucket_keys(&self.0, &other.0)
    }
}

impl PartialOrd for BucketKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{MethodDescriptor, ResourceId};
    use crate::route::RouteDeclaration;
    use crate::HttpMethod;
    use std::collections::BTreeSet;

    struct Users;

    fn route(method: HttpMethod, relative_path: &str) -> Route {
        let handler = MethodDescriptor::new("handler");
        Route::new(RouteDeclaration {
            resource: ResourceId::of::<Users>(),
            handler: &handler,
            method,
            base_path: "/users",
            relative_path,
            description: "",
            upload: None,
            interceptors: Vec::new(),
            validators: &[],
            params: Vec::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_literal_beats_parameter() {
        let me = route(HttpMethod::GET, "me");
        let by_id = route(HttpMethod::GET, "{id}");

        assert_eq!(compare_routes(&me, &by_id), Ordering::Less);
        assert_eq!(compare_routes(&by_id, &me), Ordering::Greater);
    }

    #[test]
    fn test_longer_literal_first() {
        let posts = route(HttpMethod::GET, "{id}/posts");
        let by_id = route(HttpMethod::GET, "{id}");
        assert_eq!(compare_routes(&posts, &by_id), Ordering::Less);
    }

    #[test]
    fn test_equal_length_breaks_on_method_then_pattern() {
        let get = route(HttpMethod::GET, "{id}");
        let delete = route(HttpMethod::DELETE, "{id}");
        assert_eq!(compare_routes(&delete, &get), Ordering::Less);

        let by_id = route(HttpMethod::GET, "{id}");
        let by_name = route(HttpMethod::GET, "{name}");
        assert_eq!(compare_routes(&by_id, &by_name), Ordering::Less);
        assert_eq!(compare_routes(&by_id, &by_id), Ordering::Equal);
    }

    #[test]
    fn test_bucket_key_ordering() {
        assert_eq!(compare_bucket_keys("/api/v2", "/api"), Ordering::Less);
        assert_eq!(compare_bucket_keys("/api", "/api/v2"), Ordering::Greater);
        assert_eq!(compare_bucket_keys("/abc", "/abd"), Ordering::Less);
        assert_eq!(compare_bucket_keys("/api", "/api"), Ordering::Equal);
    }

    #[test]
    fn test_bucket_keys_in_ordered_set() {
        let keys: BTreeSet<BucketKey> = ["", "/api", "/users", "/api/v2", "/api/v1"]
            .into_iter()
            .map(BucketKey::new)
            .collect();
        let ordered: Vec<&str> = keys.iter().map(BucketKey::as_str).collect();
        assert_eq!(ordered, vec!["/api/v1", "/api/v2", "/users", "/api", ""]);
    }
}
