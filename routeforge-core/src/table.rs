//! The route table and its single mutation point
//!
//! [`TableBuilder`] owns the table while it is being filled; [`TableBuilder::insert`]
//! is the only place routes enter it. [`TableBuilder::freeze`] hands out a
//! [`RouteTable`], which only offers shared access.
//!
//! Layout: verb → bucket key → routes. Buckets iterate in
//! [`compare_bucket_keys`](crate::ordering::compare_bucket_keys) order and
//! routes in [`compare_routes`] order, whatever the insertion order was.

use crate::config::DuplicateCheck;
use crate::error::{Error, Result};
use crate::ordering::{compare_routes, BucketKey};
use crate::path::{self, PathParams};
use crate::route::Route;
use crate::HttpMethod;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Routes of one resource group, most specific first
#[derive(Debug, Default)]
pub struct Bucket {
    routes: Vec<Route>,
}

impl Bucket {
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn insert_sorted(&mut self, route: Route) {
        let position = match self
            .routes
            .binary_search_by(|probe| compare_routes(probe, &route))
        {
            Ok(position) | Err(position) => position,
        };
        self.routes.insert(position, route);
    }
}

impl<'a> IntoIterator for &'a Bucket {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

type MethodBuckets = BTreeMap<BucketKey, Bucket>;

/// In-progress route table
#[derive(Debug, Default)]
pub struct TableBuilder {
    methods: BTreeMap<HttpMethod, MethodBuckets>,
    duplicate_check: DuplicateCheck,
    len: usize,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_check(mut self, check: DuplicateCheck) -> Self {
        self.duplicate_check = check;
        self
    }

    /// Insert a route into `bucket_key` under its own verb
    ///
    /// Fails with [`Error::InvalidResourcePath`] when the bucket key holds a
    /// path parameter, and with [`Error::DuplicateRoute`] when the bucket
    /// already has a route of the same verb and pattern. A failed insert
    /// leaves the table untouched.
    ///
    /// The same pattern in another bucket of the verb is accepted but logged:
    /// the dispatcher only ever reaches the one in the more specific bucket.
    pub fn insert(&mut self, bucket_key: &str, route: Route) -> Result<()> {
        if path::contains_placeholder(bucket_key) {
            return Err(Error::InvalidResourcePath {
                resource: route.resource().short_name().to_string(),
                path: bucket_key.to_string(),
            });
        }
        debug_assert!(
            route.pattern().starts_with(bucket_key),
            "route {} filed under bucket {}",
            route,
            bucket_key
        );

        let method = route.http_method();
        let check = self.duplicate_check;
        let key = BucketKey::new(bucket_key);
        let buckets = self.methods.entry(method).or_default();

        if let Some(existing) = buckets
            .get(&key)
            .and_then(|bucket| bucket.iter().find(|existing| check.conflicts(existing, &route)))
        {
            return Err(Error::DuplicateRoute {
                method,
                pattern: route.pattern().to_string(),
                existing: existing.site(),
                conflicting: route.site(),
            });
        }

        let repeated = buckets
            .iter()
            .filter(|(other, _)| **other != key)
            .find_map(|(other, bucket)| {
                bucket
                    .iter()
                    .find(|existing| check.conflicts(existing, &route))
                    .map(|existing| (other, existing))
            });
        if let Some((other, existing)) = repeated {
            warn!(
                %method,
                pattern = route.pattern(),
                bucket = bucket_key,
                existing = %existing.site(),
                existing_bucket = %other,
                conflicting = %route.site(),
                "Same path pattern declared in another bucket"
            );
        }

        buckets.entry(key).or_default().insert_sorted(route);
        self.len += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Finish the build; the result can no longer be changed
    pub fn freeze(self) -> RouteTable {
        RouteTable {
            methods: self.methods,
            len: self.len,
        }
    }
}

impl DuplicateCheck {
    fn conflicts(&self, existing: &Route, candidate: &Route) -> bool {
        existing.http_method() == candidate.http_method()
            && match self {
                DuplicateCheck::Structural => existing.shape() == candidate.shape(),
                DuplicateCheck::Exact => existing.pattern() == candidate.pattern(),
            }
    }
}

/// Frozen route table handed to the dispatcher
///
/// All accessors take `&self`; share it across threads with
/// [`RouteTable::into_shared`].
#[derive(Debug, Default)]
pub struct RouteTable {
    methods: BTreeMap<HttpMethod, MethodBuckets>,
    len: usize,
}

impl RouteTable {
    /// Total number of routes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Verbs that have at least one route
    pub fn methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.methods.keys().copied()
    }

    /// Buckets of a verb, most specific key first
    pub fn buckets_for(&self, method: HttpMethod) -> impl Iterator<Item = (&str, &Bucket)> {
        self.methods
            .get(&method)
            .into_iter()
            .flat_map(|buckets| buckets.iter())
            .map(|(key, bucket)| (key.as_str(), bucket))
    }

    /// Buckets of a verb given by name, case-insensitive
    pub fn buckets(&self, method: &str) -> impl Iterator<Item = (&str, &Bucket)> {
        HttpMethod::from_str(method)
            .into_iter()
            .flat_map(move |method| self.buckets_for(method))
    }

    /// A single bucket
    pub fn bucket(&self, method: &str, key: &str) -> Option<&Bucket> {
        let method = HttpMethod::from_str(method)?;
        self.methods.get(&method)?.get(&BucketKey::new(key))
    }

    /// Every route in table order: verb, then bucket, then route
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.methods
            .values()
            .flat_map(|buckets| buckets.values())
            .flat_map(|bucket| bucket.iter())
    }

    /// Walk the buckets and routes of a verb in table order and return the
    /// first route whose pattern matches `request_path`
    pub fn first_match(&self, method: &str, request_path: &str) -> Option<(&Route, PathParams)> {
        self.buckets(method)
            .filter(|(key, _)| request_path.starts_with(*key))
            .flat_map(|(_, bucket)| bucket.iter())
            .find_map(|route| route.matches(request_path).map(|params| (route, params)))
    }

    pub fn into_shared(self) -> Arc<RouteTable> {
        Arc::new(self)
    }
}
