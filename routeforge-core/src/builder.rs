//! Route table build
//!
//! [`RouteBuilder`] walks every resource of a catalog and every qualifying
//! method, turns each verb binding into a [`Route`] and inserts it into a
//! [`TableBuilder`]. The first error aborts the walk and nothing is
//! published.
//!
//! # Examples
//!
//! ```
//! use routeforge_core::{
//!     HttpMethod, LayeredInterceptorResolver, MethodDescriptor, ResourceDescriptor,
//!     ResourceRegistry, RouteBuilder, VerbBinding,
//! };
//!
//! struct UserResource;
//!
//! let registry = ResourceRegistry::new().with(
//!     ResourceDescriptor::of::<UserResource>()
//!         .path("users")
//!         .method(MethodDescriptor::new("me").verb(VerbBinding::new(HttpMethod::GET, "me")))
//!         .method(MethodDescriptor::new("find").verb(VerbBinding::new(HttpMethod::GET, "{id}"))),
//! );
//! let resolver = LayeredInterceptorResolver::default();
//!
//! let table = RouteBuilder::new(&registry, &resolver).build().unwrap();
//! let (route, _) = table.first_match("GET", "/users/me").unwrap();
//! assert_eq!(route.pattern(), "/users/me");
//! ```

use crate::config::{BuildOptions, VerbConflictPolicy};
use crate::error::{Error, Result};
use crate::interceptor::{InterceptorRef, InterceptorResolver};
use crate::path::compose_base_path;
use crate::resource::{MethodDescriptor, ResourceCatalog, ResourceDescriptor, VerbBinding};
use crate::route::{HandlerRef, Route, RouteDeclaration};
use crate::table::{RouteTable, TableBuilder};
use crate::HttpMethod;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Builds a [`RouteTable`] from a resource catalog
pub struct RouteBuilder<'a, C: ?Sized, R: ?Sized> {
    catalog: &'a C,
    resolver: &'a R,
    options: BuildOptions,
}

impl<'a, C, R> RouteBuilder<'a, C, R>
where
    C: ResourceCatalog + ?Sized,
    R: InterceptorResolver + ?Sized,
{
    pub fn new(catalog: &'a C, resolver: &'a R) -> Self {
        Self {
            catalog,
            resolver,
            options: BuildOptions::default(),
        }
    }

    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the table
    ///
    /// Identical inputs always give identical tables: the table's order
    /// comes from the specificity rules, not from discovery order.
    pub fn build(&self) -> Result<RouteTable> {
        let _span = tracing::info_span!("route_table_build").entered();

        let mut table = TableBuilder::new().with_duplicate_check(self.options.duplicate_check);
        let defaults = self.resolver.default_interceptors();
        let catalog: &'a C = self.catalog;
        let resources = catalog.resources();

        for resource in resources.iter().copied() {
            self.add_resource(&mut table, &defaults, resource)?;
        }

        let table = table.freeze();
        info!(
            resources = resources.len(),
            routes = table.len(),
            "Route table built"
        );
        Ok(table)
    }

    fn add_resource(
        &self,
        table: &mut TableBuilder,
        defaults: &[InterceptorRef],
        resource: &'a ResourceDescriptor,
    ) -> Result<()> {
        let base_path = compose_base_path(self.catalog, resource);
        let resource_level = self.resolver.resource_interceptors(resource);

        for method in self.scan_methods(resource) {
            let Some(binding) = self.select_binding(resource, method)? else {
                continue;
            };

            let method_level = self.resolver.method_interceptors(method);
            let interceptors =
                self.resolver
                    .resolve_chain(defaults, &resource_level, resource, &method_level, method);

            let route = Route::new(RouteDeclaration {
                resource: resource.id(),
                handler: method,
                method: binding.method,
                base_path: &base_path,
                relative_path: &binding.path,
                description: &binding.description,
                upload: method.upload_declaration(),
                interceptors,
                validators: &binding.validators,
                params: method.params().to_vec(),
            })?;

            if self.options.log_routes {
                debug!(bucket = %base_path, %route, "Registering route");
            }
            table.insert(&base_path, route)?;
        }

        Ok(())
    }

    /// Methods of a resource that may declare endpoints
    ///
    /// Below an abstract parent resource these are the public methods of the
    /// resource and of its recognized ancestors, a method shadowing any
    /// ancestor method of the same name. Otherwise only the methods declared
    /// on the resource itself are scanned.
    fn scan_methods(&self, resource: &'a ResourceDescriptor) -> Vec<&'a MethodDescriptor> {
        let catalog: &'a C = self.catalog;
        let parent_is_abstract = resource
            .parent()
            .and_then(|id| catalog.lookup(id))
            .is_some_and(ResourceDescriptor::is_abstract);

        if !parent_is_abstract {
            return resource.methods().iter().collect();
        }

        let mut names = HashSet::new();
        let mut visited = HashSet::new();
        let mut methods = Vec::new();
        let mut current = Some(resource);

        while let Some(descriptor) = current {
            if !visited.insert(descriptor.id()) {
                break;
            }
            for method in descriptor.methods().iter().filter(|m| m.is_public()) {
                if names.insert(method.name()) {
                    methods.push(method);
                }
            }
            current = descriptor.parent().and_then(|id| catalog.lookup(id));
        }

        methods
    }

    /// Pick the verb binding a method is registered under, if any
    fn select_binding<'m>(
        &self,
        resource: &ResourceDescriptor,
        method: &'m MethodDescriptor,
    ) -> Result<Option<&'m VerbBinding>> {
        let bindings = method.bindings();
        let selected = HttpMethod::CHECK_ORDER
            .iter()
            .find_map(|verb| bindings.iter().find(|binding| binding.method == *verb));

        let Some(selected) = selected else {
            return Ok(None);
        };

        if bindings.len() > 1 {
            let verbs = bindings
                .iter()
                .map(|binding| binding.method.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let site = HandlerRef::new(resource.id(), method).site();

            match self.options.verb_conflict {
                VerbConflictPolicy::Reject => return Err(Error::AmbiguousVerb { site, verbs }),
                VerbConflictPolicy::Warn => warn!(
                    %site,
                    %verbs,
                    registered = %selected.method,
                    "Method declares several HTTP verbs; only the first in check order is registered"
                ),
            }
        }

        Ok(Some(selected))
    }
}

/// Build a table with default options
pub fn build_route_table<C, R>(catalog: &C, resolver: &R) -> Result<RouteTable>
where
    C: ResourceCatalog + ?Sized,
    R: InterceptorResolver + ?Sized,
{
    RouteBuilder::new(catalog, resolver).build()
}
