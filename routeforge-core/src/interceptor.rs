// Interceptor chains attached to routes
//
// Running interceptors is the dispatcher's job. The route table only stores
// the chain each route ends up with, in the order the resolver returned it.

use crate::resource::{MethodDescriptor, ResourceDescriptor};
use std::fmt;
use std::sync::Arc;

/// Cross-cutting behavior wrapped around a handler
pub trait Interceptor: Send + Sync {
    /// Name used in diagnostics and route listings
    fn name(&self) -> &str;
}

/// Shared handle to an interceptor; one instance may sit in many chains
pub type InterceptorRef = Arc<dyn Interceptor>;

impl fmt::Debug for dyn Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interceptor({})", self.name())
    }
}

/// Which outer interceptor layers a resource or method opts out of
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearLayer {
    /// Drop the next layer up (resource-level for a method, defaults for a resource)
    Upper,
    /// Drop every outer layer
    All,
}

/// Produces the final interceptor chain of each route
pub trait InterceptorResolver {
    /// Global interceptors applied to every route unless cleared
    fn default_interceptors(&self) -> Vec<InterceptorRef>;

    fn resource_interceptors(&self, resource: &ResourceDescriptor) -> Vec<InterceptorRef> {
        resource.interceptors().to_vec()
    }

    fn method_interceptors(&self, method: &MethodDescriptor) -> Vec<InterceptorRef> {
        method.interceptors().to_vec()
    }

    /// Merge the three layers into the ordered chain stored on the route
    fn resolve_chain(
        &self,
        defaults: &[InterceptorRef],
        resource_level: &[InterceptorRef],
        resource: &ResourceDescriptor,
        method_level: &[InterceptorRef],
        method: &MethodDescriptor,
    ) -> Vec<InterceptorRef>;
}

/// Resolver that stacks defaults, then resource-level, then method-level
/// interceptors, honoring [`ClearLayer`] declarations.
///
/// A resource declaring any clear layer drops the defaults. A method
/// declaring [`ClearLayer::Upper`] drops the resource-level interceptors;
/// [`ClearLayer::All`] drops the defaults as well.
#[derive(Default, Clone)]
pub struct LayeredInterceptorResolver {
    defaults: Vec<InterceptorRef>,
}

impl LayeredInterceptorResolver {
    pub fn new(defaults: Vec<InterceptorRef>) -> Self {
        Self { defaults }
    }

    pub fn with_default(mut self, interceptor: InterceptorRef) -> Self {
        self.defaults.push(interceptor);
        self
    }
}

impl InterceptorResolver for LayeredInterceptorResolver {
    fn default_interceptors(&self) -> Vec<InterceptorRef> {
        self.defaults.clone()
    }

    fn resolve_chain(
        &self,
        defaults: &[InterceptorRef],
        resource_level: &[InterceptorRef],
        resource: &ResourceDescriptor,
        method_level: &[InterceptorRef],
        method: &MethodDescriptor,
    ) -> Vec<InterceptorRef> {
        let method_clear = method.clear_layer();
        let keep_defaults = resource.clear_layer().is_none() && method_clear != Some(ClearLayer::All);
        let keep_resource = method_clear.is_none();

        let mut chain = Vec::with_capacity(defaults.len() + resource_level.len() + method_level.len());
        if keep_defaults {
            chain.extend(defaults.iter().cloned());
        }
        if keep_resource {
            chain.extend(resource_level.iter().cloned());
        }
        chain.extend(method_level.iter().cloned());
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Interceptor for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    struct Orders;

    fn named(name: &'static str) -> InterceptorRef {
        Arc::new(Named(name))
    }

    fn chain_names(chain: &[InterceptorRef]) -> Vec<&str> {
        chain.iter().map(|i| i.name()).collect()
    }

    fn resolve(resource: &ResourceDescriptor, method: &MethodDescriptor) -> Vec<InterceptorRef> {
        let resolver = LayeredInterceptorResolver::new(vec![named("tx")]).with_default(named("auth"));
        let defaults = resolver.default_interceptors();
        let resource_level = resolver.resource_interceptors(resource);
        let method_level = resolver.method_interceptors(method);
        resolver.resolve_chain(&defaults, &resource_level, resource, &method_level, method)
    }

    #[test]
    fn test_layers_stack_in_order() {
        let resource = ResourceDescriptor::of::<Orders>().interceptor(named("audit"));
        let method = MethodDescriptor::new("list").interceptor(named("cache"));

        let chain = resolve(&resource, &method);
        assert_eq!(chain_names(&chain), vec!["tx", "auth", "audit", "cache"]);
    }

    #[test]
    fn test_method_clear_upper_drops_resource_layer() {
        let resource = ResourceDescriptor::of::<Orders>().interceptor(named("audit"));
        let method = MethodDescriptor::new("list")
            .interceptor(named("cache"))
            .clear(ClearLayer::Upper);

        let chain = resolve(&resource, &method);
        assert_eq!(chain_names(&chain), vec!["tx", "auth", "cache"]);
    }

    #[test]
    fn test_method_clear_all_keeps_only_method_layer() {
        let resource = ResourceDescriptor::of::<Orders>().interceptor(named("audit"));
        let method = MethodDescriptor::new("list")
            .interceptor(named("cache"))
            .clear(ClearLayer::All);

        let chain = resolve(&resource, &method);
        assert_eq!(chain_names(&chain), vec!["cache"]);
    }

    #[test]
    fn test_resource_clear_drops_defaults() {
        let resource = ResourceDescriptor::of::<Orders>()
            .interceptor(named("audit"))
            .clear(ClearLayer::Upper);
        let method = MethodDescriptor::new("list");

        let chain = resolve(&resource, &method);
        assert_eq!(chain_names(&chain), vec!["audit"]);
    }

    #[test]
    fn test_debug_uses_name() {
        let interceptor = named("tx");
        assert_eq!(format!("{:?}", interceptor), "Interceptor(tx)");
    }
}
