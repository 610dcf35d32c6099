// RouteForge - startup route table construction for resource-oriented HTTP services
//
// Resources declare base paths, verb-bound methods, interceptors, validators
// and upload settings. RouteForge turns them into an immutable table grouped
// by verb and bucket and ordered most specific first.

// Re-export core functionality
pub use routeforge_core::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use routeforge_config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        build_route_table,
        BuildOptions,
        ClearLayer,
        Error,
        HttpMethod,
        Interceptor,
        InterceptorRef,
        InterceptorResolver,
        LayeredInterceptorResolver,
        MethodDescriptor,
        ParamDescriptor,
        ParamSource,
        ResourceCatalog,
        ResourceDescriptor,
        ResourceRegistry,
        Route,
        RouteBuilder,
        RouteTable,
        UploadDeclaration,
        ValidationError,
        Validator,
        ValidatorType,
        VerbBinding,
    };

    #[cfg(feature = "config")]
    pub use routeforge_config::RouteForgeConfig;
}
