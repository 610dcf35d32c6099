//! Route entity
//!
//! A [`Route`] describes one endpoint: verb, composed pattern, the handler it
//! resolves to and everything the dispatcher needs around the call. Routes
//! are built once while the table is assembled and never change afterwards.

use crate::error::{DeclarationSite, Error, Result};
use crate::interceptor::InterceptorRef;
use crate::path::{self, PathParams};
use crate::resource::{MethodDescriptor, ParamDescriptor, ResourceId};
use crate::upload::{UploadConfig, UploadDeclaration};
use crate::validator::{Validator, ValidatorType};
use crate::HttpMethod;
use std::fmt;

/// Non-owning reference to the resource method a route invokes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerRef {
    resource: ResourceId,
    method: String,
    line: u32,
}

impl HandlerRef {
    pub fn new(resource: ResourceId, method: &MethodDescriptor) -> Self {
        Self {
            resource,
            method: method.name().to_string(),
            line: method.source_line(),
        }
    }

    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    pub fn method_name(&self) -> &str {
        &self.method
    }

    pub fn source_line(&self) -> u32 {
        self.line
    }

    pub fn site(&self) -> DeclarationSite {
        DeclarationSite {
            resource: self.resource.short_name().to_string(),
            method: self.method.clone(),
            line: self.line,
        }
    }
}

/// Everything needed to build one route
pub struct RouteDeclaration<'a> {
    pub resource: ResourceId,
    pub handler: &'a MethodDescriptor,
    pub method: HttpMethod,
    /// Composed base path of the owning resource
    pub base_path: &'a str,
    /// Path declared on the verb binding, relative to `base_path`
    pub relative_path: &'a str,
    pub description: &'a str,
    pub upload: Option<&'a UploadDeclaration>,
    /// Final chain, already merged by the interceptor resolver
    pub interceptors: Vec<InterceptorRef>,
    pub validators: &'a [ValidatorType],
    pub params: Vec<ParamDescriptor>,
}

/// One endpoint of the route table
pub struct Route {
    resource: ResourceId,
    method: HttpMethod,
    pattern: String,
    literal: String,
    shape: String,
    params: Vec<ParamDescriptor>,
    handler: HandlerRef,
    interceptors: Vec<InterceptorRef>,
    description: String,
    validators: Vec<Box<dyn Validator>>,
    upload: Option<UploadConfig>,
}

impl Route {
    /// Build a route from its declaration
    ///
    /// Each declared validator type is instantiated exactly once; the first
    /// failure aborts with [`Error::ValidatorInstantiation`].
    pub fn new(declaration: RouteDeclaration<'_>) -> Result<Self> {
        let handler = HandlerRef::new(declaration.resource, declaration.handler);

        let validators = declaration
            .validators
            .iter()
            .map(|validator| {
                validator
                    .instantiate()
                    .map_err(|source| Error::ValidatorInstantiation {
                        validator: validator.name().to_string(),
                        site: handler.site(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let pattern = path::join_method_path(declaration.base_path, declaration.relative_path);

        Ok(Self {
            resource: declaration.resource,
            method: declaration.method,
            literal: path::strip_placeholders(&pattern),
            shape: path::structural_shape(&pattern),
            pattern,
            params: declaration.params,
            handler,
            interceptors: declaration.interceptors,
            description: declaration.description.to_string(),
            validators,
            upload: declaration.upload.map(UploadConfig::from),
        })
    }

    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    pub fn http_method(&self) -> HttpMethod {
        self.method
    }

    /// Full path pattern, e.g. `/users/{id}`
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Pattern with every `/{param}` segment removed
    pub fn literal_pattern(&self) -> &str {
        &self.literal
    }

    /// Pattern with parameter names erased, e.g. `/users/{}`
    pub fn shape(&self) -> &str {
        &self.shape
    }

    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    pub fn interceptors(&self) -> &[InterceptorRef] {
        &self.interceptors
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn validators(&self) -> &[Box<dyn Validator>] {
        &self.validators
    }

    pub fn upload(&self) -> Option<&UploadConfig> {
        self.upload.as_ref()
    }

    pub fn site(&self) -> DeclarationSite {
        self.handler.site()
    }

    /// Structurally match a request path against this route's pattern
    pub fn matches(&self, request_path: &str) -> Option<PathParams> {
        path::match_path(&self.pattern, request_path)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validators: Vec<&str> = self.validators.iter().map(|v| v.name()).collect();
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("resource", &self.resource.short_name())
            .field("handler", &self.handler.method_name())
            .field("params", &self.params)
            .field("interceptors", &self.interceptors)
            .field("validators", &validators)
            .field("upload", &self.upload)
            .finish()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.pattern, self.handler.site())
    }
}
