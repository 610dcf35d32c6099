//! Resource descriptors and the catalog that supplies them
//!
//! A resource groups related endpoints under one base path. Descriptors are
//! produced by whatever scans the application (macros, a registration
//! module, tests) and are only read by the route table build.
//!
//! # Examples
//!
//! ```
//! use routeforge_core::{HttpMethod, MethodDescriptor, ResourceDescriptor, ResourceRegistry, VerbBinding};
//!
//! struct UserResource;
//!
//! let registry = ResourceRegistry::new().with(
//!     ResourceDescriptor::of::<UserResource>()
//!         .path("users")
//!         .method(
//!             MethodDescriptor::new("me")
//!                 .line(12)
//!                 .verb(VerbBinding::new(HttpMethod::GET, "/me")),
//!         ),
//! );
//!
//! assert_eq!(registry.len(), 1);
//! ```

use crate::interceptor::{ClearLayer, InterceptorRef};
use crate::upload::UploadDeclaration;
use crate::validator::ValidatorType;
use crate::HttpMethod;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

/// Identity of a resource type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId {
    type_id: TypeId,
    type_name: &'static str,
}

impl ResourceId {
    pub fn of<R: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<R>(),
            type_name: std::any::type_name::<R>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without its module path, used in diagnostics
    pub fn short_name(&self) -> &'static str {
        let base = self.type_name.split('<').next().unwrap_or(self.type_name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// Where the binder takes a parameter's value from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamSource {
    Path,
    Query,
    Header,
    Body,
    File,
}

/// A formal parameter of a handler method, as scanned from its signature
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub name: String,
    pub source: ParamSource,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, source: ParamSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParamSource::Path)
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParamSource::Query)
    }

    pub fn body(name: impl Into<String>) -> Self {
        Self::new(name, ParamSource::Body)
    }
}

/// One HTTP verb declaration on a method
#[derive(Clone, Debug)]
pub struct VerbBinding {
    pub method: HttpMethod,
    pub path: String,
    pub description: String,
    pub validators: Vec<ValidatorType>,
}

impl VerbBinding {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            description: String::new(),
            validators: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validator(mut self, validator: ValidatorType) -> Self {
        self.validators.push(validator);
        self
    }
}

/// A method declared on a resource
#[derive(Clone)]
pub struct MethodDescriptor {
    name: String,
    visibility: Visibility,
    line: u32,
    bindings: Vec<VerbBinding>,
    upload: Option<UploadDeclaration>,
    params: Vec<ParamDescriptor>,
    interceptors: Vec<InterceptorRef>,
    clear: Option<ClearLayer>,
}

impl MethodDescriptor {
    /// Create a public method with no verb bindings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            line: 0,
            bindings: Vec::new(),
            upload: None,
            params: Vec::new(),
            interceptors: Vec::new(),
            clear: None,
        }
    }

    pub fn line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn verb(mut self, binding: VerbBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn upload(mut self, upload: UploadDeclaration) -> Self {
        self.upload = Some(upload);
        self
    }

    pub fn param(mut self, param: ParamDescriptor) -> Self {
        self.params.push(param);
        self
    }

    pub fn interceptor(mut self, interceptor: InterceptorRef) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn clear(mut self, layer: ClearLayer) -> Self {
        self.clear = Some(layer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn source_line(&self) -> u32 {
        self.line
    }

    pub fn bindings(&self) -> &[VerbBinding] {
        &self.bindings
    }

    pub fn upload_declaration(&self) -> Option<&UploadDeclaration> {
        self.upload.as_ref()
    }

    pub fn params(&self) -> &[ParamDescriptor] {
        &self.params
    }

    pub fn interceptors(&self) -> &[InterceptorRef] {
        &self.interceptors
    }

    pub fn clear_layer(&self) -> Option<ClearLayer> {
        self.clear
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("line", &self.line)
            .field("bindings", &self.bindings)
            .field("params", &self.params)
            .finish()
    }
}

/// A resource type with its endpoint declarations
#[derive(Clone)]
pub struct ResourceDescriptor {
    id: ResourceId,
    base_path: String,
    parent: Option<ResourceId>,
    is_abstract: bool,
    interceptors: Vec<InterceptorRef>,
    clear: Option<ClearLayer>,
    methods: Vec<MethodDescriptor>,
}

impl ResourceDescriptor {
    pub fn of<R: 'static>() -> Self {
        Self {
            id: ResourceId::of::<R>(),
            base_path: String::new(),
            parent: None,
            is_abstract: false,
            interceptors: Vec::new(),
            clear: None,
            methods: Vec::new(),
        }
    }

    /// Set the resource's own base path, relative to its parent's
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Declare the parent type this resource inherits from
    pub fn extends<P: 'static>(mut self) -> Self {
        self.parent = Some(ResourceId::of::<P>());
        self
    }

    pub fn abstract_resource(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn interceptor(mut self, interceptor: InterceptorRef) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn clear(mut self, layer: ClearLayer) -> Self {
        self.clear = Some(layer);
        self
    }

    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn parent(&self) -> Option<ResourceId> {
        self.parent
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn interceptors(&self) -> &[InterceptorRef] {
        &self.interceptors
    }

    pub fn clear_layer(&self) -> Option<ClearLayer> {
        self.clear
    }

    /// Methods declared directly on this resource, in declaration order
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }
}

impl fmt::Debug for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDescriptor")
            .field("id", &self.id.type_name())
            .field("base_path", &self.base_path)
            .field("parent", &self.parent.map(|p| p.type_name()))
            .field("is_abstract", &self.is_abstract)
            .field("methods", &self.methods)
            .finish()
    }
}

/// Source of resource descriptors for a route table build
pub trait ResourceCatalog {
    /// Resources whose endpoints go into the table, in discovery order
    fn resources(&self) -> Vec<&ResourceDescriptor>;

    /// Find any known resource, abstract ones included
    fn lookup(&self, id: ResourceId) -> Option<&ResourceDescriptor>;
}

/// In-memory catalog filled by explicit registration
#[derive(Debug, Default, Clone)]
pub struct ResourceRegistry {
    descriptors: Vec<ResourceDescriptor>,
    index: HashMap<ResourceId, usize>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource, replacing an earlier descriptor of the same type
    pub fn register(&mut self, descriptor: ResourceDescriptor) {
        match self.index.get(&descriptor.id()) {
            Some(&position) => self.descriptors[position] = descriptor,
            None => {
                self.index.insert(descriptor.id(), self.descriptors.len());
                self.descriptors.push(descriptor);
            }
        }
    }

    pub fn with(mut self, descriptor: ResourceDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl ResourceCatalog for ResourceRegistry {
    fn resources(&self) -> Vec<&ResourceDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| !descriptor.is_abstract())
            .collect()
    }

    fn lookup(&self, id: ResourceId) -> Option<&ResourceDescriptor> {
        self.index.get(&id).map(|&position| &self.descriptors[position])
    }
}
