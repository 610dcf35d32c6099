// Validators attached to routes
//
// A route owns fresh validator instances, one per declared validator type.
// Running them against request arguments happens outside the table.

use crate::error::BoxError;
use std::any::Any;
use std::fmt;

/// Validation failure for a single argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Argument that failed validation
    pub field: String,
    /// Error message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Trait for route argument validators
pub trait Validator: Send + Sync {
    /// Validate a bound argument value
    fn validate(&self, value: &dyn Any, field: &str) -> Result<(), ValidationError>;

    /// Get validator name
    fn name(&self) -> &'static str;
}

/// Constructor used to create one validator instance per route
pub type ValidatorFactory = fn() -> Result<Box<dyn Validator>, BoxError>;

/// A declared validator type
///
/// Declarations name a type, not an instance: every route built from the
/// declaration calls the factory and owns what it returns.
#[derive(Clone, Copy)]
pub struct ValidatorType {
    name: &'static str,
    factory: ValidatorFactory,
}

impl ValidatorType {
    /// Declare a validator built through its `Default` implementation
    pub fn of<V: Validator + Default + 'static>() -> Self {
        Self {
            name: std::any::type_name::<V>(),
            factory: || Ok(Box::new(V::default()) as Box<dyn Validator>),
        }
    }

    /// Declare a validator whose construction can fail
    pub fn with_factory(name: &'static str, factory: ValidatorFactory) -> Self {
        Self { name, factory }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build a new instance
    pub fn instantiate(&self) -> Result<Box<dyn Validator>, BoxError> {
        (self.factory)()
    }
}

impl fmt::Debug for ValidatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidatorType").field(&self.name).finish()
    }
}
