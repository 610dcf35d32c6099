// Error types for route table construction
//
// Every error here is raised while the table is being built and aborts the
// whole build. Nothing is retried.

use crate::HttpMethod;
use std::fmt;
use thiserror::Error;

/// Boxed failure reported by a validator factory
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Resource path '{path}' ({resource}) could not contain a path parameter, because it is a resource url"
    )]
    InvalidResourcePath { resource: String, path: String },

    #[error("Same path pattern '{method} {pattern}' ({existing}) conflicts with ({conflicting})")]
    DuplicateRoute {
        method: HttpMethod,
        pattern: String,
        existing: DeclarationSite,
        conflicting: DeclarationSite,
    },

    #[error("Could not instantiate validator {validator} for ({site}): {source}")]
    ValidatorInstantiation {
        validator: String,
        site: DeclarationSite,
        #[source]
        source: BoxError,
    },

    #[error("Method ({site}) declares several HTTP verbs: {verbs}")]
    AmbiguousVerb { site: DeclarationSite, verbs: String },

    #[error("Logging error: {0}")]
    Logging(String),
}

impl Error {
    /// Check if this error points at two conflicting declarations
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::DuplicateRoute { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Where a route was declared, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSite {
    /// Short type name of the owning resource
    pub resource: String,
    /// Name of the handler method
    pub method: String,
    /// Source line of the handler method
    pub line: u32,
}

impl fmt::Display for DeclarationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}:{}", self.resource, self.method, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(resource: &str, line: u32) -> DeclarationSite {
        DeclarationSite {
            resource: resource.to_string(),
            method: "find".to_string(),
            line,
        }
    }

    #[test]
    fn test_duplicate_message_names_both_sites() {
        let err = Error::DuplicateRoute {
            method: HttpMethod::GET,
            pattern: "/users/{id}".to_string(),
            existing: site("UserResource", 12),
            conflicting: site("AccountResource", 40),
        };
        let message = err.to_string();
        assert!(message.contains("GET /users/{id}"));
        assert!(message.contains("UserResource::find:12"));
        assert!(message.contains("AccountResource::find:40"));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_validator_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::ValidatorInstantiation {
            validator: "EmailValidator".to_string(),
            site: site("UserResource", 3),
            source: "missing pattern".into(),
        };
        assert!(err.source().is_some());
        assert!(!err.is_conflict());
        assert!(err.to_string().contains("missing pattern"));
    }
}
