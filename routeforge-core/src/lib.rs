// Core library for RouteForge
// Builds the immutable route table an HTTP dispatcher consults: path
// composition, conflict checks and specificity ordering happen once at startup

pub mod builder;
pub mod config;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod logging;
pub mod ordering;
pub mod path;
pub mod resource;
pub mod route;
pub mod table;
pub mod upload;
pub mod validator;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use builder::*;
pub use config::*;
pub use error::*;
pub use http::*;
pub use interceptor::*;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use ordering::{compare_bucket_keys, compare_routes, BucketKey};
pub use path::{compose_base_path, match_path, PathParams};
pub use resource::*;
pub use route::*;
pub use table::*;
pub use upload::*;
pub use validator::*;
