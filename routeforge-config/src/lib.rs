// Configuration for RouteForge route table builds
//
// Settings come from a TOML or JSON file and can be overridden through
// `ROUTEFORGE_*` environment variables, optionally read from a `.env` file.

pub mod env;
pub mod error;
pub mod loader;

pub use env::{EnvLoader, ENV_PREFIX};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use routeforge_core::{
    BuildOptions, DuplicateCheck, InterceptorResolver, LogConfig, LogFormat, LogLevel,
    ResourceCatalog, RouteBuilder, VerbConflictPolicy,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration of a route table build
///
/// ```toml
/// [build]
/// verb_conflict = "reject"
/// duplicate_check = "structural"
/// log_routes = true
///
/// [logging]
/// level = "info"
/// format = "pretty"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteForgeConfig {
    pub build: BuildOptions,
    pub logging: LogConfig,
}

impl RouteForgeConfig {
    /// Load a configuration file, format picked from its extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let value = ConfigLoader::auto(path)?.load_file(path)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// Load from `.env`, an optional file and the environment, in that order
    ///
    /// A missing `.env` is ignored; a missing configuration file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        EnvLoader::load_dotenv(None)?;

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(&EnvLoader::routeforge())?;
        Ok(config)
    }

    /// Override settings from environment variables
    pub fn apply_env(&mut self, loader: &EnvLoader) -> Result<()> {
        if let Some(value) = loader.lookup("VERB_CONFLICT")? {
            self.build.verb_conflict = match value.to_lowercase().as_str() {
                "warn" => VerbConflictPolicy::Warn,
                "reject" => VerbConflictPolicy::Reject,
                _ => return Err(invalid(loader, "VERB_CONFLICT", value)),
            };
        }

        if let Some(value) = loader.lookup("DUPLICATE_CHECK")? {
            self.build.duplicate_check = match value.to_lowercase().as_str() {
                "structural" => DuplicateCheck::Structural,
                "exact" => DuplicateCheck::Exact,
                _ => return Err(invalid(loader, "DUPLICATE_CHECK", value)),
            };
        }

        if let Some(value) = loader.lookup("LOG_ROUTES")? {
            self.build.log_routes = match value.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => return Err(invalid(loader, "LOG_ROUTES", value)),
            };
        }

        if let Some(value) = loader.lookup("LOG_LEVEL")? {
            self.logging.level =
                LogLevel::from_str(&value).ok_or_else(|| invalid(loader, "LOG_LEVEL", value))?;
        }

        if let Some(value) = loader.lookup("LOG_FORMAT")? {
            self.logging.format =
                LogFormat::from_str(&value).ok_or_else(|| invalid(loader, "LOG_FORMAT", value))?;
        }

        Ok(())
    }

    /// Route builder using these build options
    pub fn route_builder<'a, C, R>(&self, catalog: &'a C, resolver: &'a R) -> RouteBuilder<'a, C, R>
    where
        C: ResourceCatalog + ?Sized,
        R: InterceptorResolver + ?Sized,
    {
        RouteBuilder::new(catalog, resolver).options(self.build.clone())
    }

    /// Install the configured global subscriber
    pub fn init_logging(&self) -> routeforge_core::Result<()> {
        self.logging.init()
    }
}

fn invalid(loader: &EnvLoader, key: &str, value: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: loader.full_key(key),
        value,
    }
}
