// Environment variable loading

use crate::{ConfigError, Result};
use std::env;
use std::path::PathBuf;

/// Prefix of the variables read by [`EnvLoader::routeforge`]
pub const ENV_PREFIX: &str = "ROUTEFORGE";

/// Environment variable loader
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Loader for `ROUTEFORGE_*` variables
    pub fn routeforge() -> Self {
        Self::new(Some(ENV_PREFIX.to_string()))
    }

    /// Variable name for `key`, e.g. `ROUTEFORGE_LOG_LEVEL`
    pub fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    /// Read `key`; an unset variable is `None`
    pub fn lookup(&self, key: &str) -> Result<Option<String>> {
        match env::var(self.full_key(key)) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::EnvError(e)),
        }
    }

    /// Read a `.env` file into the process environment
    ///
    /// Without a path, a missing `.env` in the working directory is ignored,
    /// but a malformed one is still an error.
    pub fn load_dotenv(path: Option<&str>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => ignore_missing(dotenvy::dotenv())?,
        }
        Ok(())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::routeforge()
    }
}

/// A missing `.env` is fine; one that cannot be read or parsed is not
fn ignore_missing(result: std::result::Result<PathBuf, dotenvy::Error>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::LoadError(e.to_string())),
    }
}
