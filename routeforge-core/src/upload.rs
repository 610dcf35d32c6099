// File upload settings declared on a handler method

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How an uploaded file is named on disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameStrategy {
    /// Keep the client-supplied file name
    Keep,
    /// Append a timestamp before the extension when the name is taken
    Timestamp,
    /// A renamer registered by the application under this name
    Custom(String),
}

/// Upload behavior as written on the method
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDeclaration {
    /// Target directory, relative to the application's upload root
    pub dir: String,
    pub overwrite: bool,
    pub renamer: RenameStrategy,
    /// Maximum accepted size in bytes, `None` for no limit
    pub max: Option<u64>,
    pub encoding: String,
    /// Accepted file extensions, empty to accept any
    pub allows: Vec<String>,
}

impl Default for UploadDeclaration {
    fn default() -> Self {
        Self {
            dir: String::new(),
            overwrite: false,
            renamer: RenameStrategy::Timestamp,
            max: None,
            encoding: "UTF-8".to_string(),
            allows: Vec::new(),
        }
    }
}

impl UploadDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn renamer(mut self, renamer: RenameStrategy) -> Self {
        self.renamer = renamer;
        self
    }

    pub fn max(mut self, max_bytes: u64) -> Self {
        self.max = Some(max_bytes);
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn allow(mut self, extension: impl Into<String>) -> Self {
        self.allows.push(extension.into());
        self
    }
}

/// Upload configuration stored on a route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    pub target_dir: PathBuf,
    pub overwrite_existing: bool,
    pub rename_strategy: RenameStrategy,
    pub max_bytes: Option<u64>,
    pub encoding: String,
    pub allowed_extensions: Vec<String>,
}

impl From<&UploadDeclaration> for UploadConfig {
    fn from(declaration: &UploadDeclaration) -> Self {
        Self {
            target_dir: PathBuf::from(&declaration.dir),
            overwrite_existing: declaration.overwrite,
            rename_strategy: declaration.renamer.clone(),
            max_bytes: declaration.max,
            encoding: declaration.encoding.clone(),
            allowed_extensions: declaration.allows.clone(),
        }
    }
}

impl UploadConfig {
    /// Check a file name against the allowed extensions
    pub fn allows(&self, file_name: &str) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        match file_name.rsplit_once('.') {
            Some((_, ext)) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}
