// Build options for the route table

use serde::{Deserialize, Serialize};

/// What to do when one method carries several verb bindings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbConflictPolicy {
    /// Honor the first verb in check order and log a warning
    #[default]
    Warn,
    /// Fail the build with `Error::AmbiguousVerb`
    Reject,
}

/// How two patterns of the same verb and bucket are compared for conflicts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCheck {
    /// Parameter names are ignored: `/users/{id}` conflicts with `/users/{uid}`
    #[default]
    Structural,
    /// Only identical patterns conflict
    Exact,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub verb_conflict: VerbConflictPolicy,
    pub duplicate_check: DuplicateCheck,
    /// Log every registered route at debug level
    pub log_routes: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            verb_conflict: VerbConflictPolicy::Warn,
            duplicate_check: DuplicateCheck::Structural,
            log_routes: true,
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verb_conflict(mut self, policy: VerbConflictPolicy) -> Self {
        self.verb_conflict = policy;
        self
    }

    pub fn duplicate_check(mut self, check: DuplicateCheck) -> Self {
        self.duplicate_check = check;
        self
    }

    pub fn log_routes(mut self, enable: bool) -> Self {
        self.log_routes = enable;
        self
    }
}
