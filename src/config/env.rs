//! Environment variable access.
//!
//! # Responsibilities
//! - Abstract variable lookup behind [`EnvSource`] so startup can run
//!   against the process environment or an in-memory map
//! - Required, optional and comma-list accessors
//! - Optional dotenv file loading for the process environment

use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use crate::config::error::ConfigError;

/// A source of environment variables.
pub trait EnvSource: Send + Sync {
    /// Raw lookup, distinguishing unset from non-UTF-8 values.
    fn lookup(&self, name: &str) -> Result<String, VarError>;

    /// Lookup that treats unusable values as unset, with a warning.
    fn var(&self, name: &str) -> Option<String> {
        match self.lookup(name) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                tracing::warn!(variable = name, "Ignoring environment variable that is not valid UTF-8");
                None
            }
        }
    }

    /// Read a variable that must be present and non-empty.
    fn get_required_string(&self, name: &str) -> Result<String, ConfigError> {
        match self.lookup(name) {
            Ok(value) if !value.is_empty() => Ok(value),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::InvalidUnicode {
                name: name.to_string(),
            }),
            _ => Err(ConfigError::missing(name)),
        }
    }

    /// Read a variable, falling back to `default` when unset.
    fn get_optional_string(&self, name: &str, default: &str) -> String {
        self.var(name).unwrap_or_else(|| default.to_string())
    }

    /// Read a comma-separated list, falling back to `default` when unset.
    fn get_string_list(&self, name: &str, default: &str) -> Vec<String> {
        split_list(&self.get_optional_string(name, default))
    }
}

/// Split on commas, trim each element and drop the empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Load a dotenv file into the process environment.
    ///
    /// Variables already set are left untouched. Returns `Ok(false)` when the
    /// file does not exist.
    pub fn load_dotenv(path: &Path) -> Result<bool, dotenvy::Error> {
        match dotenvy::from_path(path) {
            Ok(()) => Ok(true),
            Err(e) if e.not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Result<String, VarError> {
        std::env::var(name)
    }
}

/// An in-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }
}

impl EnvSource for MapEnv {
    fn lookup(&self, name: &str) -> Result<String, VarError> {
        self.vars.get(name).cloned().ok_or(VarError::NotPresent)
    }
}
