//! Worker configuration
//!
//! Sources, lowest to highest precedence: built-in defaults, a TOML file,
//! then `SQLWORKER_*` environment variables. Command-line flags are applied
//! on top by the binary.

use crate::errors::{Result, WorkerError};
use crate::logging_facility::Profile;
use crate::resolver::BUILTIN_ASSET_PATH;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_BUILTIN_ASSET_PATH: &str = "SQLWORKER_BUILTIN_ASSET_PATH";
pub const ENV_REQUIRE_ASSET: &str = "SQLWORKER_REQUIRE_ASSET";
pub const ENV_LOG_PROFILE: &str = "SQLWORKER_LOG_PROFILE";

/// Settings for one worker context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkerConfig {
    /// Location substituted for the default asset name when an `open`
    /// carries no `sqlite3WasmPath`
    pub builtin_asset_path: String,
    /// Fail `open` unless the resolved asset can be read
    pub require_asset: bool,
    /// Logging profile used by the binary
    pub log_profile: Profile,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            builtin_asset_path: BUILTIN_ASSET_PATH.to_string(),
            require_asset: false,
            log_profile: Profile::Development,
        }
    }
}

impl WorkerConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Config` on malformed TOML, unknown keys, or an
    /// empty `builtin_asset_path`.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: WorkerConfig = toml::from_str(text)?;
        config.validate()
    }

    /// Read and parse a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Io` if the file cannot be read, otherwise as
    /// `from_toml_str`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| WorkerError::io("read_config", e))?;
        Self::from_toml_str(&text)
    }

    /// Defaults or the given file, then the process environment
    ///
    /// # Errors
    ///
    /// Propagates file and environment errors.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Config` for unparsable values.
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_BUILTIN_ASSET_PATH) {
            self.builtin_asset_path = path;
        }
        if let Some(raw) = lookup(ENV_REQUIRE_ASSET) {
            self.require_asset = parse_bool(ENV_REQUIRE_ASSET, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_PROFILE) {
            self.log_profile = raw
                .parse()
                .map_err(|reason| WorkerError::config(format!("{}: {}", ENV_LOG_PROFILE, reason)))?;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.builtin_asset_path.trim().is_empty() {
            return Err(WorkerError::config("builtin_asset_path must not be empty"));
        }
        Ok(self)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(WorkerError::config(format!(
            "{}: expected a boolean, got '{}'",
            key, other
        ))),
    }
}
