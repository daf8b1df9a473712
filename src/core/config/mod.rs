//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! There are two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Per working directory overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$BRANCHWORK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/branchwork/config.toml`
//! 3. `~/.branchwork/config.toml` (canonical write location)
//!
//! # Repo Config Locations
//!
//! Searched in order:
//! 1. `<work_dir>/.branchwork/config.toml` (canonical)
//! 2. `<work_dir>/.branchwork.toml` (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use branchwork::core::config::Config;
//! use branchwork::core::paths::RepoPaths;
//!
//! let result = Config::load(Some(&RepoPaths::new("."))).unwrap();
//! let config = result.config;
//!
//! println!("Store: {}", config.store_file());
//! println!("Indent: {}", config.list_indent());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::{RepoPaths, DEFAULT_STORE_FILE};

/// Default spaces per depth level in branch listings.
pub const DEFAULT_LIST_INDENT: usize = 2;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules: repo config overrides global
/// config, which overrides defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if present)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `paths` is provided, also loads the repo config for that working
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(paths: Option<&RepoPaths>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global_from(&Self::global_candidates())?;

        let (repo, repo_path) = match paths {
            Some(paths) => Self::load_repo(paths, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    /// Global config locations, in search order.
    fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(path) = std::env::var("BRANCHWORK_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("branchwork/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".branchwork/config.toml"));
        }

        candidates
    }

    /// Load the first existing global config among `candidates`.
    fn load_global_from(
        candidates: &[PathBuf],
    ) -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        for path in candidates {
            if path.exists() {
                let config = read_toml(path)?;
                return Ok((config, Some(path.clone())));
            }
        }
        Ok((GlobalConfig::default(), None))
    }

    fn load_repo(
        paths: &RepoPaths,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let canonical = paths.repo_config_path();
        if canonical.exists() {
            let config = read_toml(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        let compat = paths.work_dir.join(".branchwork.toml");
        if compat.exists() {
            warnings.push(ConfigWarning {
                message: format!(
                    "Using deprecated config location. Please move to '{}'",
                    canonical.display()
                ),
                path: compat.clone(),
            });
            let config = read_toml(&compat)?;
            return Ok((Some(config), Some(compat)));
        }

        Ok((None, None))
    }

    /// Write repo config atomically.
    ///
    /// Creates parent directories if needed. Uses atomic write
    /// (write to temp file, then rename) to prevent corruption.
    pub fn write_repo(paths: &RepoPaths, config: &RepoConfig) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = paths.repo_config_path();
        write_config_atomic(&path, config)?;
        Ok(path)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// File name of the branch tree document.
    ///
    /// Defaults to `branches.json`.
    pub fn store_file(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.store_file.as_deref())
            .unwrap_or(DEFAULT_STORE_FILE)
    }

    /// Spaces per depth level in branch listings.
    ///
    /// Repo overrides global. Defaults to 2.
    pub fn list_indent(&self) -> usize {
        self.repo
            .as_ref()
            .and_then(|r| r.list_indent)
            .or(self.global.list_indent)
            .unwrap_or(DEFAULT_LIST_INDENT)
    }

    /// Check if debug logging is enabled by default.
    ///
    /// Defaults to `false`.
    pub fn debug(&self) -> bool {
        self.global.debug.unwrap_or(false)
    }

    /// Look up a value by key, with precedence applied.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "store_file" => Ok(self.store_file().to_string()),
            "list_indent" => Ok(self.list_indent().to_string()),
            "debug" => Ok(self.debug().to_string()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    /// All keys with their effective values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("store_file", self.store_file().to_string()),
            ("list_indent", self.list_indent().to_string()),
            ("debug", self.debug().to_string()),
        ]
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

impl RepoConfig {
    /// Set a repo-scoped key from its string form.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnknownKey`] for keys that are not repo-scoped
    /// - [`ConfigError::InvalidValue`] if the value does not parse or validate
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "store_file" => {
                schema::validate_store_file(value)?;
                self.store_file = Some(value.to_string());
            }
            "list_indent" => {
                let indent = value.parse::<usize>().map_err(|_| {
                    ConfigError::InvalidValue(format!("list_indent must be a number, got '{}'", value))
                })?;
                schema::validate_indent(indent)?;
                self.list_indent = Some(indent);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_config_atomic<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
