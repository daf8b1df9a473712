//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$BRANCHWORK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/branchwork/config.toml`
//! 3. `~/.branchwork/config.toml` (canonical write location)
//!
//! # Repo Config
//!
//! Located at `<work_dir>/.branchwork/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing: `list_indent` must be within
//! [`MIN_INDENT`]..=[`MAX_INDENT`] and `store_file` must be a plain file name
//! that is not one of branchwork's own files (`config.toml`, `lock`, or a
//! `.tmp` staging file).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// File names inside `.branchwork/` that the store must not take over.
const RESERVED_FILES: &[&str] = &["config.toml", "lock"];

/// Smallest accepted indent width for branch listings.
pub const MIN_INDENT: usize = 1;

/// Largest accepted indent width for branch listings.
pub const MAX_INDENT: usize = 8;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// debug = false
/// list_indent = 2
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Emit debug logs without passing `--debug`
    pub debug: Option<bool>,

    /// Spaces per depth level in `branch --list`
    pub list_indent: Option<usize>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(indent) = self.list_indent {
            validate_indent(indent)?;
        }
        Ok(())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// store_file = "branches.json"
/// list_indent = 4
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// File name of the branch tree document inside `.branchwork/`
    pub store_file: Option<String>,

    /// Overrides the global `list_indent`
    pub list_indent: Option<usize>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(file) = &self.store_file {
            validate_store_file(file)?;
        }
        if let Some(indent) = self.list_indent {
            validate_indent(indent)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_indent(indent: usize) -> Result<(), ConfigError> {
    if !(MIN_INDENT..=MAX_INDENT).contains(&indent) {
        return Err(ConfigError::InvalidValue(format!(
            "list_indent must be between {} and {}, got {}",
            MIN_INDENT, MAX_INDENT, indent
        )));
    }
    Ok(())
}

pub(crate) fn validate_store_file(file: &str) -> Result<(), ConfigError> {
    if file.is_empty() {
        return Err(ConfigError::InvalidValue(
            "store_file cannot be empty".to_string(),
        ));
    }
    if file.contains('/') || file.contains('\\') || file == "." || file == ".." {
        return Err(ConfigError::InvalidValue(format!(
            "store_file must be a plain file name, got '{}'",
            file
        )));
    }
    if RESERVED_FILES.contains(&file) || file.ends_with(".tmp") {
        return Err(ConfigError::InvalidValue(format!(
            "store_file cannot be '{}', it is reserved by branchwork",
            file
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = GlobalConfig::default();
            assert!(config.debug.is_none());
            assert!(config.list_indent.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn indent_bounds() {
            for (indent, ok) in [(0, false), (1, true), (8, true), (9, false)] {
                let config = GlobalConfig {
                    list_indent: Some(indent),
                    ..Default::default()
                };
                assert_eq!(config.validate().is_ok(), ok, "indent {}", indent);
            }
        }

        #[test]
        fn roundtrip() {
            let config = GlobalConfig {
                debug: Some(true),
                list_indent: Some(4),
            };

            let toml = toml::to_string_pretty(&config).unwrap();
            let parsed: GlobalConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config, parsed);
        }
    }

    mod repo_config {
        use super::*;

        #[test]
        fn valid_store_file() {
            let config = RepoConfig {
                store_file: Some("tree.json".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn store_file_must_be_plain_name() {
            for bad in ["", "../x.json", "dir/x.json", "..", "a\\b"] {
                let config = RepoConfig {
                    store_file: Some(bad.to_string()),
                    ..Default::default()
                };
                assert!(config.validate().is_err(), "accepted {:?}", bad);
            }
        }

        #[test]
        fn store_file_cannot_shadow_own_files() {
            for bad in ["config.toml", "lock", "config.toml.tmp", "branches.json.tmp"] {
                let config = RepoConfig {
                    store_file: Some(bad.to_string()),
                    ..Default::default()
                };
                assert!(config.validate().is_err(), "accepted {:?}", bad);
            }
        }

        #[test]
        fn reject_unknown_fields() {
            let toml = r#"
                store_file = "branches.json"
                unknown_field = true
            "#;

            let result: Result<RepoConfig, _> = toml::from_str(toml);
            assert!(result.is_err());
        }
    }
}
