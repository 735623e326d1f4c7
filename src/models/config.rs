//! Checker configuration model

use crate::discovery::FilePattern;
use crate::logging::LogFormat;
use crate::types::{AppError, ErrorPolicy, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the file name pattern
pub const ENV_FILE_NAME: &str = "ENV_CONFIG_FILE_NAME";
/// Environment variable naming the project source directory
pub const ENV_SOURCE_DIR: &str = "ENV_CONFIG_SOURCE_DIR";
/// Environment variable naming the scan directory directly
pub const ENV_RESOURCE_DIR: &str = "ENV_CONFIG_RESOURCE_DIR";
/// Environment variable selecting the error policy
pub const ENV_ERROR_POLICY: &str = "ENV_CONFIG_ERROR_POLICY";
/// Environment variable toggling colored output
pub const ENV_ENABLE_COLOR: &str = "ENV_CONFIG_ENABLE_COLOR";

/// Main checker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Project source directory; the scan root is its `resources` sibling
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Explicit scan directory, overriding the derived one
    #[serde(default)]
    pub resource_dir: Option<PathBuf>,

    /// File name pattern (`*` wildcards allowed)
    #[serde(default)]
    pub file_pattern: Option<String>,

    /// Treatment of errors other than validation failures
    #[serde(default)]
    pub error_policy: ErrorPolicy,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Format of log lines written to stderr
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            resource_dir: None,
            file_pattern: None,
            error_policy: ErrorPolicy::default(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
            log_format: LogFormat::default(),
        }
    }
}

impl CheckConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that scans `dir` directly
    pub fn for_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Directory holding the environment config files
    pub fn scan_directory(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.resource_dir {
            return Ok(dir.clone());
        }
        let parent = self.source_dir.parent().ok_or_else(|| {
            AppError::config(format!(
                "Source directory {} has no parent to hold a {} directory",
                self.source_dir.display(),
                crate::defaults::RESOURCES_DIR_NAME
            ))
        })?;
        Ok(parent.join(crate::defaults::RESOURCES_DIR_NAME))
    }

    /// Compiled file name pattern
    pub fn pattern(&self) -> Result<FilePattern> {
        FilePattern::new(self.file_pattern.as_deref())
    }

    /// Validate the configuration and return any errors
    ///
    /// Only catches settings that are unusable on their face. A pattern that
    /// does not compile or a source directory without a parent is reported by
    /// the check itself, where the error policy applies to it.
    pub fn validate(&self) -> Result<()> {
        if self.resource_dir.is_none() && self.source_dir.as_os_str().is_empty() {
            return Err(AppError::config("Source directory cannot be empty"));
        }

        if let Some(dir) = &self.resource_dir {
            if dir.as_os_str().is_empty() {
                return Err(AppError::config("Resource directory cannot be empty"));
            }
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|name| std::env::var(name).ok())
    }

    /// Merge values provided by `lookup`, keyed by environment variable name
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(pattern) = lookup(ENV_FILE_NAME) {
            if !pattern.trim().is_empty() {
                self.file_pattern = Some(pattern);
            }
        }

        if let Some(source_dir) = lookup(ENV_SOURCE_DIR) {
            if !source_dir.trim().is_empty() {
                self.source_dir = PathBuf::from(source_dir.trim());
            }
        }

        if let Some(resource_dir) = lookup(ENV_RESOURCE_DIR) {
            if !resource_dir.trim().is_empty() {
                self.resource_dir = Some(PathBuf::from(resource_dir.trim()));
            }
        }

        if let Some(policy) = lookup(ENV_ERROR_POLICY) {
            self.error_policy = policy.parse()?;
        }

        if let Some(enable_color) = lookup(ENV_ENABLE_COLOR) {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", ENV_ENABLE_COLOR, enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_source_dir() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_SOURCE_DIR)
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = CheckConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.error_policy, ErrorPolicy::Strict);
    }

    #[test]
    fn test_scan_directory_is_resources_sibling() {
        let config = CheckConfig::default();
        assert_eq!(config.scan_directory().unwrap(), PathBuf::from("src/main/resources"));

        let mut config = CheckConfig::default();
        config.source_dir = PathBuf::from("/work/app/src/main/kotlin");
        assert_eq!(config.scan_directory().unwrap(), PathBuf::from("/work/app/src/main/resources"));
    }

    #[test]
    fn test_resource_dir_overrides_source_dir() {
        let config = CheckConfig::for_directory("/etc/app");
        assert_eq!(config.scan_directory().unwrap(), PathBuf::from("/etc/app"));
    }

    #[test]
    fn test_root_source_dir_fails_at_scan_time() {
        let mut config = CheckConfig::default();
        config.source_dir = PathBuf::from("/");
        assert!(config.validate().is_ok());
        assert_eq!(config.scan_directory().unwrap_err().category(), "CONFIG");
    }

    #[test]
    fn test_empty_source_dir_invalid() {
        let mut config = CheckConfig::default();
        config.source_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_pattern_fails_at_compile_time() {
        let mut config = CheckConfig::default();
        config.file_pattern = Some("env-(*".to_string());
        assert!(config.validate().is_ok());
        assert_eq!(config.pattern().unwrap_err().category(), "CONFIG");
    }

    #[test]
    fn test_empty_resource_dir_invalid() {
        let config = CheckConfig::for_directory("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_from_lookup() {
        let mut config = CheckConfig::default();
        config
            .merge_from_lookup(lookup_from(&[
                (ENV_FILE_NAME, "app-*.properties"),
                (ENV_RESOURCE_DIR, " /srv/config "),
                (ENV_ERROR_POLICY, "lenient"),
                (ENV_ENABLE_COLOR, "false"),
            ]))
            .unwrap();

        assert_eq!(config.file_pattern.as_deref(), Some("app-*.properties"));
        assert_eq!(config.resource_dir, Some(PathBuf::from("/srv/config")));
        assert_eq!(config.error_policy, ErrorPolicy::Lenient);
        assert!(!config.enable_color);
    }

    #[test]
    fn test_merge_blank_values_ignored() {
        let mut config = CheckConfig::default();
        config
            .merge_from_lookup(lookup_from(&[(ENV_FILE_NAME, "  "), (ENV_SOURCE_DIR, "")]))
            .unwrap();
        assert_eq!(config, CheckConfig::default());
    }

    #[test]
    fn test_merge_invalid_values() {
        let mut config = CheckConfig::default();
        assert!(config.merge_from_lookup(lookup_from(&[(ENV_ENABLE_COLOR, "maybe")])).is_err());
        assert!(config.merge_from_lookup(lookup_from(&[(ENV_ERROR_POLICY, "loose")])).is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let config: CheckConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CheckConfig::default());
    }
}
