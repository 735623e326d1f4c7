//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::models::config::{ENV_ENABLE_COLOR, ENV_ERROR_POLICY, ENV_FILE_NAME, ENV_RESOURCE_DIR, ENV_SOURCE_DIR};
use crate::types::ErrorPolicy;
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists
    ///
    /// Variables already present in the process environment win over the file.
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load the given env file if it exists
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        format!(
            r#"# Environment Config Check Configuration
#
# Values specified here are used as defaults and can be overridden by
# process environment variables and command-line arguments.

# File name pattern; '*' matches one or more non-whitespace characters
# {file_name}=env-config-*.properties

# Project source directory; files are looked up in its sibling 'resources'
# {source_dir}=src/main/java

# Scan this directory directly instead
# {resource_dir}=src/main/resources

# Treatment of unexpected errors: strict or lenient
# {policy}=strict

# Enable colored output (true/false)
# {color}=true
"#,
            file_name = ENV_FILE_NAME,
            source_dir = ENV_SOURCE_DIR,
            resource_dir = ENV_RESOURCE_DIR,
            policy = ENV_ERROR_POLICY,
            color = ENV_ENABLE_COLOR,
        )
    }

    /// Save example .env file to disk
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        std::fs::write(path, Self::create_example_env_content())
            .map_err(|e| AppError::config(format!("Failed to write example .env file: {}", e)))
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            ENV_FILE_NAME => {
                if !value.trim().is_empty() {
                    crate::discovery::FilePattern::new(Some(value))?;
                }
            }
            ENV_ERROR_POLICY => {
                value.parse::<ErrorPolicy>()?;
            }
            ENV_ENABLE_COLOR => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
            }
            _ => {
                // Directories and unknown variables are not validated here
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (ENV_FILE_NAME, "File name pattern ('*' wildcards)", "env-config-*.properties"),
            (ENV_SOURCE_DIR, "Project source directory", "src/main/java"),
            (ENV_RESOURCE_DIR, "Directory to scan directly", "src/main/resources"),
            (ENV_ERROR_POLICY, "Unexpected error policy (strict, lenient)", "strict"),
            (ENV_ENABLE_COLOR, "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<24} {}\n", var, description));
            help.push_str(&format!("  {:<24} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Vec<String> {
        Self::get_supported_env_vars()
            .into_iter()
            .filter_map(|(name, _, _)| {
                let value = std::env::var(name).ok()?;
                Self::validate_env_var(name, &value).err().map(|e| format!("Warning: {}", e))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_example_content_lists_every_variable() {
        let content = EnvManager::create_example_env_content();
        for (name, _, _) in EnvManager::get_supported_env_vars() {
            assert!(content.contains(&format!("{}=", name)), "missing {}", name);
        }
    }

    #[test]
    fn test_save_example_file() {
        let temp_file = NamedTempFile::new().unwrap();
        EnvManager::save_example_env_file(temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("Environment Config Check Configuration"));
    }

    #[test]
    fn test_validate_env_var() {
        assert!(EnvManager::validate_env_var(ENV_FILE_NAME, "app-*.properties").is_ok());
        assert!(EnvManager::validate_env_var(ENV_FILE_NAME, "").is_ok());
        assert!(EnvManager::validate_env_var(ENV_ERROR_POLICY, "lenient").is_ok());
        assert!(EnvManager::validate_env_var(ENV_ENABLE_COLOR, "false").is_ok());
        assert!(EnvManager::validate_env_var(ENV_SOURCE_DIR, "anything").is_ok());
        assert!(EnvManager::validate_env_var("UNRELATED", "x").is_ok());

        assert!(EnvManager::validate_env_var(ENV_FILE_NAME, "env-(*").is_err());
        assert!(EnvManager::validate_env_var(ENV_ERROR_POLICY, "loose").is_err());
        assert!(EnvManager::validate_env_var(ENV_ENABLE_COLOR, "maybe").is_err());
    }

    #[test]
    fn test_display_env_help() {
        let help = EnvManager::display_env_help();
        assert!(help.contains("Supported Environment Variables:"));
        assert!(help.contains(ENV_FILE_NAME));
        assert!(help.contains("Configuration Priority"));
    }

    #[test]
    fn test_load_missing_env_file_is_ok() {
        assert!(EnvManager::load_env_file_from(Path::new("/no/such/.env"), false).is_ok());
    }
}
