//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::CheckConfig,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    ///
    /// Precedence from lowest to highest: defaults, `.env`, process
    /// environment, command line.
    pub fn parse(&self) -> Result<CheckConfig> {
        EnvManager::load_env_file(self.cli.debug)?;
        self.parse_with_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration reading environment values through `lookup`
    pub fn parse_with_lookup<F>(&self, lookup: F) -> Result<CheckConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CheckConfig::default();
        config.merge_from_lookup(lookup)?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut CheckConfig) {
        if let Some(ref source_dir) = self.cli.source_dir {
            config.source_dir = source_dir.clone();
        }

        if let Some(ref resource_dir) = self.cli.resource_dir {
            config.resource_dir = Some(resource_dir.clone());
        }

        if let Some(ref pattern) = self.cli.pattern {
            config.file_pattern = Some(pattern.clone());
        }

        if let Some(policy) = self.cli.error_policy {
            config.error_policy = policy;
        }

        if self.cli.no_color {
            config.enable_color = false;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
        config.log_format = self.cli.log_format;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<CheckConfig> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &CheckConfig) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Source directory: {}", config.source_dir.display()));
    match config.scan_directory() {
        Ok(dir) => summary.push(format!("Scan directory: {}", dir.display())),
        Err(e) => summary.push(format!("Scan directory: <{}>", e)),
    }
    summary.push(format!(
        "File pattern: {}",
        config.file_pattern.as_deref().unwrap_or(crate::defaults::DEFAULT_FILE_PATTERN)
    ));
    summary.push(format!("Error policy: {}", config.error_policy));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));
    summary.push(format!("Log format: {:?}", config.log_format));

    summary.join("\n")
}
