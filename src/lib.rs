//! Environment Config Check
//!
//! A build-time validator for per-environment property files. It checks that
//! sibling files such as `env-config-dev.properties` and
//! `env-config-prod.properties` keep the same line layout, declare the same
//! keys in the same order, and carry no stray whitespace around keys or
//! values.

pub mod checker;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod line_counter;
pub mod logging;
pub mod models;
pub mod output;
pub mod properties;
pub mod types;

// Re-export commonly used types
pub use checker::{check_directory, CheckOutcome, ConsistencyChecker};
pub use discovery::{discover, ConfigFileSet, FilePattern};
pub use error::{AppError, CheckFailure, Result};
pub use line_counter::count_lines;
pub use models::{CheckConfig, CheckReport, FileSummary};
pub use properties::OrderedProperties;
pub use types::{CheckStage, ErrorPolicy};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    /// File name pattern used when none is configured
    pub const DEFAULT_FILE_PATTERN: &str = r"env-config-[\S]*.properties";
    /// Extension every candidate file must end with
    pub const PROPERTIES_EXTENSION: &str = ".properties";
    /// Project source directory the scan root is derived from
    pub const DEFAULT_SOURCE_DIR: &str = "src/main/java";
    /// Sibling of the source directory that holds the config files
    pub const RESOURCES_DIR_NAME: &str = "resources";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
