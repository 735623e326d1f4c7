//! Error handling for the environment config checker

use thiserror::Error;

/// Message shared by every discovery or parse problem once it is normalized.
pub const UNPARSEABLE_MESSAGE: &str = "Cannot parse environment configuration files";

/// Validation failures that must halt the build.
///
/// These are the only errors the checker treats as the designated fatal kind;
/// everything else is an [`AppError`] whose handling is left to the caller's
/// error policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// Two files have a different number of physical lines
    #[error("Environment config files {reference} and {other} have different line counts")]
    LineCountMismatch { reference: String, other: String },

    /// Files declare a different number of distinct properties
    #[error("Environment config files declare different numbers of properties")]
    KeyCountMismatch,

    /// A reference key is missing or sits at a different position in another file
    #[error("Property {key} is inconsistent across environment config files (missing, or declared on a different line)")]
    KeyOrderMismatch { key: String },

    /// A key, or a non-blank value, carries leading or trailing whitespace
    #[error("{}", describe_whitespace(.key, .value.as_deref()))]
    WhitespaceViolation { key: String, value: Option<String> },

    /// Discovery or parsing failed; the cause is kept for logs only
    #[error("Cannot parse environment configuration files")]
    Unparseable { cause: String },
}

fn describe_whitespace(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("Property {} value \"{}\" has leading or trailing whitespace", key, value),
        None => format!("Property {} name has leading or trailing whitespace", key),
    }
}

impl CheckFailure {
    /// Short machine-friendly name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LineCountMismatch { .. } => "LINE_COUNT_MISMATCH",
            Self::KeyCountMismatch => "KEY_COUNT_MISMATCH",
            Self::KeyOrderMismatch { .. } => "KEY_ORDER_MISMATCH",
            Self::WhitespaceViolation { .. } => "WHITESPACE_VIOLATION",
            Self::Unparseable { .. } => "UNPARSEABLE",
        }
    }

    /// Key the failure points at, if it is localized to one
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::KeyOrderMismatch { key } | Self::WhitespaceViolation { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Custom error types for the environment config checker
#[derive(Error, Debug)]
pub enum AppError {
    /// Scan directory missing, unlistable, or holding no matching files
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// A candidate file could not be read or is malformed
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Fatal consistency failure
    #[error("Check failed: {0}")]
    Check(#[from] CheckFailure),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors outside of the checked files
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new discovery error
    pub fn discovery<S: Into<String>>(message: S) -> Self {
        Self::Discovery(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Discovery(_) => "DISCOVERY",
            Self::Parse(_) => "PARSE",
            Self::Check(_) => "CHECK",
            Self::Config(_) => "CONFIG",
            Self::Io(_) => "IO",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether this is the designated fatal validation kind
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Check(_))
    }

    /// The underlying check failure, if any
    pub fn as_check_failure(&self) -> Option<&CheckFailure> {
        match self {
            Self::Check(failure) => Some(failure),
            _ => None,
        }
    }

    /// Fold discovery and parse errors into the generic fatal failure
    pub fn normalize(self) -> Self {
        match self {
            Self::Discovery(cause) | Self::Parse(cause) => {
                Self::Check(CheckFailure::Unparseable { cause })
            }
            other => other,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Discovery(msg) => {
                format!("No environment config files found: {}\n\nSuggestion: Check --resource-dir/--source-dir and the file name pattern.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse a property file: {}\n\nSuggestion: Look for malformed \\uXXXX escapes or unreadable files.", msg)
            }
            Self::Check(failure) => match failure {
                CheckFailure::LineCountMismatch { .. } => format!(
                    "{}\n\nSuggestion: Every environment file must keep the same line layout, including comments and blank lines.",
                    failure
                ),
                CheckFailure::KeyCountMismatch => format!(
                    "{}\n\nSuggestion: A property was added to or removed from only some of the environment files.",
                    failure
                ),
                CheckFailure::KeyOrderMismatch { .. } => format!(
                    "{}\n\nSuggestion: Declare properties in the same order in every environment file.",
                    failure
                ),
                CheckFailure::WhitespaceViolation { .. } => format!(
                    "{}\n\nSuggestion: Remove spaces around the key and value.",
                    failure
                ),
                CheckFailure::Unparseable { .. } => format!(
                    "{}\n\nSuggestion: Run with --debug to see the underlying cause.",
                    failure
                ),
            },
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file permissions and disk space.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Check(_) | Self::Discovery(_) | Self::Parse(_) => 1,  // Inconsistent configuration
            Self::Config(_) => 2,  // Invalid usage
            Self::Io(_) => 5,  // I/O issues
            Self::Internal(_) => 99,  // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Check(_) | Self::Discovery(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Config(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<regex::Error> for AppError {
    fn from(error: regex::Error) -> Self {
        Self::config(format!("Invalid file name pattern: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_error = AppError::config("Invalid configuration");
        assert_eq!(config_error.category(), "CONFIG");
        assert!(!config_error.is_fatal());
        assert_eq!(config_error.exit_code(), 2);

        let check_error: AppError = CheckFailure::KeyCountMismatch.into();
        assert_eq!(check_error.category(), "CHECK");
        assert!(check_error.is_fatal());
        assert_eq!(check_error.exit_code(), 1);
    }

    #[test]
    fn test_check_failure_messages() {
        let failure = CheckFailure::LineCountMismatch {
            reference: "env-config-dev.properties".to_string(),
            other: "env-config-prod.properties".to_string(),
        };
        let message = failure.to_string();
        assert!(message.contains("env-config-dev.properties"));
        assert!(message.contains("env-config-prod.properties"));

        let failure = CheckFailure::KeyOrderMismatch { key: "db.url".to_string() };
        assert!(failure.to_string().contains("db.url"));
        assert_eq!(failure.key(), Some("db.url"));

        assert_eq!(
            CheckFailure::KeyCountMismatch.to_string(),
            "Environment config files declare different numbers of properties"
        );
    }

    #[test]
    fn test_whitespace_messages() {
        let key_only = CheckFailure::WhitespaceViolation { key: "a".to_string(), value: None };
        assert_eq!(key_only.to_string(), "Property a name has leading or trailing whitespace");

        let with_value = CheckFailure::WhitespaceViolation {
            key: "a".to_string(),
            value: Some("1 ".to_string()),
        };
        assert_eq!(
            with_value.to_string(),
            "Property a value \"1 \" has leading or trailing whitespace"
        );
    }

    #[test]
    fn test_normalize_hides_cause() {
        let normalized = AppError::discovery("no files in /tmp/x").normalize();
        assert!(normalized.is_fatal());
        assert_eq!(
            normalized.as_check_failure().map(|f| f.to_string()),
            Some(UNPARSEABLE_MESSAGE.to_string())
        );
        assert!(!normalized.to_string().contains("/tmp/x"));

        let normalized = AppError::parse("bad escape").normalize();
        assert_eq!(normalized.as_check_failure().map(|f| f.kind()), Some("UNPARSEABLE"));

        let untouched = AppError::config("bad pattern").normalize();
        assert_eq!(untouched.category(), "CONFIG");
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert_eq!(app_error.category(), "IO");

        let regex_error = regex::Regex::new("(").unwrap_err();
        let app_error: AppError = regex_error.into();
        assert_eq!(app_error.category(), "CONFIG");
        assert!(app_error.to_string().contains("Invalid file name pattern"));
    }

    #[test]
    fn test_dotenv_error_conversion() {
        let dotenv_error = dotenv::Error::LineParse(".env".to_string(), 1);
        let app_error: AppError = dotenv_error.into();
        assert_eq!(app_error.category(), "CONFIG");
        assert!(app_error.to_string().contains("Environment file error"));
    }

    #[test]
    fn test_user_friendly_messages() {
        let error: AppError = CheckFailure::KeyOrderMismatch { key: "a".to_string() }.into();
        let message = error.user_friendly_message();
        assert!(message.contains("Property a"));
        assert!(message.contains("Suggestion:"));
    }

    #[test]
    fn test_console_formatting() {
        let error = AppError::config("Test error");
        let formatted_no_color = error.format_for_console(false);
        let formatted_color = error.format_for_console(true);

        assert_eq!(formatted_no_color, "[CONFIG] Configuration error: Test error");
        assert!(formatted_color.contains("CONFIG"));
        assert!(formatted_color.contains("Test error"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::from(CheckFailure::KeyCountMismatch).exit_code(), 1);
        assert_eq!(AppError::config("test").exit_code(), 2);
        assert_eq!(AppError::io("test").exit_code(), 5);
        assert_eq!(AppError::internal("test").exit_code(), 99);
    }
}
