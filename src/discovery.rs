//! Environment config file discovery
//!
//! Finds the per-environment property files in the scan directory. Files are
//! returned sorted by name so the reference file (the first one) does not
//! depend on the order the filesystem happens to list entries in.

use crate::defaults::{DEFAULT_FILE_PATTERN, PROPERTIES_EXTENSION};
use crate::error::{AppError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Compiled file name pattern
#[derive(Debug, Clone)]
pub struct FilePattern {
    source: String,
    regex: Regex,
}

impl FilePattern {
    /// Build a matcher from an optional user pattern
    ///
    /// A missing or blank pattern selects the default. The default literal is
    /// used as-is; any other pattern has each `*` widened to one or more
    /// non-whitespace characters. The whole file name must match.
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let source = match pattern.map(str::trim) {
            None | Some("") => DEFAULT_FILE_PATTERN.to_string(),
            Some(p) if p == DEFAULT_FILE_PATTERN => p.to_string(),
            Some(p) => p.replace('*', r"[\S]+"),
        };
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self { source, regex })
    }

    /// Regex source after wildcard translation
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `file_name` is a candidate environment config file
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(PROPERTIES_EXTENSION) && self.regex.is_match(file_name)
    }
}

/// Non-empty, name-sorted set of discovered config files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFileSet {
    directory: PathBuf,
    files: Vec<PathBuf>,
}

impl ConfigFileSet {
    /// Build a set from explicit paths; fails when `files` is empty
    pub fn new(directory: impl Into<PathBuf>, mut files: Vec<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        if files.is_empty() {
            return Err(AppError::discovery(format!(
                "No environment config files found in {}",
                directory.display()
            )));
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(Self { directory, files })
    }

    /// Directory the files were discovered in
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// All files, reference first
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// File every other file is compared against
    pub fn reference(&self) -> &Path {
        &self.files[0]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.files.iter()
    }
}

impl<'a> IntoIterator for &'a ConfigFileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// File name of `path` for messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// List files in `directory` whose names match `pattern`
pub fn discover(directory: &Path, pattern: &FilePattern) -> Result<ConfigFileSet> {
    let entries = fs::read_dir(directory).map_err(|e| {
        AppError::discovery(format!("Cannot list {}: {}", directory.display(), e))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            AppError::discovery(format!("Cannot list {}: {}", directory.display(), e))
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !pattern.matches(name) {
            continue;
        }
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            || entry.path().is_file();
        if is_file {
            files.push(entry.path());
        }
    }

    ConfigFileSet::new(directory, files).map_err(|_| {
        AppError::discovery(format!(
            "No files matching '{}' in {}",
            pattern.as_str(),
            directory.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), "a=1\n").unwrap();
    }

    #[test]
    fn test_default_pattern() {
        let pattern = FilePattern::new(None).unwrap();
        assert_eq!(pattern.as_str(), DEFAULT_FILE_PATTERN);
        assert!(pattern.matches("env-config-dev.properties"));
        assert!(pattern.matches("env-config-prod-eu.properties"));
        assert!(!pattern.matches("env-config-dev.yaml"));
        assert!(!pattern.matches("application.properties"));
        assert!(!pattern.matches("my-env-config-dev.properties"));
    }

    #[test]
    fn test_blank_pattern_uses_default() {
        assert_eq!(FilePattern::new(Some("  ")).unwrap().as_str(), DEFAULT_FILE_PATTERN);
        assert_eq!(FilePattern::new(Some(DEFAULT_FILE_PATTERN)).unwrap().as_str(), DEFAULT_FILE_PATTERN);
    }

    #[test]
    fn test_wildcard_translation() {
        let pattern = FilePattern::new(Some("app-*.properties")).unwrap();
        assert_eq!(pattern.as_str(), r"app-[\S]+.properties");
        assert!(pattern.matches("app-dev.properties"));
        assert!(!pattern.matches("app-.properties"));
        assert!(!pattern.matches("app-dev test.properties"));
    }

    #[test]
    fn test_extension_required() {
        let pattern = FilePattern::new(Some("settings-*")).unwrap();
        assert!(pattern.matches("settings-dev.properties"));
        assert!(!pattern.matches("settings-dev.yml"));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = FilePattern::new(Some("env-(*.properties")).unwrap_err();
        assert_eq!(err.category(), "CONFIG");
    }

    #[test]
    fn test_discover_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "env-config-test.properties");
        touch(&dir, "env-config-dev.properties");
        touch(&dir, "env-config-prod.properties");
        touch(&dir, "unrelated.properties");

        let set = discover(dir.path(), &FilePattern::new(None).unwrap()).unwrap();
        let names: Vec<String> = set.iter().map(|p| display_name(p)).collect();
        assert_eq!(
            names,
            vec!["env-config-dev.properties", "env-config-prod.properties", "env-config-test.properties"]
        );
        assert_eq!(display_name(set.reference()), "env-config-dev.properties");
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_discover_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("env-config-dir.properties")).unwrap();
        touch(&dir, "env-config-dev.properties");

        let set = discover(dir.path(), &FilePattern::new(None).unwrap()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_discover_zero_matches_fails() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "application.properties");

        let err = discover(dir.path(), &FilePattern::new(None).unwrap()).unwrap_err();
        assert_eq!(err.category(), "DISCOVERY");
    }

    #[test]
    fn test_discover_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = discover(&missing, &FilePattern::new(None).unwrap()).unwrap_err();
        assert_eq!(err.category(), "DISCOVERY");
    }

    #[test]
    fn test_empty_file_set_rejected() {
        assert!(ConfigFileSet::new("/tmp", Vec::new()).is_err());
    }
}
