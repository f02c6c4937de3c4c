//! Font directory configuration
//!
//! Stored as `{"directories": ["/path/a", "/path/b"]}`. Loading is lenient:
//! a missing or malformed file yields an empty list, and directories that no
//! longer exist are dropped.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, relative to the working directory
pub const CONFIG_FILE_NAME: &str = "font_directories.json";

/// Directory scanned when nothing is configured
pub const DEFAULT_FONT_DIR: &str = "fonts";

/// Directories scanned for `.ttf`/`.otf` files
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FontDirectories {
    #[serde(default)]
    pub directories: Vec<PathBuf>,
}

impl FontDirectories {
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self { directories }
    }

    /// Load the config, keeping only directories that exist
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No font directory config at {}", path.display());
            return Self::default();
        }

        match Self::read(path) {
            Ok(mut config) => {
                config.directories.retain(|dir| {
                    let exists = dir.exists();
                    if !exists {
                        tracing::debug!("Dropping missing font directory {}", dir.display());
                    }
                    exists
                });
                config
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load font directory config {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Parse the config without any filtering
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the config as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Fall back to the default `fonts` directory when the list is empty
    pub fn or_default_dir(self) -> Self {
        if self.directories.is_empty() {
            Self::new(vec![PathBuf::from(DEFAULT_FONT_DIR)])
        } else {
            self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = FontDirectories::load(&dir.path().join("nope.json"));
        assert!(config.is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert!(FontDirectories::load(&path).is_empty());
    }

    #[test]
    fn test_drops_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let kept = dir.path().join("kept");
        fs::create_dir(&kept).unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        FontDirectories::new(vec![kept.clone(), dir.path().join("gone")])
            .save(&path)
            .unwrap();

        let config = FontDirectories::load(&path);
        assert_eq!(config.directories, vec![kept]);
    }

    #[test]
    fn test_save_is_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        FontDirectories::new(vec![PathBuf::from("/tmp")])
            .save(&path)
            .unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"directories\": [\n    \"/tmp\"\n  ]\n}");
    }

    #[test]
    fn test_missing_key_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{}").unwrap();
        assert!(FontDirectories::load(&path).is_empty());
    }

    #[test]
    fn test_or_default_dir() {
        let config = FontDirectories::default().or_default_dir();
        assert_eq!(config.directories, vec![PathBuf::from(DEFAULT_FONT_DIR)]);

        let custom = FontDirectories::new(vec![PathBuf::from("a")]).or_default_dir();
        assert_eq!(custom.directories, vec![PathBuf::from("a")]);
    }
}
