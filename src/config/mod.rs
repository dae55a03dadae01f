//! Configuration management for booktracker

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogClient;
use crate::page::PageSettings;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the book-tracker backend
    pub backend_url: String,

    /// How many similar books to request per book
    pub similar_books_limit: usize,

    /// Similar books shown per page
    pub page_size: usize,

    /// Sentences shown before "show more"
    pub preview_sentences: usize,

    /// HTTP timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let page = PageSettings::default();
        Self {
            backend_url: CatalogClient::DEFAULT_BASE_URL.to_string(),
            similar_books_limit: page.similar_books_limit,
            page_size: page.page_size,
            preview_sentences: page.preview_sentences,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "booktracker")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the path to the log file
    pub fn log_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "booktracker")
            .context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().join("booktracker.log"))
    }

    /// Open a log file for appending, creating it and its directory if needed
    pub fn open_log(path: &Path) -> Result<File> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {:?}", parent))?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {:?}", path))
    }

    /// Settings for the book page
    pub fn page_settings(&self) -> PageSettings {
        PageSettings {
            page_size: self.page_size.max(1),
            preview_sentences: self.preview_sentences.max(1),
            similar_books_limit: self.similar_books_limit,
        }
    }

    /// HTTP timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Build the backend client
    pub fn catalog_client(&self) -> Result<CatalogClient> {
        CatalogClient::new(&self.backend_url, self.request_timeout())
            .with_context(|| format!("Failed to create HTTP client for {}", self.backend_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_page_defaults() {
        let config = Config::default();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.preview_sentences, 5);
        assert_eq!(config.similar_books_limit, 20);
        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn config_deserializes_partial_json() {
        let json = r#"{"backend_url":"http://books.local","page_size":3}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.backend_url, "http://books.local");
        assert_eq!(config.page_size, 3);
        assert_eq!(config.similar_books_limit, 20);
    }

    #[test]
    fn page_settings_clamp_zero() {
        let config = Config { page_size: 0, preview_sentences: 0, ..Config::default() };
        let settings = config.page_settings();
        assert_eq!(settings.page_size, 1);
        assert_eq!(settings.preview_sentences, 1);
    }

    #[test]
    fn load_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = Config { similar_books_limit: 40, ..Config::default() };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn log_file_appends() {
        use std::io::Write;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("booktracker.log");

        writeln!(Config::open_log(&path).unwrap(), "first").unwrap();
        writeln!(Config::open_log(&path).unwrap(), "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
