//! Configuration management for the tspin guide engine.
//!
//! Parses `tspin.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. The navigation
//! ordering tables live here as plain data; the embedding layer feeds them
//! to the site's ordering configuration.
//!
//! ```toml
//! [content]
//! root = "content"
//!
//! [editor]
//! enabled = true
//!
//! [navigation]
//! top_level = ["Basics", "Advanced"]
//!
//! [[navigation.pages]]
//! directory = "Basics"
//! order = ["Overview", "T-Spin Double", "T-Spin Triple"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tspin.toml";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Content tree configuration.
    pub content: ContentConfig,
    /// Editor configuration.
    pub editor: EditorConfig,
    /// Navigation ordering configuration.
    pub navigation: NavigationConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Content tree configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Content root directory, relative to the config file's directory
    /// unless absolute.
    pub root: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("content"),
        }
    }
}

/// Editor configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Whether the edit flow (editor rendering, save operations) is exposed.
    pub enabled: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Navigation ordering configuration.
///
/// Empty tables mean "use the built-in production ordering".
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Top-level directory keys in display order.
    pub top_level: Vec<String>,
    /// Per-directory page ordering, in table order.
    pub pages: Vec<PageOrderEntry>,
}

impl NavigationConfig {
    /// True when no ordering overrides are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top_level.is_empty() && self.pages.is_empty()
    }

    /// Ordering tables as plain data: the top-level order and the
    /// per-directory page order list.
    #[must_use]
    pub fn ordering_tables(&self) -> (Vec<String>, Vec<(String, Vec<String>)>) {
        (
            self.top_level.clone(),
            self.pages
                .iter()
                .map(|entry| (entry.directory.clone(), entry.order.clone()))
                .collect(),
        )
    }
}

/// Page ordering for one directory.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageOrderEntry {
    /// Directory key, matched against the path segment.
    pub directory: String,
    /// Page keys in display order.
    pub order: Vec<String>,
}

impl Config {
    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Discover and load a `tspin.toml` by walking up from `start_dir`.
    ///
    /// Returns `Ok(None)` if no config file exists in `start_dir` or any of
    /// its ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a discovered file cannot be read or
    /// parsed; a malformed config is an error, not a miss.
    pub fn discover(start_dir: &Path) -> Result<Option<Self>, ConfigError> {
        for dir in start_dir.ancestors() {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Self::load(&candidate).map(Some);
            }
        }
        Ok(None)
    }

    /// Content root resolved against the config file's directory.
    ///
    /// Absolute roots are returned unchanged; relative roots are joined to
    /// the directory the config was loaded from (or returned as-is when the
    /// config was built in memory).
    #[must_use]
    pub fn content_root(&self) -> PathBuf {
        if self.content.root.is_absolute() {
            return self.content.root.clone();
        }
        match self.config_path.as_deref().and_then(Path::parent) {
            Some(dir) => dir.join(&self.content.root),
            None => self.content.root.clone(),
        }
    }
}
