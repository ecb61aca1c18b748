//! Configuration management.
//!
//! Loads configuration from ${MOYEO_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the moyeo service (HTTP API and realtime endpoint).
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:4000";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// The base URL to actually use: `MOYEO_BASE_URL` wins over the file,
    /// and a trailing slash is stripped either way.
    pub fn resolved_base_url(&self) -> String {
        let url = std::env::var("MOYEO_BASE_URL").unwrap_or_else(|_| self.base_url.clone());
        url.trim_end_matches('/').to_string()
    }

    /// Writes the commented default template to `path`.
    ///
    /// Fails if the file already exists (no silent overwrite).
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("config file already exists at {}", path.display());
        }
        write_config(path, default_config_template())
    }

    /// Saves only the base_url field, preserving other content and comments.
    ///
    /// Creates the file from the default template if it doesn't exist.
    pub fn save_base_url_to(path: &Path, base_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["base_url"] = value(base_url);

        write_config(path, &doc.to_string())
    }
}

fn write_config(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

pub mod paths {
    //! Path resolution for moyeo configuration and client-local state.
    //!
    //! MOYEO_HOME resolution order:
    //! 1. MOYEO_HOME environment variable (if set)
    //! 2. ~/.config/moyeo (default)

    use std::path::PathBuf;

    /// Returns the moyeo home directory.
    pub fn moyeo_home() -> PathBuf {
        if let Ok(home) = std::env::var("MOYEO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("moyeo"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        moyeo_home().join("config.toml")
    }

    /// Returns the path to the persisted session snapshot.
    pub fn session_path() -> PathBuf {
        moyeo_home().join("session.json")
    }
}
