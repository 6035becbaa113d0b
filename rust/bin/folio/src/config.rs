//! Client configuration.
//!
//! Reads/writes `~/.folio/config.toml`.

use std::path::{Path, PathBuf};

use folio_client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Client configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FolioConfig {
    /// API base URL (e.g. "http://localhost:8080/api").
    #[serde(default = "default_server")]
    pub server: String,

    /// Whether to fetch the project list.
    #[serde(default = "default_projects")]
    pub projects: bool,

    /// Where the session is persisted (default: ~/.folio/session.redb).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_db: Option<PathBuf>,
}

fn default_server() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_projects() -> bool {
    true
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            projects: default_projects(),
            session_db: None,
        }
    }
}

impl FolioConfig {
    /// Default config file path: ~/.folio/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: FolioConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn session_db_path(&self) -> PathBuf {
        self.session_db
            .clone()
            .unwrap_or_else(|| dirs_path().join("session.redb"))
    }
}

/// Return the folio config directory (~/.folio).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".folio")
}
