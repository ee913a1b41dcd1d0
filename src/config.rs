use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ci::Provider;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .ci-source.toml.
/// All fields are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Local git fallback settings
    #[serde(default)]
    pub git: GitConfig,

    /// Provider detection settings
    #[serde(default)]
    pub detect: DetectConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitConfig {
    /// Remote to read when the provider does not export a URL.
    /// If None, falls back to CI_SOURCE_GIT_REMOTE, then "origin".
    pub remote: Option<String>,

    /// git executable, "git" when unset
    pub program: Option<String>,

    /// Checkout to read remotes from, current directory when unset
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectConfig {
    /// Providers to probe, in order. Empty means all of them.
    #[serde(default)]
    pub providers: Vec<Provider>,
}

impl Config {
    /// Load configuration from .ci-source.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".ci-source.toml");
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            Config::default()
        };

        if config.git.remote.is_none() {
            if let Ok(remote) = std::env::var("CI_SOURCE_GIT_REMOTE") {
                if !remote.is_empty() {
                    config.git.remote = Some(remote);
                }
            }
        }

        Ok(config)
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn remote(&self) -> &str {
        self.git.remote.as_deref().unwrap_or("origin")
    }

    pub fn git_program(&self) -> &str {
        self.git.program.as_deref().unwrap_or("git")
    }

    /// Probe order for provider detection.
    pub fn providers(&self) -> &[Provider] {
        if self.detect.providers.is_empty() {
            &Provider::ALL
        } else {
            &self.detect.providers
        }
    }
}
