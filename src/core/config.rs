//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

/// Base URL of the summary view when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";

/// Onboard configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Replacement reference data file (managers, skills, relationships)
    pub directory: Option<PathBuf>,

    /// Base URL the summary hand-off link is built on
    pub base_url: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/onboard/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match std::fs::read_to_string(&global_path) {
                    Ok(contents) => match serde_yml::from_str::<Config>(&contents) {
                        Ok(global) => config.merge(global),
                        Err(e) => tracing::warn!(
                            path = %global_path.display(),
                            error = %e,
                            "ignoring malformed config file"
                        ),
                    },
                    Err(e) => tracing::warn!(
                        path = %global_path.display(),
                        error = %e,
                        "could not read config file"
                    ),
                }
            }
        }

        // 3. Environment variables
        config.merge(Self::from_env_vars(|key| std::env::var(key).ok()));

        config
    }

    /// Build a config layer from environment-style lookups
    fn from_env_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            directory: lookup("ONBOARD_DIRECTORY").map(PathBuf::from),
            base_url: lookup("ONBOARD_BASE_URL"),
            default_format: lookup("ONBOARD_FORMAT"),
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "onboard")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.directory.is_some() {
            self.directory = other.directory;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Base URL for hand-off links
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        // Joining relative paths onto a base without a trailing slash drops its last segment
        if raw.ends_with('/') {
            Url::parse(raw)
        } else {
            Url::parse(&format!("{}/", raw))
        }
    }
}
