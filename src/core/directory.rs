//! Reference data: manager directory, skills catalog, relationship list
//!
//! The defaults ship embedded in the binary (`data/directory.yaml`). A
//! replacement file with the same layout can be configured instead.

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::Config;
use crate::entities::Department;

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedData;

const DIRECTORY_FILE: &str = "directory.yaml";

/// Errors loading reference data
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Embedded reference data '{0}' is missing from the build")]
    MissingEmbedded(&'static str),

    #[error("Failed to read reference data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed reference data: {0}")]
    Parse(#[from] serde_yml::Error),
}

/// A manager new hires can report to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub id: String,
    pub name: String,
    pub department: Department,
}

/// Read-only lookup tables supplied by the environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Directory {
    #[serde(default)]
    managers: Vec<Manager>,

    #[serde(default)]
    skills: BTreeMap<Department, Vec<String>>,

    #[serde(default)]
    relationships: Vec<String>,
}

impl Directory {
    /// The reference data compiled into the binary
    pub fn embedded() -> Result<Self, DirectoryError> {
        let file = EmbeddedData::get(DIRECTORY_FILE)
            .ok_or(DirectoryError::MissingEmbedded(DIRECTORY_FILE))?;
        Self::from_yaml(&String::from_utf8_lossy(&file.data))
    }

    /// Parse reference data from YAML (or JSON) text
    pub fn from_yaml(content: &str) -> Result<Self, DirectoryError> {
        Ok(serde_yml::from_str(content)?)
    }

    /// Load reference data from a file
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// The configured reference data, falling back to the embedded copy
    pub fn from_config(config: &Config) -> Result<Self, DirectoryError> {
        match &config.directory {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading reference data");
                Self::load(path)
            }
            None => Self::embedded(),
        }
    }

    pub fn managers(&self) -> &[Manager] {
        &self.managers
    }

    /// Managers working in the given department
    pub fn managers_in(&self, department: Department) -> impl Iterator<Item = &Manager> {
        self.managers
            .iter()
            .filter(move |m| m.department == department)
    }

    pub fn manager(&self, id: &str) -> Option<&Manager> {
        self.managers.iter().find(|m| m.id == id)
    }

    /// Manager's display name, or `Unknown` for an id not in the directory
    pub fn manager_name(&self, id: &str) -> &str {
        self.manager(id).map(|m| m.name.as_str()).unwrap_or("Unknown")
    }

    /// Skills offered to a department (empty if none are listed)
    pub fn skills_for(&self, department: Department) -> &[String] {
        self.skills
            .get(&department)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn relationships(&self) -> &[String] {
        &self.relationships
    }
}
