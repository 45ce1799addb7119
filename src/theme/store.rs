//! Persisted phosphor preference.

use super::Phosphor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors reading or writing the preference file.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// The file exists but could not be read.
    #[error("Failed to read preferences at {path:?}: {source}")]
    Read {
        /// Preference file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or holds an unknown phosphor.
    #[error("Invalid preferences in {path:?}: {reason}")]
    Parse {
        /// Preference file.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Writing the file (or creating its directory) failed.
    #[error("Failed to write preferences at {path:?}: {source}")]
    Write {
        /// Preference file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The preference could not be serialized.
    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phosphor: Option<Phosphor>,
}

/// TOML file holding `phosphor = "green" | "amber"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store backed by `path`. Nothing is touched until load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored preference. `Ok(None)` when the file or the key is missing.
    pub fn load(&self) -> Result<Option<Phosphor>, PreferenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| PreferenceError::Read {
                path: self.path.clone(),
                source,
            })?;
        let file: PreferenceFile =
            toml::from_str(&contents).map_err(|e| PreferenceError::Parse {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(file.phosphor)
    }

    /// Persist `phosphor`, creating the parent directory when missing.
    pub fn save(&self, phosphor: Phosphor) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PreferenceError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let contents = toml::to_string(&PreferenceFile {
            phosphor: Some(phosphor),
        })?;
        std::fs::write(&self.path, contents).map_err(|source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = ?self.path, %phosphor, "saved phosphor preference");
        Ok(())
    }
}

/// Current phosphor plus the store it persists to.
#[derive(Debug, Clone)]
pub struct ThemeToggle {
    current: Phosphor,
    store: PreferenceStore,
}

impl ThemeToggle {
    /// Read the stored preference. Unreadable or invalid files are logged
    /// and treated as absent, which means green.
    pub fn load(store: PreferenceStore) -> Self {
        let current = match store.load() {
            Ok(saved) => saved.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "ignoring phosphor preference");
                Phosphor::default()
            }
        };
        Self { current, store }
    }

    /// Current phosphor.
    pub fn current(&self) -> Phosphor {
        self.current
    }

    /// The store backing this toggle.
    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Switch to `phosphor` and persist it.
    ///
    /// The in-memory value changes even when persisting fails.
    pub fn set(&mut self, phosphor: Phosphor) -> Result<(), PreferenceError> {
        self.current = phosphor;
        self.store.save(phosphor)
    }

    /// Flip green/amber and persist. Returns the new phosphor on success.
    pub fn toggle(&mut self) -> Result<Phosphor, PreferenceError> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}
