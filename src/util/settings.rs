//! Persisted settings for upbt.
//!
//! Settings live in a single TOML file under the upbt data directory. The
//! store offers scalar get/set plus named, ordered array sections, and every
//! mutation is written through to disk before it returns.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Scalar key holding the build-output path template override.
pub const KEY_BUILD_PATH_FORMAT: &str = "PluginBuildPathFormat";

/// Array section holding user-registered engine installs.
pub const SECTION_CUSTOM_INSTALLS: &str = "CustomUnrealEngineInstalls";

/// TOML-file-backed key/value store.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    doc: toml::Table,
}

impl SettingsStore {
    /// Open the settings file at `path`, falling back to an empty store if
    /// the file is missing or malformed.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = if path.exists() {
            Self::load(&path).unwrap_or_else(|e| {
                tracing::warn!("failed to load settings from {}: {}", path.display(), e);
                toml::Table::new()
            })
        } else {
            toml::Table::new()
        };

        SettingsStore { path, doc }
    }

    fn load(path: &Path) -> Result<toml::Table> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse settings file: {}", path.display()))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a scalar string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.doc.get(key).and_then(|v| v.as_str())
    }

    /// Set a scalar string value and persist.
    pub fn set_str(&mut self, key: &str, value: &str) -> Result<()> {
        self.doc
            .insert(key.to_string(), toml::Value::String(value.to_string()));
        self.save()
    }

    /// Read an ordered array section, deserializing each element.
    ///
    /// A missing section yields an empty list. Elements that fail to
    /// deserialize are skipped rather than failing the whole read.
    pub fn read_array<T: DeserializeOwned>(&self, section: &str) -> Vec<T> {
        let Some(toml::Value::Array(items)) = self.doc.get(section) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match item.clone().try_into() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("skipping malformed `{}` entry: {}", section, e);
                    None
                }
            })
            .collect()
    }

    /// Replace an ordered array section and persist.
    pub fn write_array<T: Serialize>(&mut self, section: &str, items: &[T]) -> Result<()> {
        let values = items
            .iter()
            .map(|item| {
                toml::Value::try_from(item)
                    .with_context(|| format!("failed to serialize `{}` entry", section))
            })
            .collect::<Result<Vec<_>>>()?;

        self.doc
            .insert(section.to_string(), toml::Value::Array(values));
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create settings directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(&self.doc).context("failed to serialize settings")?;

        std::fs::write(&self.path, contents)
            .with_context(|| format!("failed to write settings file: {}", self.path.display()))
    }
}
