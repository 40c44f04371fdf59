//! Engine install registry.
//!
//! The registry is the merged view of engine installs: launcher-manifest
//! installs first (in manifest order), then user-registered custom installs
//! (in storage order). Custom installs are persisted through the
//! [`SettingsStore`]; mutations write through before returning.

pub mod manifest;

use std::path::PathBuf;

use thiserror::Error;

use crate::core::EngineInstall;
use crate::util::context::GlobalContext;
use crate::util::settings::{SettingsStore, SECTION_CUSTOM_INSTALLS};

/// Error mutating the install registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("engine install name must not be empty")]
    EmptyName,

    #[error("failed to persist engine installs")]
    Store(#[from] anyhow::Error),
}

/// Merged view of discovered and custom engine installs.
#[derive(Debug)]
pub struct InstallRegistry {
    /// Manifest-derived installs, discovery order.
    discovered: Vec<EngineInstall>,

    /// User-registered installs, storage order.
    custom: Vec<EngineInstall>,

    store: SettingsStore,
}

impl InstallRegistry {
    /// Discover installs: launcher manifest first, persisted customs after.
    ///
    /// Manifest discovery never fails; a missing or unreadable manifest just
    /// contributes nothing.
    pub fn discover(ctx: &GlobalContext, store: SettingsStore) -> Self {
        let discovered = match ctx.launcher_manifest_path() {
            Some(path) => manifest::read_manifest(&path),
            None => Vec::new(),
        };

        let custom = store.read_array(SECTION_CUSTOM_INSTALLS);

        InstallRegistry {
            discovered,
            custom,
            store,
        }
    }

    /// All installs in merge order: discovered, then custom.
    pub fn installs(&self) -> Vec<&EngineInstall> {
        self.discovered.iter().chain(self.custom.iter()).collect()
    }

    /// Find the first install with the given name.
    pub fn by_name(&self, name: &str) -> Option<&EngineInstall> {
        self.installs().into_iter().find(|i| i.name == name)
    }

    /// Register a custom install.
    ///
    /// The name must be non-empty; the path is deliberately not validated
    /// here. A bad path surfaces later, when a build tries to launch the
    /// automation tool from it. The install is appended to the persisted
    /// section before this returns.
    pub fn add_custom(
        &mut self,
        name: &str,
        path: impl Into<PathBuf>,
    ) -> Result<&EngineInstall, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let install = EngineInstall::new(name, path);

        let mut persisted = self.custom.clone();
        persisted.push(install);
        self.store
            .write_array(SECTION_CUSTOM_INSTALLS, &persisted)?;
        self.custom = persisted;

        Ok(self.custom.last().unwrap())
    }

    /// Remove every custom install whose name matches, returning the count.
    ///
    /// Duplicate names are allowed on add, so removal takes all of them
    /// rather than guessing which one was meant. Discovered installs are
    /// never removed; they come back from the manifest on every discovery.
    pub fn remove_by_name(&mut self, name: &str) -> Result<usize, RegistryError> {
        let remaining: Vec<EngineInstall> = self
            .custom
            .iter()
            .filter(|i| i.name != name)
            .cloned()
            .collect();

        let removed = self.custom.len() - remaining.len();
        if removed > 0 {
            self.store
                .write_array(SECTION_CUSTOM_INSTALLS, &remaining)?;
            self.custom = remaining;
        }

        Ok(removed)
    }
}
