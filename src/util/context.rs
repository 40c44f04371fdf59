//! Global context for upbt operations.
//!
//! Provides centralized access to the application data directory, the
//! settings file, and platform-specific well-known paths.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use directories::ProjectDirs;

/// Environment variable overriding the upbt data directory.
///
/// Used by the integration tests to keep state out of the real home.
pub const HOME_ENV: &str = "UPBT_HOME";

/// Environment variable overriding the launcher manifest location.
pub const LAUNCHER_MANIFEST_ENV: &str = "UPBT_LAUNCHER_MANIFEST";

/// Project directories for upbt
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "upbt", "upbt"));

/// Global context containing paths and environment.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Data directory for settings and default build output
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let home = if let Some(home) = std::env::var_os(HOME_ENV) {
            PathBuf::from(home)
        } else if let Some(dirs) = PROJECT_DIRS.as_ref() {
            dirs.data_dir().to_path_buf()
        } else {
            // Fallback to ~/.upbt
            directories::BaseDirs::new()
                .map(|b| b.home_dir().join(".upbt"))
                .unwrap_or_else(|| PathBuf::from(".upbt"))
        };

        Ok(GlobalContext { home })
    }

    /// Create a GlobalContext rooted at a specific data directory.
    pub fn with_home(home: PathBuf) -> Self {
        GlobalContext { home }
    }

    /// Get the upbt data directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> PathBuf {
        self.home.join("settings.toml")
    }

    /// Get the default root for built plugin output.
    pub fn built_plugins_dir(&self) -> PathBuf {
        self.home.join("BuiltPlugins")
    }

    /// Get the default build-output path template.
    ///
    /// `%n`, `%v` and `%e` expand to the plugin name, plugin version and
    /// engine name at build time.
    pub fn default_path_format(&self) -> String {
        format!("{}/%n/%v/%e", self.built_plugins_dir().display())
    }

    /// Get the Epic launcher manifest path, if one can exist on this
    /// platform.
    ///
    /// The manifest is a Windows launcher artifact; elsewhere discovery only
    /// happens when the location is given explicitly via
    /// `UPBT_LAUNCHER_MANIFEST`.
    pub fn launcher_manifest_path(&self) -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(LAUNCHER_MANIFEST_ENV) {
            return Some(PathBuf::from(path));
        }

        #[cfg(windows)]
        {
            std::env::var_os("ProgramData").map(|data| {
                PathBuf::from(data).join("Epic/UnrealEngineLauncher/LauncherInstalled.dat")
            })
        }
        #[cfg(not(windows))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::with_home(PathBuf::from("/data/upbt"));
        assert_eq!(ctx.settings_path(), PathBuf::from("/data/upbt/settings.toml"));
        assert_eq!(ctx.built_plugins_dir(), PathBuf::from("/data/upbt/BuiltPlugins"));
    }

    #[test]
    fn test_default_path_format_tokens() {
        let ctx = GlobalContext::with_home(PathBuf::from("/data/upbt"));
        let format = ctx.default_path_format();
        assert!(format.starts_with("/data/upbt/BuiltPlugins"));
        assert!(format.ends_with("%n/%v/%e"));
    }
}
