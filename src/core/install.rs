//! Engine installation type.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The name of the automation tool launcher script, relative to an engine
/// install root.
#[cfg(windows)]
pub const UAT_SCRIPT: &str = "Engine/Build/BatchFiles/RunUAT.bat";
#[cfg(not(windows))]
pub const UAT_SCRIPT: &str = "Engine/Build/BatchFiles/RunUAT.sh";

/// A named, path-located Unreal Engine installation.
///
/// Installs come from two places: the Epic launcher manifest (binary
/// installs) and user-registered custom installs. Identity is the name;
/// nothing enforces that two installs have distinct names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInstall {
    /// Display name, e.g. `UE_4.17` for launcher installs.
    #[serde(rename = "Name")]
    pub name: String,

    /// Root directory of the installation.
    #[serde(rename = "Path")]
    pub path: PathBuf,
}

impl EngineInstall {
    /// Create a new engine install.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        EngineInstall {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Path to this install's automation tool launcher script.
    ///
    /// The path is not validated here; a bogus install fails when a build
    /// tries to spawn the tool.
    pub fn uat_path(&self) -> PathBuf {
        self.path.join(UAT_SCRIPT)
    }
}

impl fmt::Display for EngineInstall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}
