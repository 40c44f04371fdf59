//! Epic launcher manifest parsing.
//!
//! The launcher records binary engine installs in a JSON manifest
//! (`LauncherInstalled.dat`). Reading it is best effort: a missing,
//! unreadable or malformed manifest contributes no installs and is never an
//! error, since custom installs remain usable without it.

use std::path::Path;

use serde::Deserialize;

use crate::core::EngineInstall;

/// Engine installs listed in the manifest are named with this prefix.
/// Everything else in the installation list (marketplace plugins and the
/// like, e.g. `ConfigBPPlugin_4.17`) is skipped.
const ENGINE_APP_PREFIX: &str = "UE_";

#[derive(Debug, Deserialize)]
struct LauncherManifest {
    #[serde(rename = "InstallationList", default)]
    installation_list: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    #[serde(rename = "AppName", default)]
    app_name: String,

    #[serde(rename = "InstallLocation", default)]
    install_location: String,
}

/// Read engine installs from a launcher manifest, in manifest order.
pub fn read_manifest(path: &Path) -> Vec<EngineInstall> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::debug!(
                "cannot open launcher manifest {}: {}; skipping automatic engine detection",
                path.display(),
                e
            );
            return Vec::new();
        }
    };

    let manifest: LauncherManifest = match serde_json::from_str(&contents) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::debug!(
                "invalid launcher manifest {}: {}; skipping automatic engine detection",
                path.display(),
                e
            );
            return Vec::new();
        }
    };

    manifest
        .installation_list
        .into_iter()
        .filter(|entry| entry.app_name.starts_with(ENGINE_APP_PREFIX))
        .map(|entry| {
            tracing::debug!(
                "found engine install {} at {}",
                entry.app_name,
                entry.install_location
            );
            EngineInstall::new(entry.app_name, entry.install_location)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("LauncherInstalled.dat");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reads_engine_entries_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(
            &tmp,
            r#"{
                "InstallationList": [
                    {"AppName": "UE_4.17", "InstallLocation": "C:/UE/4.17"},
                    {"AppName": "UE_4.18", "InstallLocation": "C:/UE/4.18"}
                ]
            }"#,
        );

        let installs = read_manifest(&path);
        assert_eq!(installs.len(), 2);
        assert_eq!(installs[0].name, "UE_4.17");
        assert_eq!(installs[1].name, "UE_4.18");
    }

    #[test]
    fn test_filters_non_engine_entries() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(
            &tmp,
            r#"{
                "InstallationList": [
                    {"AppName": "ConfigBPPlugin_4.17", "InstallLocation": "C:/Plugins/CBP"},
                    {"AppName": "UE_4.17", "InstallLocation": "C:/UE/4.17"}
                ]
            }"#,
        );

        let installs = read_manifest(&path);
        assert_eq!(installs.len(), 1);
        assert_eq!(installs[0].name, "UE_4.17");
    }

    #[test]
    fn test_missing_manifest_is_empty() {
        let tmp = TempDir::new().unwrap();
        let installs = read_manifest(&tmp.path().join("nope.dat"));
        assert!(installs.is_empty());
    }

    #[test]
    fn test_malformed_manifest_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(&tmp, "garbage, not json");
        assert!(read_manifest(&path).is_empty());
    }

    #[test]
    fn test_missing_installation_list_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(&tmp, r#"{"SomethingElse": 1}"#);
        assert!(read_manifest(&path).is_empty());
    }
}
