//! Plugin descriptor (`.uplugin`) parsing.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Metadata read from a plugin's `.uplugin` descriptor file.
///
/// Descriptors are JSON. Only the fields the build path needs are modeled;
/// everything else in the file is ignored. A descriptor is re-read for every
/// build request, never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PluginDescriptor {
    /// Human-readable plugin name.
    #[serde(rename = "FriendlyName", default)]
    pub friendly_name: String,

    /// Plugin version string, e.g. `1.0`.
    #[serde(rename = "VersionName", default)]
    pub version_name: String,
}

/// Error reading a plugin descriptor file.
#[derive(Debug, Error)]
#[error("failed to read plugin descriptor `{path}`")]
pub struct DescriptorReadError {
    /// The descriptor path that could not be read.
    pub path: String,
    #[source]
    source: std::io::Error,
}

impl PluginDescriptor {
    /// Load a descriptor from a `.uplugin` file.
    ///
    /// An unreadable file is an error. Readable content is parsed leniently:
    /// missing `FriendlyName`/`VersionName` fields come back as empty
    /// strings, and content that is not valid JSON at all degrades to an
    /// empty descriptor. Downstream path templating tolerates the empty
    /// values.
    pub fn load(path: &Path) -> Result<Self, DescriptorReadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DescriptorReadError {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self::parse(&contents, path))
    }

    fn parse(contents: &str, path: &Path) -> Self {
        match serde_json::from_str(contents) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::warn!(
                    "malformed plugin descriptor `{}`: {}; treating as empty",
                    path.display(),
                    e
                );
                PluginDescriptor::default()
            }
        }
    }
}
