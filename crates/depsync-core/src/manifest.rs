//! Package manifest reading (package.json)
//!
//! Supplies the set of dependency names a project already declares. Only the
//! keys of the dependency maps are consumed; version ranges are ignored.

use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No manifest file at the expected location
    #[error("No package.json found at {0}")]
    NotFound(PathBuf),

    /// Failed to read manifest file
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse JSON
    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The subset of package.json the resolver cares about.
///
/// Unknown fields are tolerated; only the package name and the three
/// dependency classes are deserialized.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    /// Package name (informational only)
    #[serde(default)]
    pub name: Option<String>,

    /// Runtime dependencies
    #[serde(default)]
    pub dependencies: HashMap<String, String>,

    /// Development-only dependencies
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: HashMap<String, String>,

    /// Peer dependencies
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: HashMap<String, String>,
}

impl PackageManifest {
    /// Read and parse the manifest at `path`.
    ///
    /// An absent or malformed manifest is an error: without it there is no
    /// declared baseline to diff against.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a manifest from a string.
    pub fn from_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// All declared dependency names, merged across the runtime, development
    /// and peer classes. Union semantics: the class distinction is not
    /// preserved.
    pub fn declared_names(&self) -> BTreeSet<String> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .chain(self.peer_dependencies.keys())
            .cloned()
            .collect()
    }
}
