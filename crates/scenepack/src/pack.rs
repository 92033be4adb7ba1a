//! Wraps a scene pack directory so `repository` and the CLI bindings can load
//! manifests and resolve texture paths consistently. Filesystem validation
//! stays centralized here while higher layers decide whether the pack came
//! from a user directory or the bundled defaults.
//!
//! Types:
//!
//! - `PackError` classifies manifest parsing, validation, and I/O failures for
//!   error reporting in the CLI.
//! - `LocalScenePack` stores the resolved root directory and parsed
//!   `SceneManifest` for later traversal by repository and renderer glue.
//!
//! Functions:
//!
//! - `LocalScenePack::load` reads `scene.toml`, validates it, and returns a
//!   filesystem-backed handle.
//! - `LocalScenePack::texture_path` resolves the backing image relative to the
//!   pack root.
//! - `ensure_assets` confirms a declared texture exists on disk so later
//!   decode errors point at image data, not missing files.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::manifest::{InputSource, SceneManifest};

#[derive(Debug, Error)]
pub enum PackError {
    #[error("manifest not found at {0}")]
    ManifestMissing(PathBuf),

    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    #[error("manifest validation failed: {0:?}")]
    ManifestValidation(Vec<String>),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct LocalScenePack {
    root: PathBuf,
    manifest: SceneManifest,
}

impl LocalScenePack {
    pub fn load(root: impl AsRef<Path>) -> Result<Self, PackError> {
        let root = root.as_ref().to_path_buf();
        let manifest_path = root.join("scene.toml");
        if !manifest_path.exists() {
            return Err(PackError::ManifestMissing(manifest_path));
        }

        let manifest_raw = fs::read_to_string(&manifest_path)?;
        let manifest: SceneManifest = toml::from_str(&manifest_raw)?;
        let issues = manifest.validate();
        if !issues.is_empty() {
            return Err(PackError::ManifestValidation(issues));
        }

        Ok(Self { root, manifest })
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    pub fn manifest(&self) -> &SceneManifest {
        &self.manifest
    }

    /// Display name, falling back to the pack directory stem.
    pub fn display_name(&self) -> String {
        self.manifest
            .name
            .clone()
            .or_else(|| {
                self.root
                    .file_name()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "unnamed scene".to_string())
    }

    /// Absolute path of the backing texture, if the scene declares one.
    pub fn texture_path(&self) -> Option<PathBuf> {
        match &self.manifest.input {
            InputSource::Texture { path } => Some(self.root.join(path)),
            _ => None,
        }
    }
}

/// Confirms every filesystem asset the manifest references exists.
pub fn ensure_assets(pack: &LocalScenePack) -> Result<(), PackError> {
    if let Some(texture) = pack.texture_path() {
        if !texture.exists() {
            return Err(PackError::ManifestValidation(vec![format!(
                "missing backing texture: {}",
                texture.display()
            )]));
        }
    }
    Ok(())
}
