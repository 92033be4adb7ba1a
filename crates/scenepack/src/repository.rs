//! Resolves scene handles into ready-to-render packs, hiding the difference
//! between named scenes installed under the search roots and explicit pack
//! directories. CLI and session code hand it `SceneHandle`s, while it consults
//! `PathResolver` and `LocalScenePack` to load and validate manifests.
//!
//! Types:
//!
//! - `SceneRepository` stores ordered search roots and performs resolution for
//!   every handle the CLI encounters.
//!
//! Functions:
//!
//! - `SceneRepository::resolve` walks the roots (or loads an explicit path)
//!   and returns a validated `LocalScenePack` with its assets confirmed.
//! - `SceneRepository::available` lists the named scenes under the roots for
//!   `defaults list` style diagnostics.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::pack::{ensure_assets, LocalScenePack};
use crate::SceneHandle;

#[derive(Debug)]
pub struct SceneRepository {
    roots: Vec<PathBuf>,
}

impl SceneRepository {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn resolve(&self, handle: &SceneHandle) -> Result<LocalScenePack> {
        let pack = match handle {
            SceneHandle::Named(name) => self.resolve_named(name)?,
            SceneHandle::LocalPack(path) => self.load_pack_path(path)?,
        };
        ensure_assets(&pack)?;
        Ok(pack)
    }

    fn resolve_named(&self, name: &str) -> Result<LocalScenePack> {
        if name.trim().is_empty() {
            return Err(anyhow!("scene name must not be empty"));
        }
        for root in &self.roots {
            let candidate = root.join(name);
            debug!(candidate = %candidate.display(), "checking scene candidate");
            if candidate.join("scene.toml").exists() {
                return Ok(LocalScenePack::load(&candidate)?);
            }
        }
        Err(anyhow!(
            "scene '{name}' not found under any search root ({})",
            self.describe_roots()
        ))
    }

    fn load_pack_path(&self, path: &Path) -> Result<LocalScenePack> {
        if path.as_os_str().is_empty() {
            return Err(anyhow!("scene pack path must not be empty"));
        }

        let candidates: Vec<PathBuf> = if path.is_absolute() || path.exists() {
            vec![path.to_path_buf()]
        } else {
            self.roots.iter().map(|root| root.join(path)).collect()
        };

        for candidate in &candidates {
            debug!(candidate = %candidate.display(), "checking scene pack candidate");
            if candidate.join("scene.toml").exists() {
                return Ok(LocalScenePack::load(candidate)?);
            }
        }
        Err(anyhow!(
            "no scene pack found for '{}' (tried {} candidate(s))",
            path.display(),
            candidates.len()
        ))
    }

    /// Named scenes discoverable under the search roots, sorted and deduped;
    /// earlier roots shadow later ones.
    pub fn available(&self) -> Vec<String> {
        let mut names = Vec::new();
        for root in &self.roots {
            let Ok(entries) = fs::read_dir(root) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.join("scene.toml").exists() {
                    if let Some(name) = path.file_name() {
                        let name = name.to_string_lossy().into_owned();
                        if !names.contains(&name) {
                            names.push(name);
                        }
                    }
                }
            }
        }
        names.sort();
        names
    }

    fn describe_roots(&self) -> String {
        self.roots
            .iter()
            .map(|root| root.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
effect = "crt"

[input]
type = "checker"
"#;

    fn install_scene(root: &Path, name: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("scene.toml"), SCENE).unwrap();
    }

    #[test]
    fn resolves_named_scene_from_first_matching_root() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        install_scene(second.path(), "tv");
        let repo = SceneRepository::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        let pack = repo.resolve(&SceneHandle::Named("tv".into())).unwrap();
        assert!(pack.root().starts_with(second.path()));
    }

    #[test]
    fn resolves_explicit_pack_directory() {
        let temp = tempfile::tempdir().unwrap();
        install_scene(temp.path(), "direct");
        let repo = SceneRepository::new(vec![]);
        let pack = repo
            .resolve(&SceneHandle::LocalPack(temp.path().join("direct")))
            .unwrap();
        assert_eq!(pack.manifest().effect.as_str(), "crt");
    }

    #[test]
    fn unknown_scene_reports_the_roots() {
        let temp = tempfile::tempdir().unwrap();
        let repo = SceneRepository::new(vec![temp.path().to_path_buf()]);
        let err = repo
            .resolve(&SceneHandle::Named("ghost".into()))
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn lists_available_scenes_sorted() {
        let temp = tempfile::tempdir().unwrap();
        install_scene(temp.path(), "zeta");
        install_scene(temp.path(), "alpha");
        let repo = SceneRepository::new(vec![temp.path().to_path_buf()]);
        assert_eq!(repo.available(), vec!["alpha".to_string(), "zeta".to_string()]);
    }
}
