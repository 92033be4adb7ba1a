use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::paths::AppPaths;

/// A demo scene embedded in the binary and installed by `defaults sync`.
#[derive(Debug, Clone, Copy)]
pub struct BundledScene {
    pub name: &'static str,
    pub manifest: &'static str,
}

pub const BUNDLED_SCENES: [BundledScene; 4] = [
    BundledScene {
        name: "spectrum-badge",
        manifest: include_str!("../assets/scenes/spectrum-badge.toml"),
    },
    BundledScene {
        name: "goo-card",
        manifest: include_str!("../assets/scenes/goo-card.toml"),
    },
    BundledScene {
        name: "carousel-depth",
        manifest: include_str!("../assets/scenes/carousel-depth.toml"),
    },
    BundledScene {
        name: "retro-tv",
        manifest: include_str!("../assets/scenes/retro-tv.toml"),
    },
];

#[derive(Debug, Clone)]
pub struct SceneStatus {
    pub name: &'static str,
    pub path: PathBuf,
    pub installed: bool,
}

#[derive(Debug, Clone)]
pub struct PathOverview {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub scene_roots: Vec<PathBuf>,
}

pub fn describe_paths(paths: &AppPaths) -> PathOverview {
    PathOverview {
        config_dir: paths.config_dir().to_path_buf(),
        data_dir: paths.data_dir().to_path_buf(),
        cache_dir: paths.cache_dir().to_path_buf(),
        scene_roots: paths.scene_roots(),
    }
}

pub fn scene_statuses(paths: &AppPaths) -> Vec<SceneStatus> {
    BUNDLED_SCENES
        .iter()
        .map(|scene| {
            let path = paths.scenes_dir().join(scene.name).join("scene.toml");
            SceneStatus {
                name: scene.name,
                installed: path.exists(),
                path,
            }
        })
        .collect()
}

/// Installs any bundled scene not already present; existing files are left
/// untouched so user edits survive a re-sync. Returns the paths written (or,
/// for a dry run, the paths that would be).
pub fn sync(paths: &AppPaths, dry_run: bool) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for scene in BUNDLED_SCENES {
        let dir = paths.scenes_dir().join(scene.name);
        let manifest_path = dir.join("scene.toml");
        if manifest_path.exists() {
            continue;
        }
        if dry_run {
            written.push(manifest_path);
            continue;
        }
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create scene directory '{}'", dir.display()))?;
        fs::write(&manifest_path, scene.manifest)
            .with_context(|| format!("failed to write '{}'", manifest_path.display()))?;
        info!(scene = scene.name, path = %manifest_path.display(), "installed bundled scene");
        written.push(manifest_path);
    }
    Ok(written)
}
