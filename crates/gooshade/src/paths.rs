use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories_next::ProjectDirs;
use tracing::debug;

pub const ENV_CONFIG_DIR: &str = "GOOSHADE_CONFIG_DIR";
pub const ENV_DATA_DIR: &str = "GOOSHADE_DATA_DIR";
pub const ENV_CACHE_DIR: &str = "GOOSHADE_CACHE_DIR";

const QUALIFIER: &str = "org";
const ORGANISATION: &str = "gooshade";
const APPLICATION: &str = "gooshade";

/// Resolved user directories, honouring `GOOSHADE_*` environment overrides so
/// tests and packaging scripts can redirect everything.
#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Result<Self> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANISATION, APPLICATION)
            .ok_or_else(|| anyhow!("failed to determine user directories"))?;

        let config_dir = resolve_directory(ENV_CONFIG_DIR, project_dirs.config_dir());
        let data_dir = resolve_directory(ENV_DATA_DIR, project_dirs.data_dir());
        let cache_dir = resolve_directory(ENV_CACHE_DIR, project_dirs.cache_dir());

        Ok(Self {
            config_dir,
            data_dir,
            cache_dir,
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Ordered scene search roots: a `scenes` directory next to the caller
    /// first, then the installed defaults.
    pub fn scene_roots(&self) -> Vec<PathBuf> {
        vec![PathBuf::from("scenes"), self.scenes_dir()]
    }

    /// Where `defaults sync` installs the bundled scenes.
    pub fn scenes_dir(&self) -> PathBuf {
        self.data_dir.join("scenes")
    }

    /// Default output directory for rendered frames.
    pub fn default_output_dir(&self) -> PathBuf {
        PathBuf::from("frames")
    }
}

fn resolve_directory(env_key: &str, fallback: &Path) -> PathBuf {
    match env::var_os(env_key) {
        Some(value) if !value.is_empty() => {
            let path = PathBuf::from(value);
            debug!(key = env_key, path = %path.display(), "using environment directory override");
            path
        }
        _ => fallback.to_path_buf(),
    }
}
