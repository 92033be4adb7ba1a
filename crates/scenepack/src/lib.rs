mod handle;
mod manifest;
mod pack;
mod path;
mod repository;

pub use handle::parse_scene_handle;
pub use manifest::{
    CurveName, EffectKind, GesturePath, GestureSpec, InputSource, SceneManifest, TrackMotion,
    TrackSpec,
};
pub use pack::{ensure_assets, LocalScenePack, PackError};
pub use path::PathResolver;
pub use repository::SceneRepository;

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneHandle {
    Named(String),
    LocalPack(PathBuf),
}

impl SceneHandle {
    pub fn from_input(input: &str) -> Self {
        if let Some(name) = input.strip_prefix("scene://") {
            Self::Named(name.to_string())
        } else {
            Self::LocalPack(PathBuf::from(input))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scene_scheme() {
        assert_eq!(
            SceneHandle::from_input("scene://retro-tv"),
            SceneHandle::Named("retro-tv".into())
        );
    }

    #[test]
    fn parses_local_path() {
        assert!(matches!(
            SceneHandle::from_input("packs/demo"),
            SceneHandle::LocalPack(path) if path == PathBuf::from("packs/demo")
        ));
    }
}
