use anyhow::{bail, Context, Result};

use crate::path::PathResolver;
use crate::SceneHandle;

/// Parses user input into a scene handle, normalizing local paths through the
/// resolver so `~` and `$VAR` spellings work from the CLI.
pub fn parse_scene_handle(resolver: &PathResolver, input: &str) -> Result<SceneHandle> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("scene reference must not be empty");
    }

    if let Some(stripped) = trimmed.strip_prefix("scene://") {
        let name = stripped.trim();
        if name.is_empty() {
            bail!("scene name missing after scheme");
        }
        return Ok(SceneHandle::Named(name.to_string()));
    }

    let normalized = resolver
        .normalize_local_path(trimmed)
        .with_context(|| format!("failed to resolve local scene path '{trimmed}'"))?;
    Ok(SceneHandle::LocalPack(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_scheme_handles() {
        let resolver = PathResolver::with_cwd("/tmp");
        assert_eq!(
            parse_scene_handle(&resolver, "scene://goo-card").unwrap(),
            SceneHandle::Named("goo-card".into())
        );
    }

    #[test]
    fn rejects_empty_scheme() {
        let resolver = PathResolver::with_cwd("/tmp");
        assert!(parse_scene_handle(&resolver, "scene://").is_err());
        assert!(parse_scene_handle(&resolver, "  ").is_err());
    }

    #[test]
    fn falls_back_to_local_paths() {
        let resolver = PathResolver::with_cwd("/tmp");
        let handle = parse_scene_handle(&resolver, "packs/demo").unwrap();
        assert_eq!(handle, SceneHandle::LocalPack(PathBuf::from("packs/demo")));
    }
}
