use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use scenepack::{parse_scene_handle, PathResolver, SceneHandle};
use showconfig::parse_size;

use crate::cli::RunArgs;
use crate::paths::AppPaths;

pub const DEFAULT_SIZE: (u32, u32) = (640, 360);
pub const DEFAULT_FPS: f32 = 30.0;
pub const DEFAULT_FRAMES: u32 = 150;

/// Everything a single-scene render needs, assembled from CLI flags and
/// defaults before any frame work starts.
#[derive(Debug)]
pub struct SingleRunConfig {
    pub handle: SceneHandle,
    pub size: (u32, u32),
    pub fps: f32,
    pub frames: u32,
    pub still: Option<f32>,
    pub output: PathBuf,
}

pub fn resolve_scene_handle(args: &RunArgs) -> Result<SceneHandle> {
    let raw = args
        .scene
        .as_deref()
        .context("no scene handle given; pass one like `scene://goo-card` or a pack path")?;
    let resolver = PathResolver::new()?;
    parse_scene_handle(&resolver, raw)
}

pub fn parse_surface_size(raw: Option<&str>) -> Result<(u32, u32)> {
    match raw {
        Some(value) => parse_size(value).map_err(Into::into),
        None => Ok(DEFAULT_SIZE),
    }
}

pub fn single_run_config(args: &RunArgs, paths: &AppPaths) -> Result<SingleRunConfig> {
    let handle = resolve_scene_handle(args)?;
    let size = parse_surface_size(args.size.as_deref())?;

    let fps = match args.fps {
        Some(fps) if fps > 0.0 => fps,
        Some(fps) => bail!("fps must be positive, got {fps}"),
        None => DEFAULT_FPS,
    };

    let frames = match args.frames {
        Some(0) => bail!("frame count must be positive"),
        Some(frames) => frames,
        None => DEFAULT_FRAMES,
    };

    if let Some(still) = args.still {
        if still < 0.0 {
            bail!("still timestamp must be non-negative, got {still}");
        }
    }

    Ok(SingleRunConfig {
        handle,
        size,
        fps,
        frames,
        still: args.still,
        output: args
            .output
            .clone()
            .unwrap_or_else(|| paths.default_output_dir()),
    })
}
