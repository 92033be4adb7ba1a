use std::time::Duration;

use rand::prelude::*;
use showconfig::{PlaylistMode, ShowConfig};

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("playlist '{0}' not found")]
    UnknownPlaylist(String),
}

/// One playlist entry with every default folded in, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledScene {
    pub handle: String,
    pub duration: Duration,
    pub fps: Option<f32>,
    pub crossfade: Duration,
}

/// Orders one pass through a playlist for an offline session render.
///
/// A wallpaper daemon would loop forever; a session render walks the playlist
/// once, in declared order for `continuous` mode or in a seeded shuffle for
/// `shuffle` mode, so the same seed reproduces the same frame sequence.
pub struct Sequencer {
    scenes: Vec<ScheduledScene>,
}

fn normalize_fps(value: Option<f32>) -> Option<f32> {
    value.and_then(|fps| if fps > 0.0 { Some(fps) } else { None })
}

impl Sequencer {
    pub fn new(config: &ShowConfig, playlist: &str, seed: u64) -> Result<Self, ScheduleError> {
        let source = config
            .playlist(playlist)
            .ok_or_else(|| ScheduleError::UnknownPlaylist(playlist.to_string()))?;

        let mut order: Vec<usize> = (0..source.items.len()).collect();
        if matches!(source.mode, PlaylistMode::Shuffle) {
            order.shuffle(&mut StdRng::seed_from_u64(seed));
        }

        let scenes = order
            .into_iter()
            .filter_map(|index| source.resolved_item(index, &config.defaults))
            .map(|item| ScheduledScene {
                handle: item.handle,
                duration: item.duration,
                fps: normalize_fps(item.fps),
                crossfade: item.crossfade,
            })
            .collect();

        Ok(Self { scenes })
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn scenes(&self) -> impl Iterator<Item = &ScheduledScene> {
        self.scenes.iter()
    }
}
