use anyhow::Result;
use glam::Vec2;
use motion::{GesturePlayer, ScalarTrack};
use renderer::{render_into, EffectInstance, Pixmap};
use scenepack::LocalScenePack;

use crate::bindings::{
    build_gesture, build_instance, build_sampler_source, build_tracks, SamplerSource,
};

/// A loaded scene plus its live choreography: the piece of state the frame
/// loop advances and renders. Construction resolves everything fallible up
/// front so the loop itself only shades pixels.
pub struct ScenePlayer {
    label: String,
    instance: EffectInstance,
    source: SamplerSource,
    tracks: Vec<(String, ScalarTrack)>,
    gesture: Option<GesturePlayer>,
}

impl ScenePlayer {
    pub fn from_pack(pack: &LocalScenePack, size: (u32, u32)) -> Result<Self> {
        let size_vec = Vec2::new(size.0 as f32, size.1 as f32);
        let manifest = pack.manifest();
        Ok(Self {
            label: pack.display_name(),
            instance: build_instance(manifest, size_vec)?,
            source: build_sampler_source(pack)?,
            tracks: build_tracks(manifest),
            gesture: build_gesture(manifest).map(GesturePlayer::new),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn effect(&self) -> &'static str {
        self.instance.label()
    }

    /// Moves the scene clock to `seconds` and refreshes every animated
    /// uniform; `dt` is the frame interval used for spring stepping.
    pub fn advance(&mut self, seconds: f32, dt: f32) -> Result<()> {
        self.instance.set_time(seconds);
        for (param, track) in &self.tracks {
            self.instance.set_param(param, track.sample(seconds))?;
        }
        if let Some(gesture) = &mut self.gesture {
            let sample = gesture.advance(seconds, dt);
            self.instance
                .set_gesture(sample.touch, sample.velocity, sample.dragging);
        }
        Ok(())
    }

    pub fn render(&self, target: &mut Pixmap) {
        render_into(&self.instance, &self.source, target);
    }
}
