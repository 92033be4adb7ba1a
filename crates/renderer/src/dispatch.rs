use effects::ImageSampler;
use glam::Vec2;
use rayon::prelude::*;
use tracing::trace;

use crate::instance::EffectInstance;
use crate::pixmap::Pixmap;

/// Evaluates `instance` for every pixel of `target`, sampling the backing
/// layer through `sampler`.
///
/// Invocations are independent and side-effect free, so rows are distributed
/// across the rayon pool; the sampler only needs to support concurrent point
/// reads. Pixels are shaded at their centers (`x + 0.5`, `y + 0.5`).
pub fn render_into(instance: &EffectInstance, sampler: &dyn ImageSampler, target: &mut Pixmap) {
    let width = target.width() as usize;
    trace!(
        effect = instance.label(),
        width = target.width(),
        height = target.height(),
        "dispatching frame"
    );
    target
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let position = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                *pixel = instance.shade(position, sampler).to_array();
            }
        });
}

/// Linear per-pixel blend of two equally sized frames, `mix = 0` selecting
/// `from` and `mix = 1` selecting `to`. Used for scene crossfades.
///
/// # Panics
///
/// Panics if the three pixmaps differ in size; callers allocate all session
/// frames at one resolution.
pub fn blend_into(from: &Pixmap, to: &Pixmap, mix: f32, target: &mut Pixmap) {
    assert_eq!(from.pixels().len(), to.pixels().len());
    assert_eq!(from.pixels().len(), target.pixels().len());

    let mix = mix.clamp(0.0, 1.0);
    let keep = 1.0 - mix;
    let (a, b) = (from.as_flat(), to.as_flat());
    for (out, (x, y)) in target.as_flat_mut().iter_mut().zip(a.iter().zip(b.iter())) {
        *out = x * keep + y * mix;
    }
}
