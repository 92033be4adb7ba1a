//! Gooey fluid distortion for a card being dragged around a layer.
//!
//! The effect merges the card's rounded-rectangle distance field with a blob
//! centred on the touch point via smooth-minimum, then builds a displacement
//! out of several terms (radial stretch, edge warp, velocity trail, ripples,
//! idle undulation) and samples the backing layer at the displaced position.
//! All terms except the idle undulation are gated on the dragging flag, so a
//! resting card only breathes gently.

use glam::{Vec2, Vec4};

use crate::math::{mix, smoothstep};
use crate::sampler::ImageSampler;
use crate::sdf::{sd_circle, sd_rounded_rect, smin};

/// Per-frame uniform bundle for the gooey distortion.
#[derive(Debug, Clone, Copy)]
pub struct GooeyUniforms {
    /// Layer size in pixels; the card is centred in it.
    pub size: Vec2,
    /// Touch point in layer coordinates.
    pub touch: Vec2,
    /// Instantaneous drag velocity in pixels per second.
    pub velocity: Vec2,
    /// Elapsed seconds.
    pub time: f32,
    /// `[0, 1]`; sharper card corners as it rises.
    pub angularity: f32,
    /// `[0, 1]`; overall deformation strength.
    pub amplitude: f32,
    /// `[0, 1]`; syrupier response as it rises.
    pub viscosity: f32,
    /// `0.0` or `1.0`; whether a drag is active this frame.
    pub dragging: f32,
}

/// Inset between the layer bounds and the card edge.
const CARD_MARGIN: f32 = 24.0;
/// Blend radius used to merge the card field with the touch blob.
const MERGE_RADIUS: f32 = 28.0;
/// Half-width of the band around the merged boundary that the edge warp acts on.
const EDGE_BAND: f32 = 10.0;

fn card_half_extents(uniforms: &GooeyUniforms) -> Vec2 {
    (uniforms.size * 0.5 - Vec2::splat(CARD_MARGIN)).max(Vec2::ONE)
}

fn corner_radius(uniforms: &GooeyUniforms) -> f32 {
    mix(26.0, 6.0, uniforms.angularity)
}

fn blob_radius(uniforms: &GooeyUniforms) -> f32 {
    uniforms.dragging * (18.0 + 26.0 * uniforms.amplitude)
}

/// Merged card-plus-blob distance field at `position`.
pub fn field(position: Vec2, uniforms: &GooeyUniforms) -> f32 {
    let card = sd_rounded_rect(
        position - uniforms.size * 0.5,
        card_half_extents(uniforms),
        corner_radius(uniforms),
    );
    let blob = sd_circle(position - uniforms.touch, blob_radius(uniforms));
    smin(card, blob, MERGE_RADIUS)
}

/// Total sampling displacement at `position`, before it is subtracted from the
/// pixel position. Deliberately unclamped; the backing sampler is responsible
/// for handling coordinates that land outside the layer.
pub fn displacement(position: Vec2, uniforms: &GooeyUniforms) -> Vec2 {
    let to_touch = uniforms.touch - position;
    let dist = to_touch.length();

    // Wider, more gradual falloff as viscosity rises.
    let reach = (uniforms.size.max_element() * 0.5).max(1.0);
    let falloff_exp = mix(1.5, 0.6, uniforms.viscosity);
    let influence =
        uniforms.dragging * (1.0 - (dist / reach).clamp(0.0, 1.0)).powf(falloff_exp);

    let toward = (to_touch + Vec2::splat(0.001)).normalize();
    let stretch = toward * influence * (14.0 + 26.0 * uniforms.amplitude);

    let edge_proximity = 1.0 - (field(position, uniforms).abs() / EDGE_BAND).min(1.0);
    let outward = (position - uniforms.touch + Vec2::splat(0.001)).normalize();
    let edge = outward * edge_proximity * influence * (6.0 + 10.0 * uniforms.amplitude);

    let trail = uniforms.velocity * uniforms.viscosity * influence * 0.06;

    let phase = dist * 0.045;
    let primary = (phase * 1.7 - uniforms.time * 5.0).sin();
    let secondary = (phase * 3.1 - uniforms.time * 7.3 + 1.3).sin();
    let ripple =
        toward * (primary * 0.6 + secondary * 0.4) * influence * uniforms.amplitude * 6.0;

    let idle = Vec2::new(
        (position.y * 0.021 + uniforms.time * 0.9).sin(),
        (position.x * 0.017 + uniforms.time * 0.7).cos(),
    ) * 1.5;

    // Heavier damping with viscosity keeps the card feeling syrupy.
    let damping = mix(1.0, 0.55, uniforms.viscosity);
    (stretch + edge + trail + ripple + idle) * damping
}

/// Samples the backing layer through the distortion field.
pub fn shade(position: Vec2, sampler: &dyn ImageSampler, uniforms: &GooeyUniforms) -> Vec4 {
    sampler.sample(position - displacement(position, uniforms))
}

/// Alpha-only companion: multiplies `color` by a smoothed coverage mask of the
/// merged field, for clipping a layer to the gooey silhouette.
pub fn mask(position: Vec2, color: Vec4, uniforms: &GooeyUniforms) -> Vec4 {
    color * (1.0 - smoothstep(-1.5, 1.5, field(position, uniforms)))
}
