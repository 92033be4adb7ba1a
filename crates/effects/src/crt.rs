//! Retro CRT restyling of a backing layer: pixelation, grayscale, animated
//! static, scanlines, vignette, and a warm phosphor tint, applied in that
//! order. Reordering the stages changes the visible contrast, so each stage
//! feeds the next exactly as written.

use glam::{Vec2, Vec3, Vec4};

use crate::math::{fract, TAU};
use crate::sampler::ImageSampler;

/// Per-frame uniform bundle for the CRT effect.
#[derive(Debug, Clone, Copy)]
pub struct CrtUniforms {
    /// Layer size in pixels.
    pub size: Vec2,
    /// Elapsed seconds; drives the static noise.
    pub time: f32,
    /// Side of one pixelation cell in pixels; values below 1 behave as 1.
    pub pixel_size: f32,
}

/// BT.601 luminance weights.
const LUMA: Vec3 = Vec3::new(0.299, 0.587, 0.114);
/// Warm phosphor tint applied after all dimming.
const TINT: Vec3 = Vec3::new(1.0, 0.95, 0.85);

/// Stylized CRT color for one pixel; alpha is passed through from the sampled
/// backing color.
pub fn shade(position: Vec2, sampler: &dyn ImageSampler, uniforms: &CrtUniforms) -> Vec4 {
    let cell_side = uniforms.pixel_size.max(1.0);
    let cell = (position / cell_side).floor();
    let snapped = cell * cell_side + Vec2::splat(cell_side * 0.5);
    let source = sampler.sample(snapped);

    let mut level = source.truncate().dot(LUMA);
    level += cell_noise(cell, uniforms.time) * 0.12;
    level *= 0.89 + (position.y * 3.0).sin() * 0.11;

    let centered = position / uniforms.size.max(Vec2::ONE) - Vec2::splat(0.5);
    level *= (1.0 - centered.length_squared() * 1.4).clamp(0.0, 1.0);

    (TINT * level).extend(source.w)
}

/// Per-cell static: the classic sine-dot hash, animated by time. Deterministic
/// for a given cell coordinate and time.
pub fn cell_noise(cell: Vec2, time: f32) -> f32 {
    fract((cell.dot(Vec2::new(12.9898, 78.233)) + time * TAU).sin() * 43758.5453)
}
