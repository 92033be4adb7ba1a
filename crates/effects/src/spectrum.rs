//! Chrome-spectrum recoloring for a pill-shaped border stroke.
//!
//! Unlike the distortion effects this one never resamples neighbouring
//! pixels: the host hands in the stroke color it already rendered at the
//! pixel and the effect replaces its hue based on where the pixel sits on
//! the pill's perimeter, how the device is tilted, and the elapsed time.

use glam::{Vec2, Vec3, Vec4};

use crate::math::{fract, TAU};

/// Per-frame uniform bundle for the spectrum border.
#[derive(Debug, Clone, Copy)]
pub struct SpectrumUniforms {
    /// Bounding size of the stroked pill in pixels.
    pub size: Vec2,
    /// Elapsed seconds; drives the slow rotation of the gradient band.
    pub time: f32,
    /// Simulated device tilt, each axis in `[-1, 1]`.
    pub tilt: Vec2,
}

/// Input alpha below this threshold short-circuits to the input color, so the
/// gradient never bleeds into anti-aliased stroke edges.
const ALPHA_FLOOR: f32 = 0.01;

const SILVER: Vec3 = Vec3::new(0.78, 0.79, 0.82);
const CYAN: Vec3 = Vec3::new(0.25, 0.88, 1.0);
const BLUE: Vec3 = Vec3::new(0.18, 0.35, 1.0);
const VIOLET: Vec3 = Vec3::new(0.62, 0.26, 0.94);
const GOLD: Vec3 = Vec3::new(1.0, 0.82, 0.36);

/// Gradient stops; the sixth band wraps back to the first stop.
const STOPS: [Vec3; 5] = [SILVER, CYAN, BLUE, VIOLET, GOLD];

/// Recolors one border pixel.
///
/// Returns the input unchanged for near-transparent pixels; otherwise the
/// output is premultiplied against the input alpha.
pub fn shade(position: Vec2, color: Vec4, uniforms: &SpectrumUniforms) -> Vec4 {
    if color.w < ALPHA_FLOOR {
        return color;
    }

    let t = perimeter_parameter(position, uniforms.size);
    let shifted = fract(
        t + uniforms.tilt.x * 0.4 + uniforms.tilt.y * 0.3 + uniforms.time * 0.05,
    );

    let base = gradient(shifted);

    let light = fract(uniforms.tilt.x * 2.5 + uniforms.tilt.y * 1.5);
    let falloff = (-wrap_distance(shifted, light).powi(2) * 80.0).exp();
    let lit = base.lerp(Vec3::ONE, falloff * 0.7);

    (lit * color.w).extend(color.w)
}

/// Maps a pixel to its angular position around the pill, normalized to
/// `[0, 1)` with 0 at the leftmost point and 0.5 at the rightmost.
///
/// Offsets are divided by the bounding size before taking the angle, so a
/// wide pill still sweeps the parameter uniformly around its perimeter.
pub fn perimeter_parameter(position: Vec2, size: Vec2) -> f32 {
    let rel = (position - size * 0.5) / size.max(Vec2::ONE);
    let angle = rel.y.atan2(rel.x);
    fract(angle / TAU + 0.5)
}

/// Piecewise-linear five-stop gradient over `t` in `[0, 1)`; adjacent bands
/// meet exactly at the stop colors so there is no seam.
pub fn gradient(t: f32) -> Vec3 {
    let scaled = fract(t) * STOPS.len() as f32;
    let index = (scaled.floor() as usize).min(STOPS.len() - 1);
    let within = scaled - index as f32;
    STOPS[index].lerp(STOPS[(index + 1) % STOPS.len()], within)
}

/// Shortest wrapping distance between two perimeter parameters.
fn wrap_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs();
    d.min(1.0 - d)
}
