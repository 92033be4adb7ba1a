//! Read-only point-sampling access to a previously rendered layer.
//!
//! The distortion effects never mutate the backing image; they only read it,
//! potentially from many pixels at once, so implementations must tolerate
//! concurrent point reads (`Sync`). Production samplers wrap a rendered
//! pixmap; the procedural samplers here keep effect output predictable in
//! tests and double as cheap demo inputs.

use glam::{Vec2, Vec4};

/// Point-sampling capability over an already rendered layer.
pub trait ImageSampler: Sync {
    /// Returns the color previously rendered at `position`.
    ///
    /// Coordinates outside the backing layer are the implementation's problem;
    /// pixmap-backed samplers clamp to the nearest edge texel.
    fn sample(&self, position: Vec2) -> Vec4;
}

/// Samples a single color everywhere.
#[derive(Debug, Clone, Copy)]
pub struct SolidSampler(pub Vec4);

impl ImageSampler for SolidSampler {
    fn sample(&self, _position: Vec2) -> Vec4 {
        self.0
    }
}

/// Axis-aligned checkerboard, `cell` pixels per square.
#[derive(Debug, Clone, Copy)]
pub struct CheckerSampler {
    pub cell: f32,
    pub even: Vec4,
    pub odd: Vec4,
}

impl ImageSampler for CheckerSampler {
    fn sample(&self, position: Vec2) -> Vec4 {
        let cell = self.cell.max(1.0);
        let tile = (position / cell).floor();
        if (tile.x + tile.y).rem_euclid(2.0) < 1.0 {
            self.even
        } else {
            self.odd
        }
    }
}
