//! Depth-dependent blur and perspective compression for items arranged on a
//! virtual cylinder. The further an item sits from the camera, the narrower
//! and blurrier it renders.

use glam::{Vec2, Vec4};

use crate::sampler::ImageSampler;

/// Per-frame uniform bundle for the cylindrical depth effect.
#[derive(Debug, Clone, Copy)]
pub struct DepthUniforms {
    /// Size of the item's cell in pixels.
    pub cell_size: Vec2,
    /// `[0, 1]`, 1 = nearest to the camera.
    pub normalized_depth: f32,
    /// Blur radius in pixels applied to the farthest depth.
    pub max_blur: f32,
}

/// Kernel radius is bounded to keep the per-pixel cost predictable.
const MAX_KERNEL_RADIUS: i32 = 5;
/// Below this blur radius the kernel would be visually indistinguishable from
/// a direct sample, so the work is skipped.
const BLUR_EPSILON: f32 = 0.5;

/// Blurred, perspective-compressed sample for one pixel of a cell.
pub fn shade(position: Vec2, sampler: &dyn ImageSampler, uniforms: &DepthUniforms) -> Vec4 {
    let depth = 1.0 - uniforms.normalized_depth;
    let blur = depth * uniforms.max_blur;

    let center_x = uniforms.cell_size.x * 0.5;
    let compressed = Vec2::new(
        center_x + (position.x - center_x) * (1.0 + depth * 0.07),
        position.y,
    );

    if blur < BLUR_EPSILON {
        return sampler.sample(compressed);
    }

    let radius = (blur.ceil() as i32).clamp(1, MAX_KERNEL_RADIUS);
    let sigma = (blur * 0.5).max(0.5);
    let cutoff = ((radius + 1) * (radius + 1)) as f32;

    let mut accumulated = Vec4::ZERO;
    let mut total_weight = 0.0;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let squared = (dx * dx + dy * dy) as f32;
            if squared > cutoff {
                continue;
            }
            let weight = (-squared / (2.0 * sigma * sigma)).exp();
            accumulated += sampler.sample(compressed + Vec2::new(dx as f32, dy as f32)) * weight;
            total_weight += weight;
        }
    }
    // The center tap is always inside the cutoff, so the weight sum is positive.
    accumulated / total_weight
}

/// Pure geometric warp simulating cylindrical curvature for shape-level
/// transforms: horizontal compression grows with `|sin(angle)|` and rows skew
/// vertically in proportion to their horizontal offset from the cell center.
pub fn spiral_perspective_warp(position: Vec2, size: Vec2, angle: f32, strength: f32) -> Vec2 {
    let center_x = size.x * 0.5;
    let offset_x = position.x - center_x;
    let compression = 1.0 - strength * angle.sin().abs();
    Vec2::new(
        center_x + offset_x * compression,
        position.y + angle.sin() * offset_x * strength * 0.35,
    )
}
