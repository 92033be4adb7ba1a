use std::path::Path;

use anyhow::{Context, Result};
use effects::ImageSampler;
use glam::{Vec2, Vec4};
use image::RgbaImage;

/// Linear-f32 RGBA pixel plane, the working surface for every render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl Pixmap {
    /// Transparent-black pixmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::solid(width, height, Vec4::ZERO)
    }

    /// Pixmap filled with one color.
    pub fn solid(width: u32, height: u32, color: Vec4) -> Self {
        let count = width.max(1) as usize * height.max(1) as usize;
        Self {
            width: width.max(1),
            height: height.max(1),
            pixels: vec![color.to_array(); count],
        }
    }

    /// Loads an image file and converts it to the working format.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .with_context(|| format!("failed to open image '{}'", path.display()))?;
        Ok(Self::from_rgba_image(&decoded.to_rgba8()))
    }

    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        let pixels = image
            .pixels()
            .map(|px| {
                [
                    px.0[0] as f32 / 255.0,
                    px.0[1] as f32 / 255.0,
                    px.0[2] as f32 / 255.0,
                    px.0[3] as f32 / 255.0,
                ]
            })
            .collect();
        Self {
            width: image.width().max(1),
            height: image.height().max(1),
            pixels,
        }
    }

    /// Converts to 8-bit RGBA for encoding; channels are clamped to `[0, 1]`,
    /// discarding any blending overshoot that survived to the final color.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.width, self.height);
        for (pixel, raw) in out.pixels_mut().zip(&self.pixels) {
            pixel.0 = raw.map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
        out
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [[f32; 4]] {
        &mut self.pixels
    }

    /// Flat f32 view of the plane, used by the blending path.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Mutable flat f32 view of the plane.
    pub fn as_flat_mut(&mut self) -> &mut [f32] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }

    /// Texel fetch with clamp-to-edge semantics.
    pub fn texel(&self, x: i64, y: i64) -> Vec4 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        Vec4::from_array(self.pixels[y * self.width as usize + x])
    }
}

/// Nearest-neighbor point sampler over a pixmap.
///
/// Out-of-bounds coordinates clamp to the nearest edge texel: the distortion
/// effects leave displacement magnitudes unclamped, and indexing past the
/// plane would abort the render rather than produce a soft artifact.
#[derive(Debug, Clone, Copy)]
pub struct PixmapSampler<'a> {
    pixmap: &'a Pixmap,
}

impl<'a> PixmapSampler<'a> {
    pub fn new(pixmap: &'a Pixmap) -> Self {
        Self { pixmap }
    }
}

impl ImageSampler for PixmapSampler<'_> {
    fn sample(&self, position: Vec2) -> Vec4 {
        self.pixmap
            .texel(position.x.floor() as i64, position.y.floor() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_rgba8() {
        let mut pixmap = Pixmap::new(4, 2);
        pixmap.pixels_mut()[5] = [1.0, 0.5, 0.25, 1.0];
        let image = pixmap.to_rgba_image();
        let back = Pixmap::from_rgba_image(&image);
        let restored = back.pixels()[5];
        assert_eq!(restored[0], 1.0);
        assert!((restored[1] - 0.5).abs() < 1.0 / 255.0);
        assert!((restored[2] - 0.25).abs() < 1.0 / 255.0);
    }

    #[test]
    fn encoding_clamps_overshoot() {
        let mut pixmap = Pixmap::new(1, 1);
        pixmap.pixels_mut()[0] = [1.7, -0.3, 0.5, 1.0];
        let image = pixmap.to_rgba_image();
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 128, 255]);
    }

    #[test]
    fn sampler_clamps_to_edges() {
        let mut pixmap = Pixmap::new(2, 2);
        pixmap.pixels_mut()[0] = [1.0, 0.0, 0.0, 1.0];
        pixmap.pixels_mut()[3] = [0.0, 1.0, 0.0, 1.0];
        let sampler = PixmapSampler::new(&pixmap);
        assert_eq!(
            sampler.sample(Vec2::new(-50.0, -50.0)),
            Vec4::new(1.0, 0.0, 0.0, 1.0)
        );
        assert_eq!(
            sampler.sample(Vec2::new(900.0, 900.0)),
            Vec4::new(0.0, 1.0, 0.0, 1.0)
        );
    }

    #[test]
    fn flat_views_cover_the_whole_plane() {
        let pixmap = Pixmap::solid(3, 3, Vec4::splat(0.5));
        assert_eq!(pixmap.as_flat().len(), 3 * 3 * 4);
        assert!(pixmap.as_flat().iter().all(|&v| v == 0.5));
    }
}
