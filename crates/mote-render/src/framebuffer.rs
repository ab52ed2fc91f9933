//! In-memory RGBA surface

use crate::sprite::DotSprite;
use crate::surface::{check_dimensions, RenderError, Surface};
use bytemuck::{Pod, Zeroable};

/// One straight-alpha RGBA pixel, laid out as four bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    /// Source-over blend of `color` at `alpha` (0..=1) onto `self`
    fn blend(self, color: Rgba8, alpha: f32) -> Self {
        let src_a = alpha * color.a as f32 / 255.0;
        let dst_a = self.a as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let channel = |s: u8, d: u8| {
            let v = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: channel(color.r, self.r),
            g: channel(color.g, self.g),
            b: channel(color.b, self.b),
            a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}

/// Software render target: clears, stamps sprites with source-over
/// blending, and hands out its pixels.
#[derive(Debug, Clone, Default)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
    color: Rgba8,
    frames_presented: u64,
}

impl Framebuffer {
    /// Unconfigured framebuffer drawing white dots
    pub fn new() -> Self {
        Self::with_color(Rgba8::WHITE)
    }

    pub fn with_color(color: Rgba8) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Surface for Framebuffer {
    fn configure(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize), Rgba8::TRANSPARENT);
        log::debug!("Framebuffer configured at {width}x{height}");
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba8::TRANSPARENT);
    }

    fn stamp(&mut self, sprite: &DotSprite, x: f32, y: f32, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 || !x.is_finite() || !y.is_finite() {
            return;
        }
        let left = x.round() as i64;
        let top = y.round() as i64;
        let size = sprite.size() as i64;
        let (w, h) = (self.width as i64, self.height as i64);

        for sy in 0..size {
            let py = top + sy;
            if py < 0 || py >= h {
                continue;
            }
            for sx in 0..size {
                let px = left + sx;
                if px < 0 || px >= w {
                    continue;
                }
                let cov = sprite.coverage_at(sx as u32, sy as u32);
                if cov == 0 {
                    continue;
                }
                let idx = (py * w + px) as usize;
                let alpha = opacity * cov as f32 / 255.0;
                self.pixels[idx] = self.pixels[idx].blend(self.color, alpha);
            }
        }
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_layout_is_four_bytes() {
        assert_eq!(std::mem::size_of::<Rgba8>(), 4);
        let mut fb = Framebuffer::new();
        fb.configure(3, 2).unwrap();
        assert_eq!(fb.as_bytes().len(), 24);
    }

    #[test]
    fn test_rejects_unsupported_sizes() {
        let mut fb = Framebuffer::new();
        assert!(fb.configure(0, 100).is_err());
        assert!(fb.configure(100, 20_000).is_err());
        assert_eq!(fb.size(), (0, 0));
    }

    #[test]
    fn test_stamp_blends_and_clips() {
        let mut fb = Framebuffer::new();
        fb.configure(10, 10).unwrap();
        let sprite = DotSprite::new(1.25, 1.0);
        fb.stamp(&sprite, 2.0, 2.0, 0.9);
        let centre = fb.pixel(5, 5).unwrap();
        assert_eq!(centre.r, 255);
        assert!((229..=230).contains(&centre.a));

        // Partially off-canvas stamps are clipped, not dropped
        fb.clear();
        fb.stamp(&sprite, -3.0, -3.0, 1.0);
        assert!(fb.pixels().iter().any(|p| p.a > 0));
        fb.stamp(&sprite, 500.0, 500.0, 1.0);
        fb.stamp(&sprite, f32::NAN, 1.0, 1.0);
    }

    #[test]
    fn test_overlapping_stamps_accumulate_alpha() {
        let mut fb = Framebuffer::new();
        fb.configure(8, 8).unwrap();
        let sprite = DotSprite::new(1.25, 1.0);
        fb.stamp(&sprite, 1.0, 1.0, 0.5);
        let once = fb.pixel(4, 4).unwrap().a;
        fb.stamp(&sprite, 1.0, 1.0, 0.5);
        let twice = fb.pixel(4, 4).unwrap().a;
        assert!(twice > once);
    }
}
