//! Pre-rendered dot sprite

/// Anti-aliased filled disc, stored as an alpha coverage mask.
///
/// Radius is `max(1, ceil(dot_size * pixel_ratio))` device pixels and the
/// mask is `2 * radius + 2` pixels square. Particles are drawn with the
/// sprite centered on their position, `draw_offset` canvas pixels up and
/// left of it.
#[derive(Debug, Clone, PartialEq)]
pub struct DotSprite {
    size: u32,
    radius: u32,
    pixel_ratio: f32,
    coverage: Vec<u8>,
}

impl DotSprite {
    pub fn new(dot_size: f32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        let r = (dot_size * pixel_ratio).ceil();
        let radius = if r.is_finite() { (r as u32).max(1) } else { 1 };
        let size = radius * 2 + 2;
        let center = size as f32 * 0.5;

        let mut coverage = Vec::with_capacity((size * size) as usize);
        for py in 0..size {
            for px in 0..size {
                let dx = px as f32 + 0.5 - center;
                let dy = py as f32 + 0.5 - center;
                let d = (dx * dx + dy * dy).sqrt();
                let a = (radius as f32 + 0.5 - d).clamp(0.0, 1.0);
                coverage.push((a * 255.0).round() as u8);
            }
        }

        Self {
            size,
            radius,
            pixel_ratio,
            coverage,
        }
    }

    /// Side length in device pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Distance in canvas pixels from a particle to the sprite's top-left
    pub fn draw_offset(&self) -> f32 {
        self.size as f32 * 0.5 / self.pixel_ratio
    }

    /// Coverage rows, `size` bytes each
    pub fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.size + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dot_geometry() {
        let sprite = DotSprite::new(1.25, 1.0);
        assert_eq!(sprite.radius(), 2);
        assert_eq!(sprite.size(), 6);
        assert_eq!(sprite.draw_offset(), 3.0);
        assert_eq!(sprite.coverage().len(), 36);
    }

    #[test]
    fn test_scales_with_pixel_ratio() {
        let sprite = DotSprite::new(1.25, 2.0);
        assert_eq!(sprite.radius(), 3);
        assert_eq!(sprite.size(), 8);
        assert_eq!(sprite.draw_offset(), 2.0);
    }

    #[test]
    fn test_tiny_dots_keep_one_pixel_radius() {
        let sprite = DotSprite::new(0.0, 1.0);
        assert_eq!(sprite.radius(), 1);
        assert_eq!(sprite.size(), 4);
    }

    #[test]
    fn test_center_opaque_corners_clear() {
        let sprite = DotSprite::new(3.0, 1.0);
        let mid = sprite.size() / 2;
        assert_eq!(sprite.coverage_at(mid, mid), 255);
        assert_eq!(sprite.coverage_at(0, 0), 0);
    }
}
