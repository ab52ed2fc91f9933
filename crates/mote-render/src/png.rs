//! PNG frame sequence output

use crate::framebuffer::Framebuffer;
use crate::sprite::DotSprite;
use crate::surface::{RenderError, Surface};
use std::path::{Path, PathBuf};

/// A [`Framebuffer`] that writes presented frames to `frame_NNNNN.png` files
/// in a directory. With a stride of `n` only every n-th frame is written.
#[derive(Debug)]
pub struct PngSequence {
    framebuffer: Framebuffer,
    dir: PathBuf,
    stride: u64,
    presented: u64,
    written: Vec<PathBuf>,
}

impl PngSequence {
    /// Create the output directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, RenderError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            framebuffer: Framebuffer::new(),
            dir,
            stride: 1,
            presented: 0,
            written: Vec::new(),
        })
    }

    pub fn with_stride(mut self, stride: u64) -> Self {
        self.stride = stride.max(1);
        self
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Paths written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write_frame(&mut self) -> Result<(), RenderError> {
        let (width, height) = self.framebuffer.size();
        let path = self.dir.join(format!("frame_{:05}.png", self.written.len()));
        image::save_buffer(
            &path,
            self.framebuffer.as_bytes(),
            width,
            height,
            image::ExtendedColorType::Rgba8,
        )?;
        log::debug!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

impl Surface for PngSequence {
    fn configure(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.framebuffer.configure(width, height)
    }

    fn size(&self) -> (u32, u32) {
        self.framebuffer.size()
    }

    fn clear(&mut self) {
        self.framebuffer.clear();
    }

    fn stamp(&mut self, sprite: &DotSprite, x: f32, y: f32, opacity: f32) {
        self.framebuffer.stamp(sprite, x, y, opacity);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.framebuffer.present()?;
        let due = self.presented % self.stride == 0;
        self.presented += 1;
        if due {
            self.write_frame()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_decodable_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut seq = PngSequence::new(dir.path().join("frames")).unwrap();
        seq.configure(32, 16).unwrap();
        let sprite = DotSprite::new(2.0, 1.0);
        seq.clear();
        seq.stamp(&sprite, 10.0, 4.0, 1.0);
        seq.present().unwrap();

        assert_eq!(seq.written().len(), 1);
        let img = image::open(&seq.written()[0]).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (32, 16));
        assert!(img.pixels().any(|p| p.0[3] > 0));
    }

    #[test]
    fn test_stride_skips_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut seq = PngSequence::new(dir.path()).unwrap().with_stride(3);
        seq.configure(4, 4).unwrap();
        for _ in 0..7 {
            seq.present().unwrap();
        }
        assert_eq!(seq.written().len(), 3);
        assert!(seq.written()[2].ends_with("frame_00002.png"));
        assert_eq!(seq.framebuffer().frames_presented(), 7);
    }
}
