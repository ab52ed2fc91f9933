//! Render target abstraction

use crate::sprite::DotSprite;
use thiserror::Error;

/// Largest pixel size accepted per side
pub const MAX_SURFACE_DIMENSION: u32 = 16_384;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported surface size {width}x{height}")]
    UnsupportedSurface { width: u32, height: u32 },
    #[error("Failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check a pixel size against the supported range
pub fn check_dimensions(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 || width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
        return Err(RenderError::UnsupportedSurface { width, height });
    }
    Ok(())
}

/// A 2D pixel target the simulation draws into once per frame.
///
/// Coordinates passed to [`Surface::stamp`] are device pixels.
pub trait Surface {
    /// (Re)allocate the backing store at `width × height` device pixels
    fn configure(&mut self, width: u32, height: u32) -> Result<(), RenderError>;

    fn size(&self) -> (u32, u32);

    /// Clear to fully transparent
    fn clear(&mut self);

    /// Blend `sprite` with its top-left corner at device pixel `(x, y)`
    fn stamp(&mut self, sprite: &DotSprite, x: f32, y: f32, opacity: f32);

    /// Finish the frame
    fn present(&mut self) -> Result<(), RenderError>;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn configure(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        (**self).configure(width, height)
    }

    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn stamp(&mut self, sprite: &DotSprite, x: f32, y: f32, opacity: f32) {
        (**self).stamp(sprite, x, y, opacity)
    }

    fn present(&mut self) -> Result<(), RenderError> {
        (**self).present()
    }
}
