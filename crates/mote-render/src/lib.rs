//! Mote Render - Drawing particles as pre-rendered dot sprites
//!
//! The simulation draws through the [`Surface`] trait:
//! - `DotSprite`: anti-aliased white disc rasterized once per pixel ratio
//! - `Framebuffer`: in-memory RGBA surface with source-over blending
//! - `PngSequence`: framebuffer that writes every presented frame as a PNG

pub mod framebuffer;
pub mod png;
pub mod sprite;
pub mod surface;

pub use framebuffer::{Framebuffer, Rgba8};
pub use png::PngSequence;
pub use sprite::DotSprite;
pub use surface::{RenderError, Surface, MAX_SURFACE_DIMENSION};
