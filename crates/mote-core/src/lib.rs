//! Mote Core - Foundational types for the Mote particle engine
//!
//! This crate provides the types that all other Mote crates depend on:
//! - `Point`, `Rect` - Canvas-space geometry
//! - `ShapeKey`, `HoverFlags` - The closed set of silhouettes and hover resolution
//! - `SimConfig`, `PhysicsConfig`, `ShapeStyles` - Configuration loaded from TOML
//! - Error types and Result alias

mod config;
mod error;
mod shape;
mod style;
mod types;

pub use config::{PhysicsConfig, SimConfig};
pub use error::{MoteError, Result};
pub use shape::{HoverFlags, ShapeKey};
pub use style::{
    BranchHistoryStyle, BranchLogoStyle, BranchSide, BranchSpec, EducationStyle, GearStyle,
    ShapeStyles, SkillsStyle, MAX_COMMITS,
};
pub use types::{Point, Rect};
