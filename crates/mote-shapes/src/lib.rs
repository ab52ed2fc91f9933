//! Mote Shapes - Silhouette point clouds with exact particle budgets
//!
//! Every generator turns a declarative description of an icon or letterform
//! (lines, circles, rounded rectangles, arcs) into exactly
//! `particle_count` target points:
//! - `raster`: primitive rasterization with simulated stroke thickness
//! - `budget`: jitter, exact-count resampling, densification, budget splits
//! - one module per silhouette, dispatched by [`generate`]
//! - `TargetCache`: memoized target sets keyed by shape, budget and canvas

pub mod branch;
pub mod briefcase;
pub mod budget;
pub mod cache;
pub mod education;
pub mod gear;
pub mod kanban;
pub mod letter;
pub mod raster;

use mote_core::{Point, ShapeKey, ShapeStyles};
use rand::Rng;

pub use branch::generate_branch_history;
pub use budget::{densify, exact_count, jitter, split_budget, Part};
pub use cache::TargetCache;

/// Canvas size and particle budget shared by every generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeConfig {
    pub box_width: f32,
    pub box_height: f32,
    pub particle_count: usize,
}

impl ShapeConfig {
    pub fn new(box_width: f32, box_height: f32, particle_count: usize) -> Self {
        Self {
            box_width,
            box_height,
            particle_count,
        }
    }

    /// Reference size all icon geometry scales with
    pub fn scale(&self) -> f32 {
        self.box_width.min(self.box_height).max(0.0)
    }

    /// `scale / 520`, the ratio icon strokes were tuned at
    pub fn stroke_scale(&self) -> f32 {
        self.scale() / 520.0
    }
}

/// Generate the target point set for `key`. The result always holds exactly
/// `cfg.particle_count` points.
pub fn generate<R: Rng + ?Sized>(
    key: ShapeKey,
    cfg: &ShapeConfig,
    styles: &ShapeStyles,
    rng: &mut R,
) -> Vec<Point> {
    if cfg.particle_count == 0 {
        return Vec::new();
    }
    match key {
        ShapeKey::Letter => letter::generate_letter(cfg, rng),
        ShapeKey::Branch => branch::generate_branch_logo(cfg, &styles.branch, rng),
        ShapeKey::Briefcase => briefcase::generate_briefcase(cfg, rng),
        ShapeKey::Kanban => kanban::generate_kanban(cfg, rng),
        ShapeKey::Education => education::generate_education(cfg, styles.education, rng),
        ShapeKey::Gear => gear::generate_gear(cfg, &styles.gear, rng),
    }
}
