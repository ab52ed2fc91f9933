//! Briefcase icon: rounded body, rounded handle, latch strap and clasp.

use crate::budget::{assemble, densified_parts, Part};
use crate::raster::{rasterize_horizontal, rasterize_rounded_rect, rasterize_vertical};
use crate::ShapeConfig;
use mote_core::{Point, Rect};
use rand::Rng;

pub fn generate_briefcase<R: Rng + ?Sized>(cfg: &ShapeConfig, rng: &mut R) -> Vec<Point> {
    let s = cfg.scale();
    let scale = (s * 0.8 / 520.0).min(1.0);
    let cx = cfg.box_width * 0.52;
    let cy = cfg.box_height * 0.5;

    let stroke = (8.0 * scale).floor().max(3.0);
    let detail_stroke = (stroke - 2.0).max(2.0);
    let base_step = (4.0 * scale).floor().max(2.0);

    let (bw, bh) = (0.56 * s, 0.34 * s);
    let body = Rect::new(cx - bw / 2.0, cy - bh / 2.0 + 0.04 * s, bw, bh);
    let (hw, hh) = (0.22 * s, 0.08 * s);
    let handle = Rect::new(cx - hw / 2.0, body.y - hh + 0.02 * s, hw, hh);
    let latch_y = body.y + bh * 0.45;

    let parts = densified_parts(base_step, cfg.particle_count, |step| {
        let mut case = Part::new(0.7);
        let mut grip = Part::new(0.7);
        let mut detail = Part::new(0.6);
        rasterize_rounded_rect(&mut case.points, body, step, stroke, 0.05 * s);
        rasterize_rounded_rect(&mut grip.points, handle, step, stroke, 0.03 * s);
        rasterize_horizontal(
            &mut detail.points,
            latch_y,
            body.x + bw * 0.12,
            body.x + bw * 0.88,
            step,
            detail_stroke,
        );
        rasterize_vertical(
            &mut detail.points,
            cx,
            latch_y - 0.02 * s,
            latch_y + 0.02 * s,
            step,
            detail_stroke,
        );
        vec![case, grip, detail]
    });

    assemble(parts, cfg.particle_count, rng)
}
