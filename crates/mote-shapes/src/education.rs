//! Education icons: a mortarboard cap or a diploma sheet.

use crate::budget::{assemble, densified_parts, exact_count, jitter, Part};
use crate::raster::{
    rasterize_circle, rasterize_horizontal, rasterize_line_min, rasterize_rounded_rect,
    rasterize_vertical, MIN_ARC_SAMPLES,
};
use crate::ShapeConfig;
use mote_core::{EducationStyle, Point, Rect};
use rand::Rng;

/// Dispatch on the configured education style
pub fn generate_education<R: Rng + ?Sized>(
    cfg: &ShapeConfig,
    style: EducationStyle,
    rng: &mut R,
) -> Vec<Point> {
    match style {
        EducationStyle::Cap => generate_cap(cfg, rng),
        EducationStyle::Diploma => generate_diploma(cfg, rng),
    }
}

/// Mortarboard: diamond top, a brim strip just below center and a tassel
/// hanging from the right corner with a knob
pub fn generate_cap<R: Rng + ?Sized>(cfg: &ShapeConfig, rng: &mut R) -> Vec<Point> {
    let s = cfg.scale();
    let center = Point::new(cfg.box_width * 0.52, cfg.box_height * 0.5);
    let half_diag = 0.48 * s;
    let brim = 0.26 * s;
    let tassel_len = 0.26 * s;
    let knob_r = 0.02 * s;

    let stroke = (7.0 * cfg.stroke_scale()).floor().max(3.0);
    let thin = (stroke - 2.0).max(2.0);
    let base_step = (4.0 * cfg.stroke_scale()).floor().max(2.0);

    let top = Point::new(center.x, center.y - half_diag);
    let right = Point::new(center.x + half_diag, center.y);
    let bottom = Point::new(center.x, center.y + half_diag);
    let left = Point::new(center.x - half_diag, center.y);
    let brim_y = center.y + half_diag * 0.12;

    let parts = densified_parts(base_step, cfg.particle_count, |step| {
        let mut diamond = Part::new(0.7);
        let mut strip = Part::new(0.6);
        let mut tassel = Part::new(0.6);
        for (p, q) in [(top, right), (right, bottom), (bottom, left), (left, top)] {
            rasterize_line_min(&mut diamond.points, p, q, step, stroke, MIN_ARC_SAMPLES);
        }
        rasterize_horizontal(&mut strip.points, brim_y, center.x - brim, center.x + brim, step, thin);
        rasterize_circle(&mut tassel.points, right, knob_r, step, thin);
        rasterize_vertical(&mut tassel.points, right.x, right.y + knob_r, right.y + tassel_len, step, thin);
        vec![diamond, strip, tassel]
    });

    assemble(parts, cfg.particle_count, rng)
}

/// Bordered sheet with five text lines (the second and fourth drawn twice
/// over 70% of their length) and a double-ringed seal in the lower right
pub fn generate_diploma<R: Rng + ?Sized>(cfg: &ShapeConfig, rng: &mut R) -> Vec<Point> {
    let s = cfg.scale();
    let stroke = (4.0 * cfg.stroke_scale()).floor().max(2.0);
    let base_step = (3.0 * cfg.stroke_scale()).floor().max(2.0);

    let dw = 0.7 * s;
    let dh = dw * 0.8;
    let sheet = Rect::centered(Point::new(cfg.box_width * 0.5, cfg.box_height * 0.5), dw, dh);
    let line_stroke = (stroke - 1.0).max(1.0);
    let line_x1 = sheet.x + dw * 0.15;
    let line_x2 = sheet.x + dw * 0.85;
    let seal = Point::new(sheet.x + dw * 0.8, sheet.y + dh * 0.75);
    let seal_r = dw * 0.08;

    let parts = densified_parts(base_step, cfg.particle_count, |step| {
        let mut part = Part::new(0.3);
        let pts = &mut part.points;
        rasterize_rounded_rect(pts, sheet, step, stroke, 0.0);
        for i in 0..5 {
            let y = sheet.y + dh * 0.2 + i as f32 * dh * 0.12;
            rasterize_horizontal(pts, y, line_x1, line_x2, step, line_stroke);
            if i == 1 || i == 3 {
                let short = line_x1 + (line_x2 - line_x1) * 0.7;
                rasterize_horizontal(pts, y, line_x1, short, step, line_stroke);
            }
        }
        rasterize_circle(pts, seal, seal_r, step, line_stroke);
        rasterize_circle(pts, seal, seal_r * 0.6, step, (stroke - 2.0).max(1.0));
        vec![part]
    });

    let mut points: Vec<Point> = parts.into_iter().flat_map(|p| p.points).collect();
    jitter(&mut points, 0.3, rng);
    exact_count(points, cfg.particle_count, 0.7, rng)
}
