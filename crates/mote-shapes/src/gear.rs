//! Skills icons: a toothed gear or a `< >` code-bracket pair.

use crate::budget::{assemble_quotas, biased_shares, densified_parts, exact_count, jitter, Part};
use crate::raster::{rasterize_arc, rasterize_circle, rasterize_line};
use crate::ShapeConfig;
use mote_core::{GearStyle, Point, SkillsStyle};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

const MIN_TEETH: u32 = 3;
const MAX_TEETH: u32 = 64;

/// Rim, then hub
const GEAR_BIAS: [f32; 2] = [1.1, 0.9];
const RIM: usize = 0;

/// Dispatch on the configured skills style
pub fn generate_gear<R: Rng + ?Sized>(
    cfg: &ShapeConfig,
    style: &GearStyle,
    rng: &mut R,
) -> Vec<Point> {
    match style.variant {
        SkillsStyle::Gear => generate_toothed_gear(cfg, style.teeth, rng),
        SkillsStyle::Brackets => generate_brackets(cfg, rng),
    }
}

/// Gear with `teeth` teeth (clamped to 3..=64): a rim of root arcs, flanks
/// and tip arcs around a hub ring and an axle ring
pub fn generate_toothed_gear<R: Rng + ?Sized>(
    cfg: &ShapeConfig,
    teeth: u32,
    rng: &mut R,
) -> Vec<Point> {
    let s = cfg.scale();
    let center = Point::new(cfg.box_width * 0.52, cfg.box_height * 0.5);
    let r_out = 0.30 * s;
    let r_root = 0.24 * s;
    let r_hub = 0.11 * s;
    let r_axle = 0.045 * s;

    let teeth = teeth.clamp(MIN_TEETH, MAX_TEETH);
    let pitch = TAU / teeth as f32;
    let stroke = (7.0 * cfg.stroke_scale()).floor().max(3.0);
    let thin = (stroke - 2.0).max(2.0);
    let base_step = (4.0 * cfg.stroke_scale()).floor().max(2.0);

    let parts = densified_parts(base_step, cfg.particle_count, |step| {
        let mut rim = Part::new(0.6);
        let mut hub = Part::new(0.6);
        for k in 0..teeth {
            let theta = k as f32 * pitch - FRAC_PI_2;
            let at = |r: f32, da: f32| Point::from_polar(center, r, theta + da * pitch);
            rasterize_arc(
                &mut rim.points,
                center,
                r_out,
                theta - 0.18 * pitch,
                theta + 0.18 * pitch,
                step,
                stroke,
            );
            rasterize_line(&mut rim.points, at(r_root, -0.25), at(r_out, -0.18), step, stroke);
            rasterize_line(&mut rim.points, at(r_out, 0.18), at(r_root, 0.25), step, stroke);
            rasterize_arc(
                &mut rim.points,
                center,
                r_root,
                theta + 0.25 * pitch,
                theta + 0.75 * pitch,
                step,
                stroke,
            );
        }
        rasterize_circle(&mut hub.points, center, r_hub, step, stroke);
        rasterize_circle(&mut hub.points, center, r_axle, step, thin);
        vec![rim, hub]
    });

    let shares = biased_shares(&parts, &GEAR_BIAS);
    assemble_quotas(parts, &shares, RIM, cfg.particle_count, rng)
}

/// A `<` and a `>` facing each other across the canvas center
pub fn generate_brackets<R: Rng + ?Sized>(cfg: &ShapeConfig, rng: &mut R) -> Vec<Point> {
    let s = cfg.scale();
    let stroke = (4.0 * cfg.stroke_scale()).floor().max(2.0);
    let base_step = (3.0 * cfg.stroke_scale()).floor().max(2.0);
    let cx = cfg.box_width * 0.5;
    let cy = cfg.box_height * 0.5;
    let size = 0.25 * s;
    let spacing = 0.25 * s;

    let parts = densified_parts(base_step, cfg.particle_count, |step| {
        let mut part = Part::new(0.3);
        // `<` points left, `>` points right
        for (tip_x, dir) in [(cx - spacing / 2.0, 1.0), (cx + spacing / 2.0, -1.0)] {
            let tip = Point::new(tip_x, cy);
            let arm_x = tip_x + dir * size * 0.4;
            rasterize_line(&mut part.points, Point::new(arm_x, cy - size * 0.3), tip, step, stroke);
            rasterize_line(&mut part.points, tip, Point::new(arm_x, cy + size * 0.3), step, stroke);
        }
        vec![part]
    });

    let mut points: Vec<Point> = parts.into_iter().flat_map(|p| p.points).collect();
    jitter(&mut points, 0.3, rng);
    exact_count(points, cfg.particle_count, 0.7, rng)
}
