//! Two-letter monogram: a dotted `i` stem beside an `n` whose top bar turns
//! into the right stem through a rounded corner.

use crate::budget::{
    assemble_quotas, biased_shares, density_factor, density_factor_cbrt, densify, Part,
};
use crate::raster::{rasterize_arc, rasterize_circle, rasterize_horizontal, rasterize_vertical};
use crate::ShapeConfig;
use mote_core::Point;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

const STEP_N: f32 = 4.0;
const STEP_I: f32 = 6.0;
const STEP_DOT: f32 = 6.0;

/// Part order: dot, i stem, n left stem, n right stem, arch
const BIAS: [f32; 5] = [0.85, 0.95, 1.05, 1.0, 1.15];
const ARCH: usize = 4;

struct Layout {
    letter_h: f32,
    baseline: f32,
    start_x: f32,
    stroke_n: f32,
    stroke_i: f32,
}

impl Layout {
    fn new(cfg: &ShapeConfig) -> Self {
        let letter_h = (cfg.box_height * 0.62).clamp(200.0, 480.0);
        let stroke_n = (letter_h * 0.11).floor().max(4.0);
        Self {
            letter_h,
            baseline: cfg.box_height * 0.5 + letter_h * 0.40,
            start_x: cfg.box_width * 0.52 - letter_h * 0.94 * 0.5,
            stroke_n,
            stroke_i: (stroke_n * 0.78).floor().max(3.0),
        }
    }

    fn build(&self, step_n: f32, step_i: f32, step_dot: f32) -> Vec<Part> {
        let lh = self.letter_h;
        let mut dot = Part::new(0.8);
        let mut i = Part::new(0.8);
        let mut left = Part::new(0.6);
        let mut right = Part::new(0.6);
        let mut arch = Part::new(0.6);

        let i_x = self.start_x;
        let i_top = self.baseline - lh * 0.80;
        let dot_r = (lh * 0.11).floor().max(9.0);
        rasterize_vertical(&mut i.points, i_x, i_top, self.baseline, step_i, self.stroke_i);
        rasterize_circle(
            &mut dot.points,
            Point::new(i_x, i_top - dot_r * 2.1),
            dot_r,
            step_dot,
            (self.stroke_i * 0.8).floor().max(2.0),
        );

        let gap = (lh * 0.10).floor().max(22.0);
        let n_left = i_x + self.stroke_i + gap;
        let n_right = n_left + (lh * 0.46).max(90.0);
        let n_top = self.baseline - lh * 0.76;
        let y_end = self.baseline - lh * 0.20;
        let corner = (lh * 0.04).max(6.0);
        let s = self.stroke_n;

        rasterize_vertical(&mut left.points, n_left, n_top, self.baseline, step_n, s);
        rasterize_vertical(&mut right.points, n_right, n_top + lh * 0.18, self.baseline, step_n, s);

        rasterize_horizontal(&mut arch.points, n_top, n_left, n_right - corner, step_n, s);
        rasterize_arc(
            &mut arch.points,
            Point::new(n_right - corner, n_top + corner),
            corner,
            -FRAC_PI_2,
            0.0,
            step_n,
            s,
        );
        rasterize_vertical(&mut arch.points, n_right, n_top + corner, y_end, step_n, s);

        vec![dot, i, left, right, arch]
    }
}

/// Monogram targets with exactly `cfg.particle_count` points
pub fn generate_letter<R: Rng + ?Sized>(cfg: &ShapeConfig, rng: &mut R) -> Vec<Point> {
    let budget = cfg.particle_count;
    let layout = Layout::new(cfg);

    let draft = layout.build(STEP_N, STEP_I, STEP_DOT);
    let raw: usize = draft.iter().map(|p| p.points.len()).sum();
    let factor = density_factor(budget, raw);
    // The dot only grows by the cube root so it does not swamp the stems
    let parts = layout.build(
        densify(STEP_N, factor),
        densify(STEP_I, factor),
        densify(STEP_DOT, density_factor_cbrt(budget, raw)),
    );

    let shares = biased_shares(&parts, &BIAS);
    assemble_quotas(parts, &shares, ARCH, budget, rng)
}
