//! Rasterization of geometric primitives into point clouds
//!
//! `step` is the sampling stride along a primitive and `stroke` its
//! thickness. Thickness is simulated by emitting parallel offset copies of
//! every sample along one axis per primitive type: horizontal runs thicken
//! vertically, vertical runs horizontally, circles radially, and arcs and
//! diagonal lines vertically.
//!
//! Sampling always walks integer sample indices, so degenerate or huge
//! geometry cannot loop forever.

use mote_core::{Point, Rect};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Upper bound on samples emitted along a single primitive
const MAX_SAMPLES: usize = 1 << 16;
/// Minimum samples per straight segment
pub const MIN_LINE_SAMPLES: usize = 2;
/// Minimum samples around a full circle
pub const MIN_CIRCLE_SAMPLES: usize = 20;
/// Minimum samples along an arc
pub const MIN_ARC_SAMPLES: usize = 8;

fn sample_count(length: f32, step: f32) -> usize {
    let n = (length / step.max(1.0)).floor();
    if n.is_finite() && n > 0.0 {
        (n as usize).min(MAX_SAMPLES)
    } else {
        0
    }
}

/// Offsets across the stroke: `-floor(stroke/2) ..= floor(stroke/2)` by `step`
fn stroke_offsets(stroke: f32, step: f32) -> impl Iterator<Item = f32> {
    let half = (stroke * 0.5).floor();
    let half = if half.is_finite() { half.max(0.0) } else { 0.0 };
    let step = step.max(1.0);
    let n = sample_count(2.0 * half, step);
    (0..=n).map(move |i| -half + i as f32 * step)
}

/// Positions from `min(a, b)` to at most `max(a, b)` by `step`
fn span(a: f32, b: f32, step: f32) -> impl Iterator<Item = f32> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let step = step.max(1.0);
    let n = sample_count(hi - lo, step);
    (0..=n).map(move |i| lo + i as f32 * step)
}

/// Horizontal run at `y` from `x1` to `x2`, thickened vertically
pub fn rasterize_horizontal(out: &mut Vec<Point>, y: f32, x1: f32, x2: f32, step: f32, stroke: f32) {
    for x in span(x1, x2, step) {
        for t in stroke_offsets(stroke, step) {
            out.push(Point::new(x, y + t));
        }
    }
}

/// Vertical run at `x` from `y1` to `y2`, thickened horizontally
pub fn rasterize_vertical(out: &mut Vec<Point>, x: f32, y1: f32, y2: f32, step: f32, stroke: f32) {
    for y in span(y1, y2, step) {
        for t in stroke_offsets(stroke, step) {
            out.push(Point::new(x + t, y));
        }
    }
}

/// Straight segment `p → q` with at least [`MIN_LINE_SAMPLES`] samples
pub fn rasterize_line(out: &mut Vec<Point>, p: Point, q: Point, step: f32, stroke: f32) {
    rasterize_line_min(out, p, q, step, stroke, MIN_LINE_SAMPLES);
}

/// Straight segment with a caller-chosen minimum sample count
pub fn rasterize_line_min(
    out: &mut Vec<Point>,
    p: Point,
    q: Point,
    step: f32,
    stroke: f32,
    min_samples: usize,
) {
    let samples = sample_count(p.distance(q), step).max(min_samples.max(1));
    for i in 0..=samples {
        let c = p.lerp(q, i as f32 / samples as f32);
        for t in stroke_offsets(stroke, step) {
            out.push(Point::new(c.x, c.y + t));
        }
    }
}

/// Full circle outline, thickened radially
pub fn rasterize_circle(out: &mut Vec<Point>, center: Point, r: f32, step: f32, stroke: f32) {
    let samples = sample_count(TAU * r.abs(), step).max(MIN_CIRCLE_SAMPLES);
    for i in 0..samples {
        let a = i as f32 / samples as f32 * TAU;
        for t in stroke_offsets(stroke, step) {
            out.push(Point::from_polar(center, r + t, a));
        }
    }
}

/// Arc from `start` to `end` radians (inclusive), thickened vertically
pub fn rasterize_arc(
    out: &mut Vec<Point>,
    center: Point,
    r: f32,
    start: f32,
    end: f32,
    step: f32,
    stroke: f32,
) {
    let length = (r * (end - start)).abs();
    let samples = sample_count(length, step).max(MIN_ARC_SAMPLES);
    for i in 0..=samples {
        let a = start + (i as f32 / samples as f32) * (end - start);
        let c = Point::from_polar(center, r, a);
        for t in stroke_offsets(stroke, step) {
            out.push(Point::new(c.x, c.y + t));
        }
    }
}

/// Rectangle outline; `corner_radius > 0` shortens the sides and joins them
/// with quarter arcs
pub fn rasterize_rounded_rect(
    out: &mut Vec<Point>,
    rect: Rect,
    step: f32,
    stroke: f32,
    corner_radius: f32,
) {
    let Rect { x, y, w, h } = rect;
    let r = corner_radius.min(w.abs() * 0.5).min(h.abs() * 0.5);
    if r.is_nan() || r <= 0.0 {
        rasterize_horizontal(out, y, x, x + w, step, stroke);
        rasterize_horizontal(out, y + h, x, x + w, step, stroke);
        rasterize_vertical(out, x, y, y + h, step, stroke);
        rasterize_vertical(out, x + w, y, y + h, step, stroke);
        return;
    }

    let (x1, x2, y1, y2) = (x + r, x + w - r, y + r, y + h - r);
    rasterize_horizontal(out, y, x1, x2, step, stroke);
    rasterize_horizontal(out, y + h, x1, x2, step, stroke);
    rasterize_vertical(out, x, y1, y2, step, stroke);
    rasterize_vertical(out, x + w, y1, y2, step, stroke);
    rasterize_arc(out, Point::new(x1, y1), r, PI, PI + FRAC_PI_2, step, stroke);
    rasterize_arc(out, Point::new(x2, y1), r, PI + FRAC_PI_2, TAU, step, stroke);
    rasterize_arc(out, Point::new(x1, y2), r, FRAC_PI_2, PI, step, stroke);
    rasterize_arc(out, Point::new(x2, y2), r, 0.0, FRAC_PI_2, step, stroke);
}
