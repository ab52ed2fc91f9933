//! Kanban board icon: rounded frame, two column separators and a 3×2 grid
//! of rounded cards.

use crate::budget::{assemble, densified_parts, Part};
use crate::raster::{rasterize_rounded_rect, rasterize_vertical};
use crate::ShapeConfig;
use mote_core::{Point, Rect};
use rand::Rng;

const COLUMNS: usize = 3;

pub fn generate_kanban<R: Rng + ?Sized>(cfg: &ShapeConfig, rng: &mut R) -> Vec<Point> {
    let s = cfg.scale();
    let scale = (s * 0.9 / 520.0).min(1.0);
    let cx = cfg.box_width * 0.52;
    let cy = cfg.box_height * 0.5;

    let (bw, bh) = (0.70 * s, 0.42 * s);
    let board = Rect::centered(Point::new(cx, cy), bw, bh);
    let gap = 0.02 * s;
    let col_w = (bw - 2.0 * gap) / COLUMNS as f32;

    let stroke = (7.0 * scale).floor().max(3.0);
    let thin = (stroke - 2.0).max(2.0);
    let base_step = (4.0 * scale).floor().max(2.0);

    let mut cards = Vec::with_capacity(COLUMNS * 2);
    for c in 0..COLUMNS {
        let gx = board.x + c as f32 * (col_w + gap) + 0.04 * s;
        for top in [0.07 * s, 0.22 * s] {
            cards.push(Rect::new(gx, board.y + top, col_w - 0.08 * s, 0.11 * s));
        }
    }

    let parts = densified_parts(base_step, cfg.particle_count, |step| {
        let mut frame = Part::new(0.7);
        let mut separators = Part::new(0.6);
        let mut grid = Part::new(0.6);
        rasterize_rounded_rect(&mut frame.points, board, step, stroke, 0.04 * s);
        for k in 1..COLUMNS {
            let x = board.x + k as f32 * (col_w + gap);
            rasterize_vertical(&mut separators.points, x, board.y + 8.0, board.bottom() - 8.0, step, thin);
        }
        for card in &cards {
            rasterize_rounded_rect(&mut grid.points, *card, step, thin, 0.025 * s);
        }
        vec![frame, separators, grid]
    });

    assemble(parts, cfg.particle_count, rng)
}
