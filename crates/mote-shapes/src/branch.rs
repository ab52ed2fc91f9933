//! Branch-diagram silhouettes: the compact logo bound to the `Branch` hover
//! key and a full commit-history graph.

use crate::budget::{assemble_quotas, densified_parts, Part};
use crate::raster::{rasterize_circle, rasterize_horizontal, rasterize_line, rasterize_vertical};
use crate::ShapeConfig;
use mote_core::{BranchHistoryStyle, BranchLogoStyle, BranchSide, Point, MAX_COMMITS};
use rand::Rng;

const LOGO_JITTER: f32 = 0.3;
/// Trunk, diagonal branch, nodes
const LOGO_SHARES: [f32; 3] = [0.40, 0.22, 0.38];
const LOGO_TRUNK: usize = 0;

/// Vertical trunk with two commits, a 45° branch up and to the right, and a
/// commit node at the branch tip
pub fn generate_branch_logo<R: Rng + ?Sized>(
    cfg: &ShapeConfig,
    style: &BranchLogoStyle,
    rng: &mut R,
) -> Vec<Point> {
    let (w, h) = (cfg.box_width, cfg.box_height);
    let trunk_x = style.trunk_x.unwrap_or(w * 0.46);
    let cy = h * 0.5;
    let y_bottom = cy + h * 0.16;
    let y_mid = cy + h * 0.02;
    let y_top = cy - h * 0.18;
    let tip = Point::new(trunk_x + (w * 0.16).max(80.0), y_top);
    let node_stroke = (style.stroke * 0.7).floor().max(2.0);
    let line_base = style.step.max(1.0);
    let node_ratio = style.node_step.max(1.0) / line_base;

    let parts = densified_parts(line_base, cfg.particle_count, |step| {
        let node_step = (step * node_ratio).max(1.0);
        let mut trunk = Part::new(LOGO_JITTER);
        let mut branch = Part::new(LOGO_JITTER);
        let mut nodes = Part::new(LOGO_JITTER);
        rasterize_vertical(&mut trunk.points, trunk_x, y_bottom, y_top, step, style.stroke);
        rasterize_line(&mut branch.points, Point::new(trunk_x, y_mid), tip, step, style.stroke);
        for c in [Point::new(trunk_x, y_bottom), Point::new(trunk_x, y_mid), tip] {
            rasterize_circle(&mut nodes.points, c, style.node_radius, node_step, node_stroke);
        }
        vec![trunk, branch, nodes]
    });

    assemble_quotas(parts, &LOGO_SHARES, LOGO_TRUNK, cfg.particle_count, rng)
}

/// Full commit graph: a trunk of commits, branches forking at given commits
/// with optional merge polylines back into the trunk
pub fn generate_branch_history<R: Rng + ?Sized>(
    cfg: &ShapeConfig,
    style: &BranchHistoryStyle,
    rng: &mut R,
) -> Vec<Point> {
    let h = cfg.box_height;
    let commits = style.trunk_commits.clamp(1, MAX_COMMITS);
    let spacing = style
        .trunk_spacing
        .unwrap_or_else(|| (h * 0.07).floor().max(48.0));
    let trunk_x = style.trunk_x.unwrap_or(cfg.box_width * 0.45);
    let top_y = (h * 0.12).max(24.0);
    let trunk_ys: Vec<f32> = (0..commits).map(|i| top_y + i as f32 * spacing).collect();
    let trunk_y = |idx: usize| trunk_ys[idx.min(commits - 1)];

    let stroke = style.stroke;
    let node_stroke = (stroke * 0.6).floor().max(2.0);
    let branch_stroke = (stroke - 1.0).max(4.0);
    let merge_stroke = (stroke - 2.0).max(3.0);
    let step = style.step.max(1.0);
    let node_step = style.node_step.max(1.0);

    let mut trunk_line = Part::new(0.8);
    let mut trunk_nodes = Part::new(0.8);
    let mut branch_nodes = Part::new(0.8);
    let mut branch_lines = Part::new(0.8);
    let mut merge_lines = Part::new(0.8);

    rasterize_vertical(
        &mut trunk_line.points,
        trunk_x,
        trunk_y(0),
        trunk_y(commits - 1),
        step,
        stroke,
    );
    for &y in &trunk_ys {
        let c = Point::new(trunk_x, y);
        rasterize_circle(&mut trunk_nodes.points, c, style.node_radius, node_step, node_stroke);
    }

    for fork in &style.branches {
        let fork_y = trunk_y(fork.fork_at);
        let dir = match fork.side {
            BranchSide::Right => 1.0,
            BranchSide::Left => -1.0,
        };
        let dx = fork.dx * dir;
        let fork_commits = fork.commits.min(MAX_COMMITS);
        let n = fork_commits as f32;
        let end = Point::new(trunk_x + dx * n, fork_y + fork.dy * n);
        rasterize_line(
            &mut branch_lines.points,
            Point::new(trunk_x, fork_y),
            end,
            step,
            branch_stroke,
        );
        for i in 1..=fork_commits {
            let c = Point::new(trunk_x + dx * i as f32, fork_y + fork.dy * i as f32);
            rasterize_circle(&mut branch_nodes.points, c, style.node_radius, node_step, node_stroke);
        }

        if let Some(merge_at) = fork.merge_to_trunk_at {
            let merge_y = trunk_y(merge_at);
            rasterize_horizontal(&mut merge_lines.points, end.y, end.x, trunk_x, step, merge_stroke);
            rasterize_vertical(&mut merge_lines.points, trunk_x, end.y, merge_y, step, merge_stroke);
            let c = Point::new(trunk_x, merge_y);
            rasterize_circle(&mut trunk_nodes.points, c, style.node_radius, node_step, node_stroke);
        }
    }

    let nodes = style.nodes_ratio.clamp(0.0, 1.0);
    let lines = style.lines_ratio.clamp(0.0, 1.0 - nodes);
    let rest = 1.0 - nodes - lines;
    let shares = [
        lines,
        nodes * 0.55,
        nodes * 0.45,
        rest * 0.8,
        rest * 0.2,
    ];
    let parts = vec![trunk_line, trunk_nodes, branch_nodes, branch_lines, merge_lines];
    assemble_quotas(parts, &shares, 0, cfg.particle_count, rng)
}
