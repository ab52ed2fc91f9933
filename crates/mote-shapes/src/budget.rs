//! Point-budget utilities: jitter, exact-count resampling, density scaling
//! and budget splitting across the parts of a shape.

use mote_core::Point;
use rand::Rng;

/// Jitter applied to duplicated points when upsampling
pub const DEFAULT_JITTER: f32 = 0.6;

/// A sub-shape point cloud with its own cosmetic jitter amount
#[derive(Debug, Clone, Default)]
pub struct Part {
    pub points: Vec<Point>,
    pub jitter: f32,
}

impl Part {
    pub fn new(jitter: f32) -> Self {
        Self {
            points: Vec::new(),
            jitter,
        }
    }
}

/// Add a uniform offset in `[-amount/2, amount/2]` to every coordinate
pub fn jitter<'a, R: Rng + ?Sized>(
    points: &'a mut [Point],
    amount: f32,
    rng: &mut R,
) -> &'a mut [Point] {
    for p in points.iter_mut() {
        p.x += (rng.random::<f32>() - 0.5) * amount;
        p.y += (rng.random::<f32>() - 0.5) * amount;
    }
    points
}

/// Pick `k` points spread evenly by index across the sequence
pub fn even_pick(points: &[Point], k: usize) -> Vec<Point> {
    if k == 0 {
        return Vec::new();
    }
    if k >= points.len() {
        return points.to_vec();
    }
    let stride = (points.len() - 1) as f64 / (k.max(2) - 1) as f64;
    (0..k)
        .map(|i| points[((i as f64 * stride).round() as usize).min(points.len() - 1)])
        .collect()
}

/// Force exactly `k` points: even downsampling when over budget, cyclic
/// duplication with jitter when under. An empty input becomes `k` origins.
pub fn exact_count<R: Rng + ?Sized>(
    points: Vec<Point>,
    k: usize,
    jitter_amount: f32,
    rng: &mut R,
) -> Vec<Point> {
    if points.len() == k {
        return points;
    }
    if points.len() > k {
        return even_pick(&points, k);
    }
    if points.is_empty() {
        return vec![Point::ZERO; k];
    }

    let source_len = points.len();
    let mut out = points;
    out.reserve(k - source_len);
    let mut i = 0;
    while out.len() < k {
        let p = out[i % source_len];
        out.push(Point::new(
            p.x + (rng.random::<f32>() - 0.5) * jitter_amount,
            p.y + (rng.random::<f32>() - 0.5) * jitter_amount,
        ));
        i += 1;
    }
    out
}

/// Shrink a sampling stride by `factor`; never below 1
pub fn densify(base_step: f32, factor: f32) -> f32 {
    if !factor.is_finite() || factor <= 0.0 {
        return base_step.max(1.0);
    }
    (base_step / factor).floor().max(1.0)
}

/// `sqrt(budget / raw)`, only ever densifying (≥ 1)
pub fn density_factor(budget: usize, raw: usize) -> f32 {
    if raw == 0 {
        return 1.0;
    }
    (budget as f32 / raw as f32).sqrt().max(1.0)
}

/// Gentler cube-root variant for sub-shapes that need less growth
pub fn density_factor_cbrt(budget: usize, raw: usize) -> f32 {
    if raw == 0 {
        return 1.0;
    }
    (budget as f32 / raw as f32).cbrt().max(1.0)
}

/// Split `total` into integer quotas proportional to `shares`.
///
/// Rounding drift is corrected so the quotas sum to `total` exactly: any
/// surplus goes to `favored`, any excess is removed from `favored` first and
/// then from the largest remaining quota. Non-finite or negative shares
/// count as zero; all-zero shares split evenly.
pub fn split_budget(shares: &[f32], total: usize, favored: usize) -> Vec<usize> {
    if shares.is_empty() {
        return Vec::new();
    }
    let favored = favored.min(shares.len() - 1);
    let clean: Vec<f64> = shares
        .iter()
        .map(|&s| if s.is_finite() && s > 0.0 { s as f64 } else { 0.0 })
        .collect();
    let sum: f64 = clean.iter().sum();
    let weights: Vec<f64> = if sum > 0.0 {
        clean.iter().map(|s| s / sum).collect()
    } else {
        vec![1.0 / shares.len() as f64; shares.len()]
    };

    let mut quotas: Vec<usize> = weights
        .iter()
        .map(|w| (w * total as f64).round() as usize)
        .collect();

    let mut assigned: usize = quotas.iter().sum();
    while assigned > total {
        let idx = if quotas[favored] > 0 {
            favored
        } else {
            (0..quotas.len()).max_by_key(|&i| quotas[i]).unwrap_or(favored)
        };
        quotas[idx] -= 1;
        assigned -= 1;
    }
    if assigned < total {
        quotas[favored] += total - assigned;
    }
    quotas
}

/// Jitter every part, concatenate and force exactly `budget` points
pub fn assemble<R: Rng + ?Sized>(parts: Vec<Part>, budget: usize, rng: &mut R) -> Vec<Point> {
    let mut all = Vec::with_capacity(parts.iter().map(|p| p.points.len()).sum());
    for mut part in parts {
        jitter(&mut part.points, part.jitter, rng);
        all.extend(part.points);
    }
    exact_count(all, budget, DEFAULT_JITTER, rng)
}

/// Jitter every part and give each an exact quota of the budget, split by
/// `shares` (see [`split_budget`])
pub fn assemble_quotas<R: Rng + ?Sized>(
    parts: Vec<Part>,
    shares: &[f32],
    favored: usize,
    budget: usize,
    rng: &mut R,
) -> Vec<Point> {
    // Empty parts get no quota so they never pad with placeholder points
    let shares: Vec<f32> = parts
        .iter()
        .zip(shares.iter().chain(std::iter::repeat(&0.0_f32)))
        .map(|(part, &s)| if part.points.is_empty() { 0.0 } else { s })
        .collect();
    let favored = if parts.get(favored).is_some_and(|p| !p.points.is_empty()) {
        favored
    } else {
        (0..parts.len())
            .max_by_key(|&i| parts[i].points.len())
            .unwrap_or(0)
    };
    let quotas = split_budget(&shares, budget, favored);
    let mut out = Vec::with_capacity(budget);
    for (mut part, quota) in parts.into_iter().zip(quotas) {
        jitter(&mut part.points, part.jitter, rng);
        out.extend(exact_count(part.points, quota, DEFAULT_JITTER, rng));
    }
    // Only reachable if fewer parts than shares were passed
    exact_count(out, budget, DEFAULT_JITTER, rng)
}

/// Build parts at `base_step`, then rebuild them at a stride densified
/// toward `budget` by the square-root rule
pub fn densified_parts<F>(base_step: f32, budget: usize, build: F) -> Vec<Part>
where
    F: Fn(f32) -> Vec<Part>,
{
    let draft = build(base_step);
    let raw = draft.iter().map(|p| p.points.len()).sum();
    build(densify(base_step, density_factor(budget, raw)))
}

/// Shares proportional to each part's raw point count, scaled by a bias
pub fn biased_shares(parts: &[Part], bias: &[f32]) -> Vec<f32> {
    parts
        .iter()
        .zip(bias.iter().chain(std::iter::repeat(&1.0_f32)))
        .map(|(part, b)| part.points.len() as f32 * b)
        .collect()
}
