//! Memoized target sets.

use crate::{generate, ShapeConfig};
use mote_core::{Point, ShapeKey, ShapeStyles};
use rand::Rng;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    shape: ShapeKey,
    count: usize,
    width_bits: u32,
    height_bits: u32,
}

impl CacheKey {
    fn new(shape: ShapeKey, cfg: &ShapeConfig) -> Self {
        Self {
            shape,
            count: cfg.particle_count,
            width_bits: cfg.box_width.to_bits(),
            height_bits: cfg.box_height.to_bits(),
        }
    }
}

/// Target sets keyed by shape, particle budget and canvas size. Cleared
/// wholesale on resize.
#[derive(Debug, Default)]
pub struct TargetCache {
    entries: HashMap<CacheKey, Vec<Point>>,
}

impl TargetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached targets for `shape`, generating them on a miss
    pub fn get_or_generate<R: Rng + ?Sized>(
        &mut self,
        shape: ShapeKey,
        cfg: &ShapeConfig,
        styles: &ShapeStyles,
        rng: &mut R,
    ) -> &[Point] {
        let key = CacheKey::new(shape, cfg);
        self.entries
            .entry(key)
            .or_insert_with(|| {
                log::debug!(
                    "Generating {} targets for {} at {}x{}",
                    cfg.particle_count,
                    shape,
                    cfg.box_width,
                    cfg.box_height
                );
                generate(shape, cfg, styles, rng)
            })
            .as_slice()
    }

    pub fn contains(&self, shape: ShapeKey, cfg: &ShapeConfig) -> bool {
        self.entries.contains_key(&CacheKey::new(shape, cfg))
    }

    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("Dropping {} cached target sets", self.entries.len());
        }
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_second_lookup_hits() {
        let mut cache = TargetCache::new();
        let mut rng = StdRng::seed_from_u64(61);
        let styles = ShapeStyles::default();
        let cfg = ShapeConfig::new(800.0, 520.0, 100);
        let first = cache.get_or_generate(ShapeKey::Kanban, &cfg, &styles, &mut rng).to_vec();
        let second = cache.get_or_generate(ShapeKey::Kanban, &cfg, &styles, &mut rng).to_vec();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_size_is_part_of_the_key() {
        let mut cache = TargetCache::new();
        let mut rng = StdRng::seed_from_u64(62);
        let styles = ShapeStyles::default();
        let small = ShapeConfig::new(400.0, 300.0, 100);
        let large = ShapeConfig::new(800.0, 520.0, 100);
        cache.get_or_generate(ShapeKey::Gear, &small, &styles, &mut rng);
        assert!(!cache.contains(ShapeKey::Gear, &large));
        cache.get_or_generate(ShapeKey::Gear, &large, &styles, &mut rng);
        assert_eq!(cache.len(), 2);

        cache.invalidate();
        assert!(cache.is_empty());
        assert!(!cache.contains(ShapeKey::Gear, &small));
    }
}
