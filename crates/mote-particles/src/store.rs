//! Structure-of-arrays particle pool

use mote_core::Point;
use rand::Rng;

/// Per-particle behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Wandering under small deterministic impulses
    #[default]
    Drifting,
    /// Spring-driven toward the assigned target
    Forming,
}

/// Fixed-size particle pool. The count never changes after construction and
/// every column has exactly `len()` entries.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    pub ids: Vec<u32>,
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,
    pub mode: Vec<Mode>,
    /// Target x; meaningful only while `Forming`
    pub tx: Vec<f32>,
    /// Target y; meaningful only while `Forming`
    pub ty: Vec<f32>,
}

impl ParticleStore {
    /// `count` drifting particles at uniform random positions inside
    /// `width × height` with velocities in [-1, 1) per axis
    pub fn new<R: Rng + ?Sized>(count: usize, width: f32, height: f32, rng: &mut R) -> Self {
        let mut store = Self {
            ids: (0..count as u32).collect(),
            x: Vec::with_capacity(count),
            y: Vec::with_capacity(count),
            vx: Vec::with_capacity(count),
            vy: Vec::with_capacity(count),
            mode: vec![Mode::Drifting; count],
            tx: vec![0.0; count],
            ty: vec![0.0; count],
        };
        for _ in 0..count {
            store.x.push(rng.random::<f32>() * width);
            store.y.push(rng.random::<f32>() * height);
            store.vx.push((rng.random::<f32>() - 0.5) * 2.0);
            store.vy.push((rng.random::<f32>() - 0.5) * 2.0);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn position(&self, i: usize) -> Point {
        Point::new(self.x[i], self.y[i])
    }

    pub fn velocity(&self, i: usize) -> Point {
        Point::new(self.vx[i], self.vy[i])
    }

    pub fn target(&self, i: usize) -> Option<Point> {
        match self.mode[i] {
            Mode::Forming => Some(Point::new(self.tx[i], self.ty[i])),
            Mode::Drifting => None,
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| Point::new(x, y))
    }

    pub fn forming_count(&self) -> usize {
        self.mode.iter().filter(|m| **m == Mode::Forming).count()
    }

    /// Bind particle `i` to `target` and switch it to `Forming`
    pub fn bind(&mut self, i: usize, target: Point) {
        self.tx[i] = target.x;
        self.ty[i] = target.y;
        self.mode[i] = Mode::Forming;
    }

    /// Clamp every position into `[0, width] × [0, height]`
    pub fn clamp_positions(&mut self, width: f32, height: f32) {
        for x in &mut self.x {
            *x = x.clamp(0.0, width.max(0.0));
        }
        for y in &mut self.y {
            *y = y.clamp(0.0, height.max(0.0));
        }
    }

    /// Sum of distances from every `Forming` particle to its target
    pub fn total_target_distance(&self) -> f32 {
        (0..self.len())
            .filter_map(|i| self.target(i).map(|t| t.distance(self.position(i))))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_store_is_drifting_and_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let store = ParticleStore::new(500, 800.0, 520.0, &mut rng);
        assert_eq!(store.len(), 500);
        assert_eq!(store.forming_count(), 0);
        assert_eq!(store.ids[499], 499);
        for p in store.positions() {
            assert!((0.0..=800.0).contains(&p.x) && (0.0..=520.0).contains(&p.y));
        }
        assert!(store.vx.iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn test_bind_and_clamp() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut store = ParticleStore::new(3, 100.0, 100.0, &mut rng);
        store.bind(1, Point::new(5.0, 6.0));
        assert_eq!(store.target(1), Some(Point::new(5.0, 6.0)));
        assert_eq!(store.target(0), None);

        store.x[2] = 250.0;
        store.y[2] = -4.0;
        store.clamp_positions(50.0, 50.0);
        assert_eq!(store.position(2), Point::new(50.0, 0.0));
    }
}
