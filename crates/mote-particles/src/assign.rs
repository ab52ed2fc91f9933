//! Rank-by-x pairing of particles to target points

use crate::integrator::scatter;
use crate::store::{Mode, ParticleStore};
use mote_core::{PhysicsConfig, Point};
use rand::Rng;

/// Pairs the i-th particle by current x with the i-th target by x. Owns its
/// index buffers so repeated hovers do not allocate.
#[derive(Debug, Default)]
pub struct TargetAssigner {
    particles_by_x: Vec<usize>,
    targets_by_x: Vec<usize>,
}

impl TargetAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind particles to `targets` (clamped into the canvas). Particles left
    /// over when there are fewer targets than particles return to
    /// `Drifting`, scattering if they were forming. Returns the number bound.
    pub fn assign<R: Rng + ?Sized>(
        &mut self,
        store: &mut ParticleStore,
        targets: &[Point],
        width: f32,
        height: f32,
        physics: &PhysicsConfig,
        rng: &mut R,
    ) -> usize {
        let count = store.len();
        let bound = count.min(targets.len());

        self.particles_by_x.clear();
        self.particles_by_x.extend(0..count);
        self.particles_by_x
            .sort_by(|&a, &b| store.x[a].total_cmp(&store.x[b]).then(a.cmp(&b)));

        self.targets_by_x.clear();
        self.targets_by_x.extend(0..bound);
        self.targets_by_x
            .sort_by(|&a, &b| targets[a].x.total_cmp(&targets[b].x).then(a.cmp(&b)));

        for (&pi, &ti) in self.particles_by_x.iter().zip(&self.targets_by_x) {
            store.bind(pi, reachable(targets[ti], width, height));
        }
        for &pi in &self.particles_by_x[bound..] {
            release_one(store, pi, physics, rng);
        }

        log::debug!("Assigned {bound} of {count} particles to targets");
        bound
    }

    /// Return every particle to `Drifting`; each formerly forming particle
    /// gets one scatter impulse. Returns the number scattered.
    pub fn release_all<R: Rng + ?Sized>(
        &mut self,
        store: &mut ParticleStore,
        physics: &PhysicsConfig,
        rng: &mut R,
    ) -> usize {
        (0..store.len())
            .filter(|&i| release_one(store, i, physics, rng))
            .count()
    }
}

/// Clamp into the canvas; a non-finite coordinate moves to the canvas centre
fn reachable(target: Point, width: f32, height: f32) -> Point {
    let x = if target.x.is_finite() { target.x } else { width * 0.5 };
    let y = if target.y.is_finite() { target.y } else { height * 0.5 };
    Point::new(x, y).clamped(width, height)
}

fn release_one<R: Rng + ?Sized>(
    store: &mut ParticleStore,
    i: usize,
    physics: &PhysicsConfig,
    rng: &mut R,
) -> bool {
    let was_forming = store.mode[i] == Mode::Forming;
    if was_forming {
        scatter(store, i, physics, rng);
    }
    store.mode[i] = Mode::Drifting;
    was_forming
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store_at(xs: &[f32]) -> ParticleStore {
        let mut store = ParticleStore::new(xs.len(), 100.0, 100.0, &mut StdRng::seed_from_u64(0));
        store.x.copy_from_slice(xs);
        store
    }

    #[test]
    fn test_pairs_by_rank_of_x() {
        let mut store = store_at(&[50.0, 10.0, 30.0]);
        let targets = [
            Point::new(90.0, 1.0),
            Point::new(5.0, 2.0),
            Point::new(40.0, 3.0),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let bound = TargetAssigner::new().assign(
            &mut store,
            &targets,
            100.0,
            100.0,
            &PhysicsConfig::default(),
            &mut rng,
        );
        assert_eq!(bound, 3);
        assert_eq!(store.target(1), Some(Point::new(5.0, 2.0)));
        assert_eq!(store.target(2), Some(Point::new(40.0, 3.0)));
        assert_eq!(store.target(0), Some(Point::new(90.0, 1.0)));
    }

    #[test]
    fn test_identical_inputs_identical_pairing() {
        let xs = [3.0, 3.0, f32::NAN, 1.0, 7.0, 3.0];
        let targets: Vec<Point> = [4.0, 4.0, 2.0, 9.0, 1.0, 4.0]
            .iter()
            .enumerate()
            .map(|(i, &x)| Point::new(x, i as f32))
            .collect();
        let physics = PhysicsConfig::default();
        let mut assigner = TargetAssigner::new();

        let mut a = store_at(&xs);
        let mut b = store_at(&xs);
        let mut rng = StdRng::seed_from_u64(2);
        assigner.assign(&mut a, &targets, 100.0, 100.0, &physics, &mut rng);
        assigner.assign(&mut b, &targets, 100.0, 100.0, &physics, &mut rng);
        assert_eq!(a.tx, b.tx);
        assert_eq!(a.ty, b.ty);
        assert_eq!(a.mode, b.mode);
    }

    #[test]
    fn test_extra_particles_drift_and_scatter() {
        let mut store = store_at(&[1.0, 2.0, 3.0, 4.0]);
        let physics = PhysicsConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut assigner = TargetAssigner::new();
        for i in 0..4 {
            store.bind(i, Point::new(50.0, 50.0));
            store.vx[i] = 0.0;
            store.vy[i] = 0.0;
        }

        let targets = [Point::new(10.0, 10.0), Point::new(20.0, 20.0)];
        assert_eq!(assigner.assign(&mut store, &targets, 100.0, 100.0, &physics, &mut rng), 2);
        assert_eq!(store.forming_count(), 2);
        assert_eq!(store.mode[2], Mode::Drifting);
        assert!(store.velocity(3).length() >= physics.scatter_min - 1e-4);
        assert_eq!(store.velocity(0), Point::ZERO);
    }

    #[test]
    fn test_targets_are_clamped_into_canvas() {
        let mut store = store_at(&[1.0]);
        let mut rng = StdRng::seed_from_u64(4);
        TargetAssigner::new().assign(
            &mut store,
            &[Point::new(-20.0, 140.0)],
            100.0,
            100.0,
            &PhysicsConfig::default(),
            &mut rng,
        );
        assert_eq!(store.target(0), Some(Point::new(0.0, 100.0)));
    }

    #[test]
    fn test_non_finite_targets_fall_back_to_centre() {
        let mut store = store_at(&[1.0, 2.0, 3.0]);
        let mut rng = StdRng::seed_from_u64(6);
        TargetAssigner::new().assign(
            &mut store,
            &[
                Point::new(f32::NAN, 10.0),
                Point::new(30.0, f32::INFINITY),
                Point::new(f32::NEG_INFINITY, f32::NAN),
            ],
            100.0,
            80.0,
            &PhysicsConfig::default(),
            &mut rng,
        );
        for i in 0..3 {
            let t = store.target(i).unwrap();
            assert!((0.0..=100.0).contains(&t.x) && (0.0..=80.0).contains(&t.y));
        }
        assert!(store.tx.contains(&50.0));
        assert!(store.ty.contains(&40.0));
    }

    #[test]
    fn test_release_scatters_only_forming() {
        let mut store = store_at(&[1.0, 2.0, 3.0]);
        let physics = PhysicsConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        store.bind(1, Point::new(5.0, 5.0));
        store.vx[1] = 0.0;
        store.vy[1] = 0.0;
        let before = store.velocity(0);

        assert_eq!(TargetAssigner::new().release_all(&mut store, &physics, &mut rng), 1);
        assert_eq!(store.forming_count(), 0);
        assert_eq!(store.velocity(0), before);
        assert!(store.velocity(1).length() > 0.0);
    }
}
