//! Fixed-step integrator
//!
//! Velocities are in pixels per 60 Hz reference frame, so positions advance
//! by `v * dt * 60` and the spring and wander terms scale with `dt`.
//!
//! `Forming` particles: spring acceleration `k * (target - p) - c * v`,
//! clamp to `max_speed`, integrate, then snap onto the target when inside
//! `snap_radius`. `Drifting` particles: deterministic wander from
//! [`noise::unit`], a minimum-speed kick, clamp to `drift_max`, integrate.
//! Both reflect off the canvas walls.

use crate::noise;
use crate::store::{Mode, ParticleStore};
use mote_core::PhysicsConfig;
use rand::Rng;
use std::f32::consts::TAU;

/// Velocity kept after snapping onto a target
const SNAP_DAMPING: f32 = 0.2;

const DRIFT_MAGNITUDE_SALT: u32 = 0xAB_CDEF;
const KICK_ANGLE_SALT: u32 = 0x12_3456;
const KICK_MAGNITUDE_SALT: u32 = 0x777;

/// Advance every particle by one fixed step of `dt` seconds
pub fn step(
    store: &mut ParticleStore,
    physics: &PhysicsConfig,
    dt: f32,
    tick: u32,
    width: f32,
    height: f32,
) {
    let frames = dt * 60.0;
    for i in 0..store.len() {
        match store.mode[i] {
            Mode::Forming => {
                spring(store, i, physics, dt);
                clamp_speed(&mut store.vx[i], &mut store.vy[i], physics.max_speed);
                integrate_and_reflect(store, i, frames, width, height);
                snap(store, i, physics.snap_radius);
            }
            Mode::Drifting => {
                drift(store, i, physics, frames, tick);
                integrate_and_reflect(store, i, frames, width, height);
            }
        }
    }
}

/// One-time velocity burst with a uniform random angle and a magnitude in
/// `[scatter_min, scatter_max]`
pub fn scatter<R: Rng + ?Sized>(
    store: &mut ParticleStore,
    i: usize,
    physics: &PhysicsConfig,
    rng: &mut R,
) {
    let angle = rng.random::<f32>() * TAU;
    let spread = (physics.scatter_max - physics.scatter_min).max(0.0);
    let magnitude = physics.scatter_min + rng.random::<f32>() * spread;
    store.vx[i] += angle.cos() * magnitude;
    store.vy[i] += angle.sin() * magnitude;
}

fn spring(store: &mut ParticleStore, i: usize, p: &PhysicsConfig, dt: f32) {
    let dx = store.tx[i] - store.x[i];
    let dy = store.ty[i] - store.y[i];
    store.vx[i] += (p.spring_k * dx - p.spring_c * store.vx[i]) * dt;
    store.vy[i] += (p.spring_k * dy - p.spring_c * store.vy[i]) * dt;
}

fn drift(store: &mut ParticleStore, i: usize, p: &PhysicsConfig, frames: f32, tick: u32) {
    let id = store.ids[i];
    let angle = noise::unit(id, tick) * TAU;
    let magnitude = (noise::unit(id ^ DRIFT_MAGNITUDE_SALT, tick) - 0.5) * p.wander * frames;
    let (mut vx, mut vy) = (store.vx[i], store.vy[i]);
    vx += angle.cos() * magnitude;
    vy += angle.sin() * magnitude;

    if vx * vx + vy * vy < p.min_speed * p.min_speed {
        let theta = noise::unit(id ^ KICK_ANGLE_SALT, tick) * TAU;
        let kick = p.min_speed * (1.0 + noise::unit(id ^ KICK_MAGNITUDE_SALT, tick));
        vx += theta.cos() * kick;
        vy += theta.sin() * kick;
    }
    clamp_speed(&mut vx, &mut vy, p.drift_max);
    store.vx[i] = vx;
    store.vy[i] = vy;
}

fn clamp_speed(vx: &mut f32, vy: &mut f32, max: f32) {
    let sq = *vx * *vx + *vy * *vy;
    if sq > max * max {
        let k = max / sq.sqrt();
        *vx *= k;
        *vy *= k;
    }
}

fn integrate_and_reflect(store: &mut ParticleStore, i: usize, frames: f32, width: f32, height: f32) {
    let (x, vx) = reflect(store.x[i] + store.vx[i] * frames, store.vx[i], width);
    let (y, vy) = reflect(store.y[i] + store.vy[i] * frames, store.vy[i], height);
    store.x[i] = x;
    store.vx[i] = vx;
    store.y[i] = y;
    store.vy[i] = vy;
}

/// Clamp one axis to `[0, max]`, pointing the velocity back inward on contact
fn reflect(pos: f32, v: f32, max: f32) -> (f32, f32) {
    if pos < 0.0 {
        (0.0, v.abs())
    } else if pos > max {
        (max, -v.abs())
    } else {
        (pos, v)
    }
}

fn snap(store: &mut ParticleStore, i: usize, radius: f32) {
    let dx = store.tx[i] - store.x[i];
    let dy = store.ty[i] - store.y[i];
    if dx * dx + dy * dy < radius * radius {
        store.x[i] = store.tx[i];
        store.y[i] = store.ty[i];
        store.vx[i] *= SNAP_DAMPING;
        store.vy[i] *= SNAP_DAMPING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_core::Point;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn single(x: f32, y: f32, vx: f32, vy: f32) -> ParticleStore {
        let mut store = ParticleStore::new(1, 1.0, 1.0, &mut StdRng::seed_from_u64(0));
        store.x[0] = x;
        store.y[0] = y;
        store.vx[0] = vx;
        store.vy[0] = vy;
        store
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut store = ParticleStore::new(300, 200.0, 120.0, &mut rng);
        let physics = PhysicsConfig::default();
        for i in (0..300).step_by(3) {
            store.bind(i, Point::new(rng.random::<f32>() * 200.0, rng.random::<f32>() * 120.0));
        }
        for tick in 0..2000 {
            step(&mut store, &physics, DT, tick, 200.0, 120.0);
            if tick % 250 == 0 {
                for i in 0..store.len() {
                    scatter(&mut store, i, &physics, &mut rng);
                }
            }
            for p in store.positions() {
                assert!((0.0..=200.0).contains(&p.x) && (0.0..=120.0).contains(&p.y));
            }
        }
    }

    #[test]
    fn test_reflects_at_right_wall() {
        let physics = PhysicsConfig {
            wander: 0.0,
            min_speed: 0.0,
            ..Default::default()
        };
        let mut store = single(799.5, 100.0, 1.5, 0.0);
        step(&mut store, &physics, DT, 0, 800.0, 520.0);
        assert_eq!(store.x[0], 800.0);
        assert_eq!(store.vx[0], -1.5);

        let mut store = single(0.5, 100.0, -1.5, 0.0);
        step(&mut store, &physics, DT, 0, 800.0, 520.0);
        assert_eq!(store.x[0], 0.0);
        assert_eq!(store.vx[0], 1.5);
    }

    #[test]
    fn test_forming_converges_and_snaps_exactly() {
        let physics = PhysicsConfig::critically_damped(14.0);
        let mut store = single(40.0, 500.0, 0.0, 0.0);
        let target = Point::new(612.25, 33.5);
        store.bind(0, target);
        let mut snapped_at = None;
        for tick in 0..1500 {
            step(&mut store, &physics, DT, tick, 800.0, 520.0);
            if store.position(0) == target {
                snapped_at = Some(tick);
                break;
            }
        }
        assert!(snapped_at.is_some(), "never snapped, at {:?}", store.position(0));
        for tick in 0..200 {
            step(&mut store, &physics, DT, tick, 800.0, 520.0);
            assert!(store.position(0).distance(target) < physics.snap_radius);
        }
    }

    #[test]
    fn test_forming_speed_is_capped() {
        let physics = PhysicsConfig::default();
        let mut store = single(0.0, 0.0, 0.0, 0.0);
        store.bind(0, Point::new(800.0, 520.0));
        for tick in 0..30 {
            step(&mut store, &physics, DT, tick, 800.0, 520.0);
            assert!(store.velocity(0).length() <= physics.max_speed + 1e-4);
        }
    }

    #[test]
    fn test_drift_is_deterministic_per_id_and_tick() {
        let physics = PhysicsConfig::default();
        let mut a = single(300.0, 200.0, 0.4, -0.2);
        let mut b = a.clone();
        for tick in 100..400 {
            step(&mut a, &physics, DT, tick, 800.0, 520.0);
            step(&mut b, &physics, DT, tick, 800.0, 520.0);
        }
        assert_eq!(a.x[0].to_bits(), b.x[0].to_bits());
        assert_eq!(a.vy[0].to_bits(), b.vy[0].to_bits());
        assert!(a.velocity(0).length() <= physics.drift_max + 1e-4);
    }

    #[test]
    fn test_drift_keeps_particles_moving() {
        let physics = PhysicsConfig::default();
        let mut store = single(300.0, 200.0, 0.0, 0.0);
        step(&mut store, &physics, DT, 1, 800.0, 520.0);
        assert!(store.velocity(0).length() >= physics.min_speed * 0.5);
    }

    #[test]
    fn test_scatter_magnitude_in_range() {
        let physics = PhysicsConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let mut store = single(10.0, 10.0, 0.0, 0.0);
            scatter(&mut store, 0, &physics, &mut rng);
            let speed = store.velocity(0).length();
            assert!(speed >= physics.scatter_min - 1e-4 && speed <= physics.scatter_max + 1e-4);
        }
    }
}
