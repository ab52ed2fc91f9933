//! Mote Particles - Fixed-size particle pool and its physics
//!
//! Provides the simulation half of the engine:
//! - `ParticleStore`: structure-of-arrays pool with stable ids
//! - `noise`: deterministic per-(id, tick) hash for wander
//! - `integrator`: spring toward target, bounded wander, snap, wall reflection
//! - `TargetAssigner`: rank-by-x pairing of particles to target points

pub mod assign;
pub mod integrator;
pub mod noise;
pub mod store;

pub use assign::TargetAssigner;
pub use integrator::{scatter, step};
pub use store::{Mode, ParticleStore};
