//! The simulation owned by the worker

use crate::clock::FrameClock;
use crate::message::{BoxedSurface, Message};
use mote_core::{HoverFlags, ShapeKey, SimConfig};
use mote_particles::{step, ParticleStore, TargetAssigner};
use mote_render::{DotSprite, RenderError};
use mote_shapes::{ShapeConfig, TargetCache};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Particle pool, physics, target cache and optional render surface for one
/// canvas. Every operation is a no-op once [`SimulationState::dispose`] ran.
pub struct SimulationState {
    config: SimConfig,
    width: f32,
    height: f32,
    pixel_ratio: f32,
    store: ParticleStore,
    assigner: TargetAssigner,
    cache: TargetCache,
    sprite: DotSprite,
    surface: Option<BoxedSurface>,
    clock: FrameClock,
    rng: StdRng,
    tick: u32,
    active: Option<ShapeKey>,
    disposed: bool,
}

impl SimulationState {
    /// Allocate the pool for a sanitized copy of `config`. No surface is
    /// attached; see [`SimulationState::attach_surface`].
    pub fn new(config: SimConfig) -> Self {
        let config = config.sanitized();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let store = ParticleStore::new(config.particle_count, config.width, config.height, &mut rng);
        let pixel_ratio = config.pixel_ratio();
        log::info!(
            "Simulation initialized: {} particles on {}x{} at {}x pixel ratio",
            config.particle_count,
            config.width,
            config.height,
            pixel_ratio
        );
        Self {
            width: config.width,
            height: config.height,
            pixel_ratio,
            sprite: DotSprite::new(config.dot_size, pixel_ratio),
            store,
            assigner: TargetAssigner::new(),
            cache: TargetCache::new(),
            surface: None,
            clock: FrameClock::new(),
            rng,
            tick: 0,
            active: None,
            disposed: false,
            config,
        }
    }

    /// Configure `surface` at the canvas size times the pixel ratio and keep
    /// it. A surface that refuses the size is dropped and the error returned.
    pub fn attach_surface(&mut self, mut surface: BoxedSurface) -> Result<(), RenderError> {
        if self.disposed {
            return Ok(());
        }
        let (w, h) = self.device_size();
        surface.configure(w, h)?;
        self.surface = Some(surface);
        Ok(())
    }

    /// Apply a non-`Init` message. Returns `false` once disposed.
    pub fn handle(&mut self, message: Message) -> bool {
        match message {
            Message::Init { .. } => {
                log::warn!("Ignoring repeated init");
            }
            Message::Resize { width, height } => self.resize(width, height),
            Message::Hover(flags) => self.hover(flags),
            Message::Dispose => self.dispose(),
        }
        !self.disposed
    }

    /// Update the canvas size, reconfigure the surface and sprite, drop
    /// cached targets and pull every particle back inside
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.disposed {
            return;
        }
        let mut resized = self.config.clone();
        resized.width = width;
        resized.height = height;
        let resized = resized.sanitized();
        self.config.width = resized.width;
        self.config.height = resized.height;
        self.width = resized.width;
        self.height = resized.height;

        let (w, h) = self.device_size();
        if let Some(surface) = self.surface.as_mut() {
            if let Err(e) = surface.configure(w, h) {
                log::warn!("Releasing surface after failed resize: {e}");
                self.surface = None;
            }
        }
        self.sprite = DotSprite::new(self.config.dot_size, self.pixel_ratio);
        self.cache.invalidate();
        self.store.clamp_positions(self.width, self.height);
        log::info!("Resized to {}x{}", self.width, self.height);
    }

    /// Form the highest-precedence hovered shape, or release every particle
    /// when no flag is set
    pub fn hover(&mut self, flags: HoverFlags) {
        if self.disposed {
            return;
        }
        self.active = flags.active_key();
        match self.active {
            Some(key) => {
                let cfg = ShapeConfig::new(self.width, self.height, self.store.len());
                let targets =
                    self.cache
                        .get_or_generate(key, &cfg, &self.config.shapes, &mut self.rng);
                self.assigner.assign(
                    &mut self.store,
                    targets,
                    self.width,
                    self.height,
                    &self.config.physics,
                    &mut self.rng,
                );
            }
            None => {
                let released =
                    self.assigner
                        .release_all(&mut self.store, &self.config.physics, &mut self.rng);
                log::debug!("Released {released} particles");
            }
        }
    }

    /// Stop simulating and release the surface
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.surface = None;
        log::info!("Simulation disposed after {} ticks", self.tick);
    }

    /// Run one fixed step
    pub fn step(&mut self) {
        if self.disposed {
            return;
        }
        step(
            &mut self.store,
            &self.config.physics,
            self.clock.fixed_timestep as f32,
            self.tick,
            self.width,
            self.height,
        );
        self.tick = self.tick.wrapping_add(1);
    }

    /// Advance by `elapsed` seconds of frame time, then draw. Returns the
    /// number of fixed steps run.
    pub fn frame(&mut self, elapsed: f64) -> Result<u32, RenderError> {
        if self.disposed {
            return Ok(0);
        }
        let steps = self.clock.advance(elapsed);
        self.run_steps(steps)
    }

    /// Like [`SimulationState::frame`] with the wall time since the last call
    pub fn frame_realtime(&mut self) -> Result<u32, RenderError> {
        if self.disposed {
            return Ok(0);
        }
        let steps = self.clock.tick();
        self.run_steps(steps)
    }

    fn run_steps(&mut self, steps: u32) -> Result<u32, RenderError> {
        for _ in 0..steps {
            self.step();
        }
        self.draw()?;
        Ok(steps)
    }

    /// Clear the surface and stamp every particle centered on its position
    pub fn draw(&mut self) -> Result<(), RenderError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        surface.clear();
        let offset = self.sprite.draw_offset();
        let dpr = self.pixel_ratio;
        for p in self.store.positions() {
            surface.stamp(
                &self.sprite,
                (p.x - offset) * dpr,
                (p.y - offset) * dpr,
                self.config.opacity,
            );
        }
        surface.present()
    }

    fn device_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).floor() as u32,
            (self.height * self.pixel_ratio).floor() as u32,
        )
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn cache(&self) -> &TargetCache {
        &self.cache
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn active_shape(&self) -> Option<ShapeKey> {
        self.active
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_particles::Mode;
    use mote_render::{Framebuffer, Surface};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn config(count: usize) -> SimConfig {
        SimConfig {
            particle_count: count,
            seed: Some(1234),
            ..Default::default()
        }
    }

    /// Counts presented frames and the last configured size
    struct CountingSurface {
        inner: Framebuffer,
        frames: Arc<AtomicU64>,
    }

    impl Surface for CountingSurface {
        fn configure(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
            self.inner.configure(width, height)
        }
        fn size(&self) -> (u32, u32) {
            self.inner.size()
        }
        fn clear(&mut self) {
            self.inner.clear()
        }
        fn stamp(&mut self, sprite: &DotSprite, x: f32, y: f32, opacity: f32) {
            self.inner.stamp(sprite, x, y, opacity)
        }
        fn present(&mut self) -> Result<(), RenderError> {
            self.frames.fetch_add(1, Ordering::SeqCst);
            self.inner.present()
        }
    }

    #[test]
    fn test_letter_forms_and_scatters() {
        let mut sim = SimulationState::new(config(400));
        sim.hover(HoverFlags::only(ShapeKey::Letter));
        assert_eq!(sim.active_shape(), Some(ShapeKey::Letter));
        assert_eq!(sim.store().forming_count(), 400);

        for _ in 0..1500 {
            sim.step();
        }
        assert!(
            sim.store().total_target_distance() < 1.0,
            "residual {}",
            sim.store().total_target_distance()
        );

        sim.hover(HoverFlags::none());
        let store = sim.store();
        assert_eq!(store.forming_count(), 0);
        for i in 0..store.len() {
            assert_eq!(store.mode[i], Mode::Drifting);
            assert!(store.velocity(i).length() > 0.0);
        }
    }

    #[test]
    fn test_non_finite_shape_style_keeps_particles_in_bounds() {
        let config = SimConfig::from_toml_str(
            "particle_count = 50\nseed = 1\n[shapes.branch]\nnode_radius = nan\n",
        )
        .unwrap();
        let mut sim = SimulationState::new(config);
        assert!(sim.config().shapes.branch.node_radius.is_finite());

        sim.hover(HoverFlags::only(ShapeKey::Branch));
        for _ in 0..10 {
            sim.step();
        }
        sim.hover(HoverFlags::none());
        for _ in 0..10 {
            sim.step();
        }
        let outside = sim
            .store()
            .positions()
            .filter(|p| !((0.0..=800.0).contains(&p.x) && (0.0..=520.0).contains(&p.y)))
            .count();
        assert_eq!(outside, 0);
    }

    #[test]
    fn test_resize_invalidates_targets() {
        let mut sim = SimulationState::new(config(300));
        sim.hover(HoverFlags::only(ShapeKey::Kanban));
        assert_eq!(sim.cache().len(), 1);

        sim.resize(400.0, 300.0);
        assert!(sim.cache().is_empty());
        assert_eq!(sim.size(), (400.0, 300.0));
        assert!(sim.store().positions().all(|p| p.x <= 400.0 && p.y <= 300.0));

        sim.hover(HoverFlags::only(ShapeKey::Kanban));
        let cfg = ShapeConfig::new(400.0, 300.0, 300);
        assert!(sim.cache().contains(ShapeKey::Kanban, &cfg));
        let store = sim.store();
        for i in 0..store.len() {
            let t = store.target(i).unwrap();
            assert!(t.x <= 400.0 && t.y <= 300.0);
        }
    }

    #[test]
    fn test_precedence_picks_first_flag() {
        let mut sim = SimulationState::new(config(50));
        let mut flags = HoverFlags::only(ShapeKey::Gear);
        flags.set(ShapeKey::Branch, true);
        sim.hover(flags);
        assert_eq!(sim.active_shape(), Some(ShapeKey::Branch));
    }

    #[test]
    fn test_stays_in_bounds_through_frames() {
        let mut sim = SimulationState::new(config(200));
        sim.hover(HoverFlags::only(ShapeKey::Gear));
        for frame in 0..300 {
            sim.frame(1.0 / 60.0).unwrap();
            if frame == 150 {
                sim.hover(HoverFlags::none());
            }
            assert!(sim
                .store()
                .positions()
                .all(|p| (0.0..=800.0).contains(&p.x) && (0.0..=520.0).contains(&p.y)));
        }
        assert!(sim.tick() > 250);
    }

    #[test]
    fn test_draws_into_attached_surface() {
        let frames = Arc::new(AtomicU64::new(0));
        let mut sim = SimulationState::new(SimConfig {
            device_pixel_ratio: 2.0,
            ..config(100)
        });
        let surface = CountingSurface {
            inner: Framebuffer::new(),
            frames: frames.clone(),
        };
        sim.attach_surface(Box::new(surface)).unwrap();
        assert_eq!(sim.frame(1.0 / 60.0).unwrap(), 1);
        assert_eq!(frames.load(Ordering::SeqCst), 1);

        sim.resize(300.0, 200.0);
        assert!(sim.has_surface());
        sim.frame(1.0 / 60.0).unwrap();
        assert_eq!(frames.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_refused_surface_is_reported() {
        // Sanitizing caps the canvas side, but twice the cap is still too large
        let mut sim = SimulationState::new(SimConfig {
            width: 16_384.0,
            device_pixel_ratio: 2.0,
            ..config(10)
        });
        assert!(matches!(
            sim.attach_surface(Box::new(Framebuffer::new())),
            Err(RenderError::UnsupportedSurface { .. })
        ));
        assert!(!sim.has_surface());
        assert_eq!(sim.frame(1.0 / 60.0).unwrap(), 1);
    }

    #[test]
    fn test_dispose_makes_everything_a_no_op() {
        let mut sim = SimulationState::new(config(20));
        sim.attach_surface(Box::new(Framebuffer::new())).unwrap();
        assert!(!sim.handle(Message::Dispose));
        assert!(!sim.has_surface());

        let before = sim.store().position(0);
        sim.handle(Message::Hover(HoverFlags::only(ShapeKey::Letter)));
        sim.handle(Message::Resize {
            width: 10.0,
            height: 10.0,
        });
        assert_eq!(sim.frame(1.0).unwrap(), 0);
        assert_eq!(sim.store().forming_count(), 0);
        assert_eq!(sim.store().position(0), before);
        assert_eq!(sim.size(), (800.0, 520.0));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let mut sim = SimulationState::new(config(64));
            sim.hover(HoverFlags::only(ShapeKey::Briefcase));
            for _ in 0..40 {
                sim.step();
            }
            sim.hover(HoverFlags::none());
            for _ in 0..40 {
                sim.step();
            }
            sim.store().x.clone()
        };
        assert_eq!(run(), run());
    }
}
