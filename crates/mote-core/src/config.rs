//! Simulation configuration (parsed from TOML)

use crate::error::{MoteError, Result};
use crate::style::ShapeStyles;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted canvas side, in CSS pixels
const MAX_CANVAS_SIDE: f32 = 16_384.0;
/// Largest accepted particle pool
const MAX_PARTICLES: usize = 100_000;

/// Integrator tuning. Velocities are in pixels per 60 Hz reference frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Speed ceiling for forming particles
    pub max_speed: f32,
    /// Speed ceiling for drifting particles, strictly below `max_speed`
    pub drift_max: f32,
    /// Wander impulse strength
    pub wander: f32,
    /// Spring stiffness toward the target
    pub spring_k: f32,
    /// Spring damping; `2 * sqrt(spring_k)` is critical
    pub spring_c: f32,
    /// Drifting particles slower than this get re-energized
    pub min_speed: f32,
    /// Distance at which a forming particle locks onto its target
    pub snap_radius: f32,
    pub scatter_min: f32,
    pub scatter_max: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::critically_damped(14.0)
    }
}

impl PhysicsConfig {
    /// Default tuning with the given stiffness and matching critical damping
    pub fn critically_damped(spring_k: f32) -> Self {
        Self {
            max_speed: 4.0,
            drift_max: 1.8,
            wander: 0.10,
            spring_k,
            spring_c: 2.0 * spring_k.max(0.0).sqrt(),
            min_speed: 0.15,
            snap_radius: 0.8,
            scatter_min: 2.0,
            scatter_max: 4.0,
        }
    }
}

/// Everything the simulation receives with `init`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Canvas width in CSS pixels
    pub width: f32,
    /// Canvas height in CSS pixels
    pub height: f32,
    pub particle_count: usize,
    pub max_device_pixel_ratio: f32,
    /// Pixel ratio reported by the host display
    pub device_pixel_ratio: f32,
    /// Presentation rate of the worker loop
    pub frame_rate: f32,
    pub physics: PhysicsConfig,
    /// Dot radius in CSS pixels
    pub dot_size: f32,
    pub opacity: f32,
    /// Seed for scatter impulses, jitter and spawn positions; entropy when absent
    pub seed: Option<u64>,
    pub shapes: ShapeStyles,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 520.0,
            particle_count: 2000,
            max_device_pixel_ratio: 2.0,
            device_pixel_ratio: 1.0,
            frame_rate: 60.0,
            physics: PhysicsConfig::default(),
            dot_size: 1.25,
            opacity: 0.9,
            seed: None,
            shapes: ShapeStyles::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config from a TOML string. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load a config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Effective device pixel ratio, clamped to `[1, max_device_pixel_ratio]`
    pub fn pixel_ratio(&self) -> f32 {
        let max = if self.max_device_pixel_ratio.is_finite() {
            self.max_device_pixel_ratio.max(1.0)
        } else {
            1.0
        };
        if self.device_pixel_ratio.is_finite() {
            self.device_pixel_ratio.clamp(1.0, max)
        } else {
            1.0
        }
    }

    /// Reject configurations that cannot be repaired
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        let fields = [
            ("physics.max_speed", p.max_speed),
            ("physics.drift_max", p.drift_max),
            ("physics.wander", p.wander),
            ("physics.spring_k", p.spring_k),
            ("physics.spring_c", p.spring_c),
            ("physics.min_speed", p.min_speed),
            ("physics.snap_radius", p.snap_radius),
            ("physics.scatter_min", p.scatter_min),
            ("physics.scatter_max", p.scatter_max),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(MoteError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Apply minimum-viable fallbacks so nothing downstream divides by zero,
    /// allocates without bound or loops forever.
    pub fn sanitized(&self) -> Self {
        let mut cfg = self.clone();

        cfg.width = sanitize_side("width", cfg.width);
        cfg.height = sanitize_side("height", cfg.height);

        if cfg.particle_count == 0 || cfg.particle_count > MAX_PARTICLES {
            let fixed = cfg.particle_count.clamp(1, MAX_PARTICLES);
            log::warn!("particle_count {} out of range, using {fixed}", cfg.particle_count);
            cfg.particle_count = fixed;
        }

        if !cfg.frame_rate.is_finite() || cfg.frame_rate < 1.0 {
            log::warn!("frame_rate {} invalid, using 60", cfg.frame_rate);
            cfg.frame_rate = 60.0;
        }

        cfg.max_device_pixel_ratio = if cfg.max_device_pixel_ratio.is_finite() {
            cfg.max_device_pixel_ratio.max(1.0)
        } else {
            1.0
        };
        cfg.device_pixel_ratio = self.pixel_ratio();

        if !cfg.dot_size.is_finite() || cfg.dot_size <= 0.0 {
            cfg.dot_size = 1.0;
        }
        cfg.opacity = if cfg.opacity.is_finite() {
            cfg.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };

        let p = &mut cfg.physics;
        let defaults = PhysicsConfig::default();
        for (value, fallback) in [
            (&mut p.max_speed, defaults.max_speed),
            (&mut p.drift_max, defaults.drift_max),
            (&mut p.wander, defaults.wander),
            (&mut p.spring_k, defaults.spring_k),
            (&mut p.spring_c, defaults.spring_c),
            (&mut p.min_speed, defaults.min_speed),
            (&mut p.snap_radius, defaults.snap_radius),
            (&mut p.scatter_min, defaults.scatter_min),
            (&mut p.scatter_max, defaults.scatter_max),
        ] {
            if !value.is_finite() || *value < 0.0 {
                *value = fallback;
            }
        }
        if p.max_speed <= 0.0 {
            p.max_speed = defaults.max_speed;
        }
        if p.drift_max >= p.max_speed {
            let fixed = p.max_speed * 0.45;
            log::warn!(
                "drift_max {} must stay below max_speed {}, using {fixed}",
                p.drift_max,
                p.max_speed
            );
            p.drift_max = fixed;
        }
        if p.scatter_max < p.scatter_min {
            p.scatter_max = p.scatter_min;
        }

        cfg.shapes = cfg.shapes.sanitized();
        cfg
    }
}

fn sanitize_side(name: &str, value: f32) -> f32 {
    if !value.is_finite() || value < 1.0 {
        log::warn!("canvas {name} {value} is degenerate, using 1");
        1.0
    } else if value > MAX_CANVAS_SIDE {
        log::warn!("canvas {name} {value} too large, using {MAX_CANVAS_SIDE}");
        MAX_CANVAS_SIDE
    } else {
        value.floor()
    }
}
