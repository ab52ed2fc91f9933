//! CLI command implementations

pub mod play;
pub mod points;
pub mod render;

use anyhow::{Context, Result};
use mote_core::SimConfig;

/// Load a simulation config, or the defaults when no path is given
pub fn load_config(path: Option<&str>) -> Result<SimConfig> {
    match path {
        Some(path) => {
            let config = SimConfig::load(path)
                .with_context(|| format!("Failed to load config {path}"))?;
            config.validate().context("Invalid config")?;
            Ok(config)
        }
        None => Ok(SimConfig::default()),
    }
}
