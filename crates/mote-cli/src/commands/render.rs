//! Render command

use super::load_config;
use anyhow::{Context, Result};
use mote_render::PngSequence;
use mote_runtime::{Scenario, SimulationState};

pub struct RenderArgs {
    pub scenario: String,
    pub config: Option<String>,
    pub out: String,
    pub seed: Option<u64>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("Failed to load scenario: {}", args.scenario))?;
    let mut config = load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut state = SimulationState::new(config);
    let dt = 1.0 / f64::from(state.config().frame_rate);
    let frames = PngSequence::new(&args.out)
        .with_context(|| format!("Failed to create output directory: {}", args.out))?;
    state
        .attach_surface(Box::new(frames))
        .context("Failed to attach output surface")?;

    let mut presented = 0;
    let mut ticks = 0u64;
    'frames: for frame in 0..scenario.frames {
        for command in scenario.commands_at(frame) {
            log::info!("Frame {}: {:?}", frame, command);
            if !state.handle(command.into()) {
                break 'frames;
            }
        }
        ticks += u64::from(
            state
                .frame(dt)
                .with_context(|| format!("Failed to render frame {}", frame))?,
        );
        presented += 1;
    }

    println!(
        "Rendered {} frames ({} ticks, {} particles forming) to {}",
        presented,
        ticks,
        state.store().forming_count(),
        args.out
    );
    Ok(())
}
