//! Play command

use super::load_config;
use anyhow::{Context, Result};
use mote_render::PngSequence;
use mote_runtime::{Command, Host, Scenario};
use std::thread;
use std::time::Duration;

pub struct PlayArgs {
    pub scenario: String,
    pub config: Option<String>,
    pub out: String,
    pub every: u64,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("Failed to load scenario: {}", args.scenario))?;
    let config = load_config(args.config.as_deref())?;
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.frame_rate.max(1.0)));

    let frames = PngSequence::new(&args.out)
        .with_context(|| format!("Failed to create output directory: {}", args.out))?
        .with_stride(args.every);
    let host = Host::spawn().context("Failed to spawn worker thread")?;
    host.init(Box::new(frames), config);

    'frames: for frame in 0..scenario.frames {
        for command in scenario.commands_at(frame) {
            log::info!("Frame {}: {:?}", frame, command);
            host.send(command.into());
            if command == Command::Dispose {
                break 'frames;
            }
        }
        if host.is_finished() {
            log::warn!("Worker stopped at frame {}", frame);
            break;
        }
        thread::sleep(frame_time);
    }

    host.dispose();
    host.join();
    println!("Wrote frames to {}", args.out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_plays_scenario_on_worker_and_writes_frames() {
        let dir = tempfile::tempdir().unwrap();
        let scenario = dir.path().join("scenario.toml");
        fs::write(
            &scenario,
            r#"
frames = 8

[[events]]
at_frame = 2
command = { type = "hover", letter = true }
"#,
        )
        .unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, "width = 40\nheight = 30\nparticle_count = 20\nframe_rate = 120\n")
            .unwrap();
        let out = dir.path().join("frames");

        run(PlayArgs {
            scenario: scenario.to_string_lossy().into_owned(),
            config: Some(config.to_string_lossy().into_owned()),
            out: out.to_string_lossy().into_owned(),
            every: 1,
        })
        .unwrap();

        assert!(out.is_dir());
        assert!(out.join("frame_00000.png").exists());
    }
}
