//! Points command

use super::load_config;
use anyhow::{bail, Context, Result};
use mote_core::{EducationStyle, Point, ShapeKey, ShapeStyles, SkillsStyle};
use mote_shapes::{generate, generate_branch_history, ShapeConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Write;

pub struct PointsArgs {
    pub shape: String,
    pub width: f32,
    pub height: f32,
    pub count: usize,
    pub style: Option<String>,
    pub config: Option<String>,
    pub seed: Option<u64>,
    pub format: String,
}

/// A shape bound to a hover key, or the standalone commit-history graph
#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    Shape(ShapeKey),
    BranchHistory,
}

fn parse_target(name: &str) -> Result<Target> {
    match name.trim().to_ascii_lowercase().as_str() {
        "branch-history" | "branch_history" => Ok(Target::BranchHistory),
        other => Ok(Target::Shape(other.parse()?)),
    }
}

fn apply_style(target: Target, style: &str, styles: &mut ShapeStyles) -> Result<()> {
    match (target, style.trim().to_ascii_lowercase().as_str()) {
        (Target::Shape(ShapeKey::Education), "cap") => styles.education = EducationStyle::Cap,
        (Target::Shape(ShapeKey::Education), "diploma") => {
            styles.education = EducationStyle::Diploma
        }
        (Target::Shape(ShapeKey::Gear), "gear") => styles.gear.variant = SkillsStyle::Gear,
        (Target::Shape(ShapeKey::Gear), "brackets") => {
            styles.gear.variant = SkillsStyle::Brackets
        }
        (_, other) => bail!("Style '{other}' does not apply to {}", describe(target)),
    }
    Ok(())
}

fn describe(target: Target) -> &'static str {
    match target {
        Target::Shape(key) => key.name(),
        Target::BranchHistory => "branch-history",
    }
}

fn format_points(points: &[Point], format: &str) -> Result<String> {
    match format {
        "json" => serde_json::to_string_pretty(points).context("Failed to encode points"),
        "csv" => {
            let mut out = String::from("x,y\n");
            for p in points {
                writeln!(out, "{},{}", p.x, p.y)?;
            }
            Ok(out)
        }
        _ => bail!("Unknown format: {}", format),
    }
}

pub fn run(args: PointsArgs) -> Result<()> {
    let target = parse_target(&args.shape)?;
    let mut styles = load_config(args.config.as_deref())?.shapes.sanitized();
    if let Some(style) = &args.style {
        apply_style(target, style, &mut styles)?;
    }

    let config = ShapeConfig::new(args.width, args.height, args.count);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let points = match target {
        Target::Shape(key) => generate(key, &config, &styles, &mut rng),
        Target::BranchHistory => generate_branch_history(&config, &styles.history, &mut rng),
    };
    log::info!("Generated {} points for {}", points.len(), describe(target));

    println!("{}", format_points(&points, &args.format)?);
    Ok(())
}
