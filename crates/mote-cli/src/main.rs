//! Mote CLI - Generate silhouettes and run particle scenarios

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{play, points, render};

#[derive(Parser)]
#[command(name = "mote")]
#[command(about = "Particle fields that form letterforms and icons", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the target points of a shape
    Points {
        /// Shape name (letter, branch, briefcase, kanban, education, gear, branch-history)
        shape: String,

        /// Canvas width in pixels
        #[arg(long, default_value = "800")]
        width: f32,

        /// Canvas height in pixels
        #[arg(long, default_value = "520")]
        height: f32,

        /// Number of points
        #[arg(long, default_value = "2000")]
        count: usize,

        /// Style variant (cap or diploma for education, gear or brackets for gear)
        #[arg(long)]
        style: Option<String>,

        /// Config file supplying shape styles
        #[arg(long)]
        config: Option<String>,

        /// Seed for jitter
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (json or csv)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Run a scenario deterministically and write PNG frames
    Render {
        /// Path to scenario file
        scenario: String,

        /// Simulation config file
        #[arg(long)]
        config: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = "frames")]
        out: String,

        /// Seed overriding the config
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a scenario in real time on the worker thread and write PNG frames
    Play {
        /// Path to scenario file
        scenario: String,

        /// Simulation config file
        #[arg(long)]
        config: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = "frames")]
        out: String,

        /// Write only every n-th frame
        #[arg(long, default_value = "1")]
        every: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose > 0 {
        logger.filter_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    }
    logger.init();

    match cli.command {
        Commands::Points {
            shape,
            width,
            height,
            count,
            style,
            config,
            seed,
            format,
        } => points::run(points::PointsArgs {
            shape,
            width,
            height,
            count,
            style,
            config,
            seed,
            format,
        }),
        Commands::Render {
            scenario,
            config,
            out,
            seed,
        } => render::run(render::RenderArgs {
            scenario,
            config,
            out,
            seed,
        }),
        Commands::Play {
            scenario,
            config,
            out,
            every,
        } => play::run(play::PlayArgs {
            scenario,
            config,
            out,
            every,
        }),
    }
}
