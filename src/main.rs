use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use glam::DVec2;

use blueprint_arm::{
    config::{Config, REDUCED_MOTION_ENV, prefers_reduced_motion},
    logger,
    player::Player,
    trace::{self, TraceOptions, parse_point, pixel_surface},
};

#[derive(Parser)]
#[command(version, propagate_version = true)]
#[command(about = "Cursor-driven robot-arm backdrop for the terminal", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/blueprint-arm/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Write logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Level of verbosity.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Animate the arm in this terminal.
    Run {
        #[command(flatten)]
        arm: ArmArgs,
        /// Frames per second.
        #[arg(long)]
        fps: Option<u32>,
    },
    /// Step the engine headless and print one JSON line per frame.
    Trace {
        #[command(flatten)]
        arm: ArmArgs,
        /// Number of frames to simulate.
        #[arg(long, default_value_t = 60)]
        frames: usize,
        /// Surface width in pixels.
        #[arg(long, default_value_t = 1000.0)]
        width: f64,
        /// Surface height in pixels.
        #[arg(long, default_value_t = 1000.0)]
        height: f64,
        /// Pointer position X,Y; repeat for one position per frame.
        #[arg(long = "pointer", value_parser = parse_point)]
        pointer: Vec<DVec2>,
    },
}

#[derive(Args)]
struct ArmArgs {
    /// Hold the arm still and hide the readouts.
    #[arg(long)]
    reduced_motion: bool,
    /// Number of links.
    #[arg(long)]
    segments: Option<usize>,
    /// Length of each link in pixels.
    #[arg(long)]
    segment_length: Option<f64>,
    /// Solver passes per frame.
    #[arg(long)]
    iterations: Option<usize>,
}

impl ArmArgs {
    /// Overlay the flags onto `config` and resolve the motion preference.
    fn apply(&self, config: &mut Config) -> Result<bool> {
        if let Some(segments) = self.segments {
            config.engine.segments = segments;
        }
        if let Some(length) = self.segment_length {
            config.engine.segment_length = length;
        }
        if let Some(iterations) = self.iterations {
            config.engine.iterations = iterations;
        }
        if config.engine.segments == 0 {
            bail!("The arm needs at least one segment");
        }
        if !(config.engine.segment_length.is_finite() && config.engine.segment_length > 0.0) {
            bail!("Segment length must be a positive number");
        }

        let env = std::env::var(REDUCED_MOTION_ENV).ok();
        Ok(prefers_reduced_motion(
            self.reduced_motion,
            env.as_deref(),
            config,
        ))
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    // The player owns the terminal once it starts drawing.
    let interactive = matches!(cli.command, Command::Run { .. });
    logger::init(cli.verbose, cli.log_file.as_deref(), interactive)?;

    let mut config = Config::load(cli.config.as_deref());

    match cli.command {
        Command::Run { arm, fps } => {
            let reduced_motion = arm.apply(&mut config)?;
            if let Some(fps) = fps {
                config.fps = fps;
            }
            log::debug!("{config:#?}");
            Player::new(config, reduced_motion).play()
        }
        Command::Trace {
            arm,
            frames,
            width,
            height,
            pointer,
        } => {
            let reduced_motion = arm.apply(&mut config)?;
            // One pixel per cell: the trace never rasterizes.
            let options = TraceOptions {
                frames,
                surface: pixel_surface(width, height)?,
                pointer,
            };
            let stdout = io::stdout();
            trace::run(&mut stdout.lock(), config.engine, reduced_motion, &options)
        }
    }
}
