//! Bouncing-balls scenario driver.
//!
//! Spawns a population of balls inside an open unit box, steps the
//! simulation each frame, and writes the full per-frame artifact set
//! (rasterized frames, volume slices, scene description, ray trace,
//! points dump) to the output directory. `--preview` plays the animation
//! live in the terminal instead.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use vol3d_core::BallPit;
use vol3d_render::{generate, BouncingBalls, Disabled, PovRay, RayTracer, Scenario};
use vol3d_terminal::{TermRasterizer, TerminalApp};

#[derive(Parser)]
#[command(name = "bouncing-balls")]
#[command(about = "Generate render data for the bouncing-balls animation")]
struct Args {
    /// Number of animation frames.
    #[arg(long, default_value_t = 50)]
    frames: u32,

    /// Number of balls in the cell.
    #[arg(long, default_value_t = 10)]
    balls: usize,

    /// Ball diameter relative to the unit cell.
    #[arg(long, default_value_t = 0.07)]
    diameter: f64,

    /// Output directory for frame data.
    #[arg(long, default_value = "bouncing_balls")]
    out_dir: PathBuf,

    /// Orthographic volume slices per frame.
    #[arg(long, default_value_t = 5)]
    volume_depth: u32,

    /// RNG seed for reproducible runs; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Ray-tracer binary for the ray-traced pass.
    #[arg(long, default_value = "povray")]
    povray: String,

    /// Skip the ray-traced pass (the scene description is still written).
    #[arg(long)]
    no_raytrace: bool,

    /// Play the animation live in the terminal instead of writing frames.
    #[arg(long)]
    preview: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let pit = BallPit::spawn(args.balls, args.diameter, &mut rng);
    let mut scenario = BouncingBalls::new(pit);

    if args.preview {
        let mut app = TerminalApp::new()?;
        app.run(&mut scenario)?;
        return Ok(());
    }

    let mut rasterizer = TermRasterizer::default();
    let ray_tracer: Box<dyn RayTracer> = if args.no_raytrace {
        Box::new(Disabled)
    } else {
        Box::new(PovRay::new(&args.povray))
    };

    for i in 0..args.frames {
        scenario.advance();
        let scene = scenario.scene();
        generate(
            &args.out_dir,
            &scene,
            &i.to_string(),
            args.volume_depth,
            &mut rasterizer,
            ray_tracer.as_ref(),
        )?;
        info!("frame {}/{} written", i + 1, args.frames);
    }

    Ok(())
}
