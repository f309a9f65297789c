//! Spinning-cube scenario driver.
//!
//! Renders a diffuse cube completing one full Y-axis revolution over the
//! configured frame count. Frame order matches the animation: each frame
//! is written first, then the rotation advances.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use vol3d_render::{generate, Disabled, PovRay, RayTracer, Scenario, SpinningCube};
use vol3d_terminal::{TermRasterizer, TerminalApp};

#[derive(Parser)]
#[command(name = "spinning-cube")]
#[command(about = "Generate render data for the spinning-cube animation")]
struct Args {
    /// Number of animation frames (one full revolution).
    #[arg(long, default_value_t = 50)]
    frames: u32,

    /// Output directory for frame data.
    #[arg(long, default_value = "spin_cube")]
    out_dir: PathBuf,

    /// Orthographic volume slices per frame.
    #[arg(long, default_value_t = 5)]
    volume_depth: u32,

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
    let mut scenario = SpinningCube::new(args.frames);

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
        scenario.advance();
    }

    Ok(())
}
