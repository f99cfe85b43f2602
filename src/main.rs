//! Renders one of the built-in scenes to PNG images.

use clap::Parser;
use fieldline::camera::Viewpoint;
use fieldline::options::RenderOptions;
use fieldline::options::variables::{HEIGHT, ORBIT_FRAMES, STEP, WIDTH};
use fieldline::render::heatmap::Heatmap;
use fieldline::scenes::Scene;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use strum::IntoEnumIterator;

// Lines of scenes without a natural end can stay inside some orbit camera's frame forever.
const DEFAULT_MAX_STEPS: usize = 20_000;
const HEATMAP_GAMMA: f64 = 1.0;

/// Traces field lines of a built-in scene and renders them to PNG images
#[derive(Parser)]
#[command(name = "fieldline")]
struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value_t = Scene::Tetrahedron)]
    scene: Scene,

    /// Output image for a single frame, or file name prefix for an orbit
    #[arg(short, long, default_value = "fieldline")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(short = 'W', long, default_value_t = WIDTH.default)]
    width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long, default_value_t = HEIGHT.default)]
    height: u32,

    /// Runge-Kutta step length
    #[arg(long, default_value_t = STEP.default)]
    step: f64,

    /// Number of cameras on the orbit; 1 renders a single image from +z
    #[arg(short, long, default_value_t = ORBIT_FRAMES.default)]
    frames: usize,

    /// Tilt of the camera orbit in degrees [default: per scene, 0 for a single frame]
    #[arg(long)]
    roll: Option<f64>,

    /// Fading exponent applied to normalized field strength [default: per scene]
    #[arg(long)]
    gamma: Option<f64>,

    /// Stroke width in pixels [default: per scene]
    #[arg(long)]
    line_width: Option<f32>,

    /// Upper bound on integration steps per field line
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Stop following a line in a frame once it has left that frame
    #[arg(long)]
    latch: bool,

    /// Seed for line colours; random when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Image whose first row is used as the glyph colour ramp
    #[arg(long)]
    heatmap: Option<PathBuf>,

    /// List the available scenes and exit
    #[arg(long)]
    list: bool,
}

fn main() -> fieldline::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for scene in Scene::iter() {
            let properties = scene.properties();
            println!("{scene:<16} {}: {}", properties.name, properties.description);
        }
        return Ok(());
    }

    let properties = args.scene.properties();
    // a lone frame stays on the plain +z camera unless a roll is asked for
    let roll = match args.frames {
        1 => args.roll.unwrap_or(0.0),
        _ => args.roll.unwrap_or(properties.roll_degrees),
    };
    let viewpoint = Viewpoint::orbit(roll, args.frames);
    let output = match viewpoint {
        Viewpoint::Fixed(_) if args.output.extension().is_none() => {
            args.output.with_extension("png")
        }
        _ => args.output,
    };
    let opts = RenderOptions {
        output,
        width: args.width,
        height: args.height,
        step: args.step,
        line_width: args.line_width.unwrap_or(properties.line_width),
        fading_gamma: args.gamma.unwrap_or(properties.fading_gamma),
        viewpoint,
        max_steps: Some(args.max_steps),
        latch_out_of_bounds: args.latch,
    };

    let heatmap = args
        .heatmap
        .as_deref()
        .map(|path| Heatmap::load(path, HEATMAP_GAMMA))
        .transpose()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!("rendering {} ({} frames)", properties.name, opts.camera_count());
    for path in args.scene.render(&opts, &mut rng, heatmap.as_ref())? {
        println!("{}", path.display());
    }
    Ok(())
}
