use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use softrast::raytracer::{self, RayScene};
use softrast::render::FrameBuffer;
use softrast::{Config, RenderMode, Renderer};

/// Render one frame of a scene to a PNG file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// RON configuration file. Built-in defaults are used when omitted.
    config: Option<PathBuf>,

    /// Output image path.
    #[arg(short, long, default_value = "frame.png")]
    output: PathBuf,

    /// Ray trace the sphere scene regardless of the configured mode.
    #[arg(long)]
    ray_trace: bool,

    /// Print the effective configuration as RON and exit.
    #[arg(long)]
    dump_config: bool,
}

fn render_raster(config: &Config, frame: &mut FrameBuffer) -> softrast::Result<()> {
    let models = config.scene.load_models()?;
    let instances = config.scene.instances(&models)?;
    let camera = config.scene.camera(&config.viewport);

    let mut renderer = Renderer::new(config.viewport, config.settings);
    let stats = renderer.render_scene(&camera, &instances, frame);
    log::info!(
        "rasterized {} of {} instances: {} triangles, {} culled",
        stats.instances_drawn,
        instances.len(),
        stats.triangles_drawn,
        stats.triangles_culled
    );
    Ok(())
}

fn render_ray_traced(config: &Config, frame: &mut FrameBuffer) {
    let scene = RayScene {
        background: config.ray.background,
        ..RayScene::default()
    };
    let camera = config.scene.camera(&config.viewport);
    raytracer::render(&scene, &camera, &config.viewport, config.ray.recursion_depth, frame);
}

fn main() -> softrast::Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.ray_trace {
        config.mode = RenderMode::RayTrace;
    }
    if args.dump_config {
        println!("{}", config.to_ron_string()?);
        return Ok(());
    }

    let mut frame = FrameBuffer::new(config.width, config.height);
    let start = Instant::now();
    match config.mode {
        RenderMode::Raster => render_raster(&config, &mut frame)?,
        RenderMode::RayTrace => render_ray_traced(&config, &mut frame),
    }
    log::info!(
        "{}x{} frame ({:?}) rendered in {:.1?}",
        config.width,
        config.height,
        config.mode,
        start.elapsed()
    );

    frame.save(&args.output)?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}
