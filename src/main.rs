// Import the clap Parser derive macro for CLI argument parsing
use clap::Parser;

// Import our library types
use planar_shapes::{DemoConfig, ImageCanvas, Phase, Registry, Scene};

// Import indicatif for progress bars
use indicatif::{ProgressBar, ProgressStyle};

// Rayon turns `iter()` into `par_iter()` for the phase renders
use rayon::prelude::*;

// Import standard library modules
use std::fs;
use std::path::{Path, PathBuf};

/// Planar Shapes Demo - draw every shape kind and replay a transform script
///
/// For each phase the untouched scene is drawn in one color and the
/// transformed scene in another, and the result is written as a PNG. Shape
/// descriptions and live-instance counts are printed along the way.
///
/// **Rust Concept: Derive macros for CLI parsing**
/// The `#[derive(Parser)]` macro automatically generates argument parsing code
/// The doc comments become help text!
#[derive(Parser)]
#[command(name = "planar-shapes")]
#[command(about = "Draw and transform planar shapes", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a TOML config file (canvas, shapes, phases)
    ///
    /// Without one the built-in demo scene and script are used.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the phase images
    ///
    /// Overrides `output_dir` from the config file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Canvas width in pixels (overrides the config file)
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (overrides the config file)
    #[arg(long)]
    height: Option<u32>,

    /// Number of threads for parallel processing
    ///
    /// Limits Rayon's thread pool size. By default, uses all available CPU cores.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Print shape descriptions and counts without writing any images
    #[arg(long)]
    describe_only: bool,
}

/// What one rendered phase produced
struct PhaseReport {
    name: String,
    path: PathBuf,
    descriptions: Vec<String>,
}

/// Main entry point for the CLI application
///
/// **Rust Concept: Result and error handling**
/// The `?` operator inside `run()` propagates errors up to here, where they
/// are printed once and turned into a non-zero exit code.
fn main() {
    // `RUST_LOG=debug` shows scene-level logs, `RUST_LOG=trace` every
    // registry change
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Run the demo with given arguments
///
/// **Rust Concept: Box<dyn Error>**
/// Config errors, shape errors, I/O errors and image errors all implement
/// `Error`, so one boxed return type covers every way this can fail.
fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Step 0: Configure Rayon thread pool if thread limit is specified
    if let Some(num_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        log::info!("using {} thread(s) for phase rendering", num_threads);
    }

    // Step 1: Load configuration and apply CLI overrides
    let mut config = match &args.config {
        Some(path) => {
            println!("Loading config: {}", path.display());
            DemoConfig::load(path)?
        }
        None => DemoConfig::default(),
    };
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }
    config.validate()?;

    // Step 2: Build the scene once and describe it
    let registry = Registry::global();
    let scene = config.build_scene(registry)?;

    println!("\nScene ({} shapes):", scene.len());
    for line in scene.describe_all() {
        println!("  {}", line);
    }
    println!("\nLive instances: {}", registry);

    if args.describe_only {
        return Ok(());
    }

    // Step 3: Output directory and the untouched scene
    fs::create_dir_all(&config.output_dir)?;
    let (width, height) = (config.canvas.width, config.canvas.height);
    let original_path = config.output_dir.join("phase_00_original.png");
    scene
        .render(width, height, config.canvas.background, config.canvas.original)
        .save(&original_path)?;
    println!("Saved {}", original_path.display());

    // Step 4: Render every phase in parallel
    let pb = ProgressBar::new(config.phases.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | {msg}")?
            .progress_chars("=>-"),
    );

    // Errors cross threads as strings; `Box<dyn Error>` is not `Send`
    let reports: Vec<PhaseReport> = config
        .phases
        .par_iter()
        .enumerate()
        .map(|(index, phase)| {
            let report = render_phase(&config, index + 1, phase).map_err(|e| e.to_string());
            pb.set_message(phase.name.clone());
            pb.inc(1);
            report
        })
        .collect::<Result<_, String>>()?;

    pb.finish_with_message("All phases rendered");

    // Step 5: Print the results in script order
    for report in &reports {
        println!("\nAfter {}:", report.name);
        for line in &report.descriptions {
            println!("  {}", line);
        }
        println!("  -> {}", report.path.display());
    }

    // Every phase scene has been dropped again, only the base scene is live
    println!("\nLive instances: {}", registry);
    println!("Output directory: {}", config.output_dir.display());

    Ok(())
}

/// Render one phase: the original scene plus a transformed copy, both built
/// fresh so phases never accumulate
fn render_phase(
    config: &DemoConfig,
    index: usize,
    phase: &Phase,
) -> Result<PhaseReport, Box<dyn std::error::Error>> {
    let registry = Registry::global();
    let original: Scene = config.build_scene(registry)?;
    let mut transformed: Scene = config.build_scene(registry)?;
    transformed.apply(&phase.transform);
    log::info!("phase {} ({}): {}", index, phase.name, phase.transform);

    let canvas_config = &config.canvas;
    let mut canvas =
        ImageCanvas::new(canvas_config.width, canvas_config.height, canvas_config.background);
    original.draw(&mut canvas, canvas_config.original);
    transformed.draw(&mut canvas, canvas_config.transformed);

    let path = phase_path(&config.output_dir, index, &phase.name);
    canvas.save(&path)?;

    Ok(PhaseReport {
        name: phase.name.clone(),
        path,
        descriptions: transformed.describe_all(),
    })
}

/// `phase_01_move.png`, with anything unusual in the name replaced by `_`
fn phase_path(output_dir: &Path, index: usize, name: &str) -> PathBuf {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    output_dir.join(format!("phase_{:02}_{}.png", index, slug))
}
