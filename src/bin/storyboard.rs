use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use storyboard_grid::{
    AspectRatio, BoundaryStrategy, GridConfig, Resolution, SplitConfig, SplitManifestEntry,
    SplitOptions,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "storyboard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the grid layout for a scene count.
    Grid(GridArgs),
    /// Check a scene count against the resolution's scene cap.
    Validate(ValidateArgs),
    /// Split a generated contact sheet into per-scene PNGs plus `manifest.json`.
    Split(SplitArgs),
    /// Detect panel bands in an image from its content alone.
    Detect(DetectArgs),
}

#[derive(Parser, Debug)]
struct SheetArgs {
    /// Number of scenes on the sheet.
    #[arg(long)]
    scenes: u32,

    /// Panel aspect ratio (16:9 or 9:16).
    #[arg(long, default_value = "16:9")]
    aspect: AspectRatio,

    /// Resolution tier (2K or 4K).
    #[arg(long, default_value = "2K")]
    resolution: Resolution,
}

#[derive(Parser, Debug)]
struct GridArgs {
    #[command(flatten)]
    sheet: SheetArgs,

    /// Print the grid as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Number of scenes on the sheet.
    #[arg(long)]
    scenes: u32,

    /// Resolution tier (2K or 4K).
    #[arg(long, default_value = "2K")]
    resolution: Resolution,
}

#[derive(Parser, Debug)]
struct SplitArgs {
    /// Contact sheet image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    sheet: SheetArgs,

    /// Split options JSON; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Boundary strategy.
    #[arg(long, value_enum)]
    strategy: Option<StrategyChoice>,

    /// Keep cells classified as empty.
    #[arg(long)]
    keep_empty: bool,

    /// Trim a uniform outer border before splitting.
    #[arg(long)]
    trim_border: bool,

    /// Extract cells in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct DetectArgs {
    /// Image to analyze.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Expected number of panel rows.
    #[arg(long)]
    rows: Option<usize>,

    /// Expected number of panel columns.
    #[arg(long)]
    cols: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyChoice {
    Uniform,
    EnergyDetect,
}

impl From<StrategyChoice> for BoundaryStrategy {
    fn from(choice: StrategyChoice) -> Self {
        match choice {
            StrategyChoice::Uniform => BoundaryStrategy::Uniform,
            StrategyChoice::EnergyDetect => BoundaryStrategy::EnergyDetect,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    source: String,
    scene_count: u32,
    aspect_ratio: AspectRatio,
    resolution: Resolution,
    grid: GridConfig,
    scenes: Vec<ManifestScene>,
}

#[derive(serde::Serialize)]
struct ManifestScene {
    file: String,
    #[serde(flatten)]
    entry: SplitManifestEntry,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Grid(args) => cmd_grid(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Split(args) => cmd_split(args),
        Command::Detect(args) => cmd_detect(args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("storyboard_grid=info,storyboard=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(env_filter)
        .init();
}

fn cmd_grid(args: GridArgs) -> anyhow::Result<()> {
    let SheetArgs {
        scenes,
        aspect,
        resolution,
    } = args.sheet;
    let grid = storyboard_grid::calculate_grid(scenes, aspect, resolution);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        println!("{grid}");
        println!("{}", grid.layout_description(aspect));
        println!(
            "canvas {}x{}, {} cells, {} empty",
            grid.canvas_width, grid.canvas_height, grid.total_cells, grid.empty_cells
        );
    }

    let check = storyboard_grid::validate_scene_count(scenes, resolution);
    if let Some(msg) = check.message {
        eprintln!("warning: {msg}");
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let check = storyboard_grid::validate_scene_count(args.scenes, args.resolution);
    println!("{}", serde_json::to_string_pretty(&check)?);
    if let Some(msg) = check.message {
        anyhow::bail!(msg);
    }
    Ok(())
}

fn read_options_json(path: &Path) -> anyhow::Result<SplitOptions> {
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    let opts: SplitOptions =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse split options JSON")?;
    Ok(opts)
}

fn cmd_split(args: SplitArgs) -> anyhow::Result<()> {
    let mut options = match &args.options {
        Some(path) => read_options_json(path)?,
        None => SplitOptions::default(),
    };
    if let Some(strategy) = args.strategy {
        options.strategy = strategy.into();
    }
    if args.keep_empty {
        options.filter_empty = false;
    }
    if args.trim_border {
        options.trim_border = true;
    }
    if args.parallel {
        options.threading.parallel = true;
    }
    if args.threads.is_some() {
        options.threading.threads = args.threads;
    }

    let SheetArgs {
        scenes,
        aspect,
        resolution,
    } = args.sheet;
    let config = SplitConfig::new(scenes, aspect, resolution).with_options(options);
    let results = storyboard_grid::split_storyboard_file(&args.in_path, &config)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let mut manifest_scenes = Vec::with_capacity(results.len());
    for result in &results {
        let file = format!("scene_{:02}.png", result.id + 1);
        let path = args.out.join(&file);
        let png = result.encode_png()?;
        std::fs::write(&path, png).with_context(|| format!("write png '{}'", path.display()))?;
        manifest_scenes.push(ManifestScene {
            file,
            entry: result.manifest_entry(),
        });
    }

    let manifest = Manifest {
        source: args.in_path.display().to_string(),
        scene_count: scenes,
        aspect_ratio: aspect,
        resolution,
        grid: config.grid(),
        scenes: manifest_scenes,
    };
    let manifest_path = args.out.join("manifest.json");
    let f = File::create(&manifest_path)
        .with_context(|| format!("create manifest '{}'", manifest_path.display()))?;
    serde_json::to_writer_pretty(f, &manifest).with_context(|| "write manifest JSON")?;

    eprintln!("wrote {} scenes to {}", results.len(), args.out.display());
    Ok(())
}

fn cmd_detect(args: DetectArgs) -> anyhow::Result<()> {
    let image = storyboard_grid::open_raster(&args.in_path)?;
    let Some(grid) = storyboard_grid::detect_grid(&image, args.rows, args.cols) else {
        anyhow::bail!("no panel grid found in '{}'", args.in_path.display());
    };
    println!("{}", serde_json::to_string_pretty(&grid)?);
    Ok(())
}
