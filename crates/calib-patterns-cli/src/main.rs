//! Command-line generator for chessboard and circle-grid calibration
//! patterns sized for print sheets or screens.

use clap::{Parser, ValueEnum};
use log::{info, warn, LevelFilter};
use std::path::PathBuf;

use calib_patterns_core::{init_with_level, Medium, PatternKind, PatternSpec, RenderOptions};
use calib_patterns_print::{write_png, PatternJob};

mod show;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "calib-patterns")]
#[command(about = "Generate print- or screen-sized camera calibration patterns as PNG")]
#[command(version)]
struct Cli {
    /// Target medium the pattern is sized for.
    #[arg(short, long, value_enum, default_value_t = MediumArg::Screen)]
    medium: MediumArg,

    /// Calibration pattern type.
    #[arg(short, long, value_enum, default_value_t = PatternTypeArg::Chessboard)]
    pattern_type: PatternTypeArg,

    /// Pattern columns: inner corners for chessboards, circles otherwise.
    #[arg(short, long, default_value_t = 9)]
    cols: u32,

    /// Pattern rows.
    #[arg(short, long, default_value_t = 6)]
    rows: u32,

    /// Grid size in millimeters.
    #[arg(short, long, default_value_t = 5.0)]
    grid_size: f64,

    /// Square side or circle diameter in millimeters.
    #[arg(short, long, default_value_t = 5.0)]
    shape_size: f64,

    /// Screen width in pixels, or sheet width in millimeters for print.
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Screen height in pixels, or sheet height in millimeters for print.
    #[arg(long, default_value_t = 1080.0)]
    height: f64,

    /// Diagonal screen size in inches (screen medium only).
    #[arg(short = 'd', long, default_value_t = 5.0)]
    screen_size: f64,

    /// Print density in dots per inch (print medium only).
    #[arg(long, default_value_t = 300.0)]
    dpi: f64,

    /// Skip the 1-px frame around the pattern extent.
    #[arg(long)]
    no_frame: bool,

    /// Open the written PNG in the platform image viewer.
    #[arg(long)]
    show: bool,

    /// Directory the PNG is written into.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Render a job loaded from a JSON file instead of the flag surface.
    #[arg(
        long,
        conflicts_with_all = [
            "medium", "pattern_type", "cols", "rows", "grid_size", "shape_size",
            "width", "height", "screen_size", "dpi", "no_frame",
        ]
    )]
    config: Option<PathBuf>,

    /// Write the effective job JSON to this path for later --config reuse.
    #[arg(long)]
    dump_config: Option<PathBuf>,

    /// Log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MediumArg {
    Screen,
    Print,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PatternTypeArg {
    Chessboard,
    #[value(name = "circlegrid")]
    CircleGrid,
    #[value(name = "asymcirclegrid")]
    AsymCircleGrid,
}

impl PatternTypeArg {
    fn to_core(self) -> PatternKind {
        match self {
            Self::Chessboard => PatternKind::Chessboard,
            Self::CircleGrid => PatternKind::CircleGrid,
            Self::AsymCircleGrid => PatternKind::AsymCircleGrid,
        }
    }
}

fn pixel_dimension(flag: &str, value: f64) -> CliResult<u32> {
    if !value.is_finite() || value <= 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(format!("{flag} must be a positive whole number of pixels, got {value}").into());
    }
    Ok(value as u32)
}

impl Cli {
    fn medium(&self) -> CliResult<Medium> {
        match self.medium {
            MediumArg::Print => Ok(Medium::Print {
                sheet_width_mm: self.width,
                sheet_height_mm: self.height,
                dpi: self.dpi,
            }),
            MediumArg::Screen => Ok(Medium::Screen {
                width_px: pixel_dimension("--width", self.width)?,
                height_px: pixel_dimension("--height", self.height)?,
                diagonal_in: self.screen_size,
            }),
        }
    }

    fn pattern(&self) -> PatternSpec {
        PatternSpec {
            kind: self.pattern_type.to_core(),
            cols: self.cols,
            rows: self.rows,
            grid_size_mm: self.grid_size,
            shape_size_mm: self.shape_size,
        }
    }

    fn job(&self) -> CliResult<PatternJob> {
        if let Some(path) = &self.config {
            return Ok(PatternJob::load_json(path)?);
        }

        let mut job = PatternJob::new(self.pattern(), self.medium()?);
        job.options = RenderOptions {
            frame: !self.no_frame,
        };
        Ok(job)
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_with_level(cli.log_level())?;

    let job = cli.job()?;
    let rendered = job.run()?;

    std::fs::create_dir_all(&cli.out_dir)?;
    let path = cli.out_dir.join(job.artifact_file_name());
    write_png(&rendered.canvas, &path)?;
    info!(
        "wrote {}x{} px pattern ({:.1} px/inch) to {}",
        rendered.canvas.width,
        rendered.canvas.height,
        rendered.raster.density,
        path.display()
    );

    if let Some(config_path) = &cli.dump_config {
        job.write_json(config_path)?;
        info!("wrote job JSON to {}", config_path.display());
    }

    if cli.show {
        if let Err(err) = show::open_in_viewer(&path) {
            warn!("could not open an image viewer: {err}");
        }
    }

    Ok(())
}
