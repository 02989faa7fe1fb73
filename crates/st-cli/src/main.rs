mod debug;
mod io;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use seismotrace::{
    FeatureCollection, MaskedImage, MeanlineDetector, MeanlineStats, NoopObserver, OutputMode,
    PipelineObserver, RidgeConfig, RidgeDetector, RidgeOutput, RidgeRecord, RoiCorners,
    TraceParams, endpoint_summaries, meanlines_to_geojson, summaries_to_geojson,
};

use crate::debug::PngDumpObserver;
use crate::io::{
    append_json_line, ensure_file_exists, load_gray_f32, read_json, save_mask, write_csv,
    write_json,
};

#[derive(Parser, Debug)]
#[command(name = "seismotrace")]
#[command(about = "Extract trace ridges and meanlines from scanned recordings")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect horizontal and vertical trace ridges.
    #[command(name = "ridges")]
    Ridges(RidgesArgs),
    /// Detect meanlines inside a region of interest.
    #[command(name = "meanlines")]
    Meanlines(MeanlinesArgs),
    /// Export endpoints of line features as JSON or CSV.
    #[command(name = "coords")]
    Coords(CoordsArgs),
}

#[derive(Args, Debug, Clone)]
struct RidgesArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, required = true)]
    out: PathBuf,
    /// JSON file overriding ridge parameters.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pixels darker than this never hold ridges.
    #[arg(long, default_value_t = 0.0)]
    dark_threshold: f32,
    /// Write per-pixel ridge records as CSV instead of PNG maps.
    #[arg(long)]
    records: bool,
    /// Save intermediate images into this directory.
    #[arg(long)]
    debug: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct MeanlinesArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    /// JSON with `top_left`, `top_right`, `bottom_left`, `bottom_right` as `[x, y]`.
    #[arg(long, required = true)]
    roi: PathBuf,
    #[arg(long, required = true)]
    out: PathBuf,
    /// 1 for a full-size scan, 0.25 for quarter size.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
    /// Append run statistics to this JSON Lines file.
    #[arg(long)]
    stats: Option<PathBuf>,
    #[arg(long)]
    debug: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("target").required(true).args(["output", "output_csv"])))]
struct CoordsArgs {
    /// GeoJSON FeatureCollection of LineStrings.
    #[arg(long, required = true)]
    segments: PathBuf,
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    output_csv: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct StatsRecord<'a> {
    image: String,
    scale: f32,
    #[serde(flatten)]
    stats: &'a MeanlineStats,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Ridges(args) => run_ridges(args),
        Command::Meanlines(args) => run_meanlines(args),
        Command::Coords(args) => run_coords(args),
    }
}

fn debug_observer(dir: Option<&Path>) -> Result<Box<dyn PipelineObserver>> {
    Ok(match dir {
        Some(dir) => Box::new(PngDumpObserver::new(dir)?),
        None => Box::new(NoopObserver),
    })
}

fn prepare_out_dir(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("creating output directory {}", out.display()))
}

fn run_ridges(args: RidgesArgs) -> Result<()> {
    let cfg = match &args.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            RidgeConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RidgeConfig::default(),
    };
    let detector = RidgeDetector::new(cfg).context("building ridge detector")?;

    let img = load_gray_f32(&args.input)?;
    let dark = img.map(|&v| v < args.dark_threshold);
    prepare_out_dir(&args.out)?;
    let observer = debug_observer(args.debug.as_deref())?;

    let mode = if args.records {
        OutputMode::Records
    } else {
        OutputMode::Maps
    };
    let output = detector
        .detect_with_observer(&img, &dark, mode, observer.as_ref())
        .context("detecting ridges")?;

    match output {
        RidgeOutput::Maps {
            horizontal,
            vertical,
        } => {
            save_mask(&args.out.join("horizontal_ridges.png"), &horizontal)?;
            save_mask(&args.out.join("vertical_ridges.png"), &vertical)?;
        }
        RidgeOutput::Records {
            horizontal,
            vertical,
        } => {
            write_records(&args.out.join("ridges_horizontal.csv"), &horizontal)?;
            write_records(&args.out.join("ridges_vertical.csv"), &vertical)?;
        }
    }

    info!("ridges written to {}", args.out.display());
    Ok(())
}

fn write_records(path: &Path, records: &[RidgeRecord]) -> Result<()> {
    write_csv(
        path,
        Some("row,col,sigma,strength"),
        records.iter().map(|r| {
            [
                r.row.to_string(),
                r.col.to_string(),
                r.sigma.to_string(),
                r.strength.to_string(),
            ]
        }),
    )
}

fn run_meanlines(args: MeanlinesArgs) -> Result<()> {
    let params = TraceParams::new(args.scale).context("invalid --scale")?;
    let detector = MeanlineDetector::new(params)?;

    ensure_file_exists(&args.roi, "roi")?;
    let corners: RoiCorners = read_json(&args.roi)?;
    let img = MaskedImage::fully_valid(load_gray_f32(&args.input)?);
    prepare_out_dir(&args.out)?;
    let observer = debug_observer(args.debug.as_deref())?;

    let (lines, stats) = detector
        .detect_with_observer(&img, &corners, observer.as_ref())
        .context("detecting meanlines")?;

    let out_path = args.out.join("meanlines.json");
    write_json(&out_path, &meanlines_to_geojson(&lines))?;
    info!("{} meanlines written to {}", lines.len(), out_path.display());

    if let Some(stats_path) = &args.stats {
        append_json_line(
            stats_path,
            &StatsRecord {
                image: args.input.display().to_string(),
                scale: args.scale,
                stats: &stats,
            },
        )?;
    }
    Ok(())
}

fn run_coords(args: CoordsArgs) -> Result<()> {
    ensure_file_exists(&args.segments, "segments")?;
    let segments: FeatureCollection = read_json(&args.segments)?;
    let summaries = endpoint_summaries(&segments)
        .with_context(|| format!("summarizing {}", args.segments.display()))?;

    if let Some(path) = &args.output {
        write_json(path, &summaries_to_geojson(&summaries))?;
    } else if let Some(path) = &args.output_csv {
        write_csv(
            path,
            None,
            summaries.iter().map(|s| {
                [s.start[0], s.start[1], s.end[0], s.end[1]].map(|v| v.to_string())
            }),
        )?;
    }

    info!("{} segments summarized", summaries.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn coords_requires_one_output() {
        assert!(Cli::try_parse_from(["seismotrace", "coords", "--segments", "s.json"]).is_err());

        let cli = Cli::try_parse_from([
            "seismotrace",
            "coords",
            "--segments",
            "s.json",
            "--output-csv",
            "out.csv",
        ])
        .expect("parse");
        assert!(matches!(cli.cmd, Command::Coords(ref a) if a.output_csv.is_some()));
    }

    #[test]
    fn meanlines_defaults_to_full_scale() {
        let cli = Cli::try_parse_from([
            "seismotrace",
            "meanlines",
            "--input",
            "scan.png",
            "--roi",
            "roi.json",
            "--out",
            "out",
        ])
        .expect("parse");
        let Command::Meanlines(args) = cli.cmd else {
            panic!("expected meanlines");
        };
        assert_eq!(args.scale, 1.0);
        assert!(args.stats.is_none());
    }
}
