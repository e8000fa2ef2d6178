mod config;
mod svg;

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gitviz_core::{records_from_reader, RawCommit};
use gitviz_layout::{LayoutEngine, NoMainPolicy, RenderPlan, RowGeometry};
use tracing::info;

use crate::config::FileConfig;

#[derive(Parser)]
#[command(name = "gitviz")]
#[command(about = "Commit graph layout engine demo", long_about = None)]
struct Cli {
    /// JSON file with an ordered array of commit records (newest first);
    /// stdin when omitted
    #[arg(long, conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Use a built-in scripted history instead of reading records
    #[arg(long)]
    sample: bool,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width of the graph area in pixels
    #[arg(long, default_value_t = 360.0)]
    width: f64,

    /// Override the default row height
    #[arg(long)]
    row_height: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Classify every commit as main-line when no main/master ref exists
    #[arg(long)]
    all_main_when_unrooted: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Summary,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let records = load_records(&cli)?;
    info!(count = records.len(), "commit records loaded");

    let mut classify_options = file_config.classify_options();
    if cli.all_main_when_unrooted {
        classify_options.no_main_policy = NoMainPolicy::AllMainLine;
    }
    let mut path_options = file_config.path_options();
    if let Some(row_height) = cli.row_height {
        path_options.default_row_height = row_height;
    }

    let mut engine = LayoutEngine::new(classify_options);
    engine.update(&records);

    // No measured surface here: every row takes the computed fallback
    // position.
    let geometry = RowGeometry {
        row_ys: Vec::new(),
        header_height: 0.0,
        total_height: records.len() as f64 * path_options.default_row_height,
        width: cli.width,
    };
    let plan = engine.render(&geometry, &path_options);

    match cli.format {
        Format::Svg => print!("{}", svg::document(&plan, &geometry)),
        Format::Summary => print_summary(&engine, &plan),
    }

    Ok(())
}

fn load_records(cli: &Cli) -> Result<Vec<RawCommit>> {
    if cli.sample {
        return Ok(sample_history());
    }
    match &cli.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(records_from_reader(file)?)
        }
        None => Ok(records_from_reader(io::stdin().lock())?),
    }
}

fn print_summary(engine: &LayoutEngine, plan: &RenderPlan) {
    let classification = engine.classification();

    println!("Commit graph layout");
    println!("===================\n");
    match &classification.main_branch {
        Some(name) => println!("Main branch: {name}"),
        None => println!("Main branch: (none)"),
    }
    println!("Main-line commits: {}", classification.main_line.len());
    if !classification.branch_colors.is_empty() {
        println!("Branch lanes:");
        for branch in &classification.branch_colors {
            println!("  lane {}: {} ({})", branch.lane, branch.name, branch.color);
        }
    }
    println!();

    for commit in engine.commits() {
        if let Some(assignment) = classification.lane_of(&commit.id) {
            let marker = if assignment.is_main { "*" } else { " " };
            println!(
                "{marker} lane {}  {}  {}",
                assignment.lane,
                commit.id,
                assignment.branch.as_deref().unwrap_or("-"),
            );
        }
    }
    println!();
    println!("Segments: {}", plan.segments.len());
    println!("Dots: {}", plan.dots.len());
}

/// Scripted demo history: a merged feature branch plus an open topic
/// branch.
fn sample_history() -> Vec<RawCommit> {
    vec![
        RawCommit::new("a9f31c2", "7b02d11 4e77aa0", "HEAD -> main, origin/main"),
        RawCommit::new("4e77aa0", "91d24b3", "feature/login"),
        RawCommit::new("b55f019", "7b02d11", "topic/cleanup"),
        RawCommit::new("91d24b3", "2c91e84", ""),
        RawCommit::new("7b02d11", "2c91e84", ""),
        RawCommit::new("2c91e84", "0d1a77f", ""),
        RawCommit::new("0d1a77f", "", ""),
    ]
}
