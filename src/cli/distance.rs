//! Distance command - edit-distance matrix between two sequence batches.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{format_value, EngineArgs, OutputFormat};
use crate::core::matrix::DistanceMatrix;
use crate::distance::batched::EditDistanceEngine;
use crate::parsing::cells::parse_batch_file;

/// Arguments for the distance command
#[derive(Args)]
pub struct DistanceArgs {
    /// Batch of row sequences (JSON)
    #[arg(required = true)]
    pub x: PathBuf,

    /// Batch of column sequences (JSON); defaults to the first batch
    pub y: Option<PathBuf>,

    /// Both batches hold the same sequences: align the upper triangle only
    /// and mirror it
    #[arg(long)]
    pub symmetric: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Execute the distance command
///
/// # Errors
///
/// Returns an error if a batch cannot be read, the options are invalid, or a
/// symmetric request is made for batches that differ.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: DistanceArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let options = args.engine.options()?;
    args.engine.configure_threads()?;

    let x = parse_batch_file(&args.x)
        .with_context(|| format!("Failed to read batch {}", args.x.display()))?;
    let y = match &args.y {
        Some(path) => Some(
            parse_batch_file(path)
                .with_context(|| format!("Failed to read batch {}", path.display()))?,
        ),
        None => None,
    };
    let y_ref = y.as_ref().unwrap_or(&x);

    if verbose {
        info!(rows = x.len(), cols = y_ref.len(), symmetric = args.symmetric, "loaded batches");
    }

    let engine = EditDistanceEngine::new(options)?;
    let distances = engine
        .batched_edit_distance(&x, y_ref, args.symmetric)
        .context("Failed to compute distances")?;

    match format {
        OutputFormat::Text => print_text(&distances),
        OutputFormat::Json => print_json(&distances, args.symmetric)?,
        OutputFormat::Tsv => print_tsv(&distances),
    }

    Ok(())
}

fn print_text(distances: &DistanceMatrix) {
    let (rows, cols) = distances.shape();
    println!("\nEdit distances ({rows} x {cols}):\n");

    let cells: Vec<Vec<String>> = (0..rows)
        .map(|i| distances.row(i).iter().map(|&d| format_value(d)).collect())
        .collect();
    let width = cells.iter().flatten().map(String::len).max().unwrap_or(1);

    for (i, row) in cells.iter().enumerate() {
        let line: Vec<String> = row.iter().map(|c| format!("{c:>width$}")).collect();
        println!("   {i:>4}: {}", line.join("  "));
    }
}

fn print_json(distances: &DistanceMatrix, symmetric: bool) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "rows": distances.rows(),
        "cols": distances.cols(),
        "symmetric": symmetric,
        "distances": distances.to_rows(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(distances: &DistanceMatrix) {
    for i in 0..distances.rows() {
        let line: Vec<String> = distances.row(i).iter().map(|&d| format_value(d)).collect();
        println!("{}", line.join("\t"));
    }
}
