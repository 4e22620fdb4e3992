//! Score command - ABX score of every cell in a JSON document.
//!
//! Each cell is scored independently. Cells with nothing to compare (an empty
//! collection, or a symmetric cell with a single item) are reported and skipped.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::cli::{format_value, EngineArgs, OutputFormat};
use crate::distance::batched::EditDistanceEngine;
use crate::distance::edit::EditDistanceOptions;
use crate::parsing::cells::{parse_cells_file, NamedCell};
use crate::scoring::abx::{AbxScorer, CellScore, ScoreError};

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// JSON file of cells: {"cells": [{"name", "a", "b", "x", "is_symmetric"}]}
    #[arg(required = true)]
    pub cells: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Score of one named cell, or `None` when it was skipped
struct CellRow {
    name: String,
    nx: usize,
    na: usize,
    nb: usize,
    is_symmetric: bool,
    result: Option<CellScore>,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if the input cannot be parsed, the options are invalid,
/// or a cell fails for a reason other than having no triplets.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let options = args.engine.options()?;
    args.engine.configure_threads()?;

    let cells = parse_cells_file(&args.cells)
        .with_context(|| format!("Failed to read cells from {}", args.cells.display()))?;
    if verbose {
        info!(cells = cells.len(), path = %args.cells.display(), "loaded cells");
    }

    let scorer = AbxScorer::new(EditDistanceEngine::new(options)?);
    let rows = score_cells(&scorer, &cells)?;

    match format {
        OutputFormat::Text => print_text(&rows),
        OutputFormat::Json => print_json(&rows, &options)?,
        OutputFormat::Tsv => print_tsv(&rows),
    }

    Ok(())
}

fn score_cells(scorer: &AbxScorer, cells: &[NamedCell]) -> anyhow::Result<Vec<CellRow>> {
    cells
        .iter()
        .map(|named| {
            let cell = &named.cell;
            let result = match scorer.evaluate(cell) {
                Ok(score) => Some(score),
                Err(ScoreError::DegenerateCell { nx, na, nb }) => {
                    warn!(cell = %named.name, nx, na, nb, "skipping cell with no triplets");
                    None
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to score cell '{}'", named.name))
                }
            };

            Ok(CellRow {
                name: named.name.clone(),
                nx: cell.x.len(),
                na: cell.a.len(),
                nb: cell.b.len(),
                is_symmetric: cell.is_symmetric,
                result,
            })
        })
        .collect()
}

fn print_text(rows: &[CellRow]) {
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);

    println!("\nABX scores ({} cells):\n", rows.len());
    for row in rows {
        let kind = if row.is_symmetric { ", symmetric" } else { "" };
        match &row.result {
            Some(result) => println!(
                "   {:<name_width$}  {:.4}  ({} X, {} A, {} B; {} triplets, {} ties{kind})",
                row.name, result.score, row.nx, row.na, row.nb, result.triplets, result.ties,
            ),
            None => println!(
                "   {:<name_width$}  skipped  ({} X, {} A, {} B{kind}; no triplets)",
                row.name, row.nx, row.na, row.nb,
            ),
        }
    }
}

fn print_json(rows: &[CellRow], options: &EditDistanceOptions) -> anyhow::Result<()> {
    let cells: Vec<_> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "name": row.name,
                "nx": row.nx,
                "na": row.na,
                "nb": row.nb,
                "is_symmetric": row.is_symmetric,
                "skipped": row.result.is_none(),
                "result": row.result,
            })
        })
        .collect();

    let output = serde_json::json!({
        "options": options,
        "cells": cells,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(rows: &[CellRow]) {
    println!("name\tnx\tna\tnb\tsymmetric\tscore\ttriplets\tcorrect\tties");
    for row in rows {
        let (score, triplets, correct, ties) = match &row.result {
            Some(r) => (
                format_value(r.score),
                r.triplets.to_string(),
                r.correct.to_string(),
                r.ties.to_string(),
            ),
            None => ("NA".to_string(), "0".to_string(), "0".to_string(), "0".to_string()),
        };
        println!(
            "{}\t{}\t{}\t{}\t{}\t{score}\t{triplets}\t{correct}\t{ties}",
            row.name, row.nx, row.na, row.nb, row.is_symmetric,
        );
    }
}
