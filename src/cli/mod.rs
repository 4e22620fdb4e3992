//! Command-line interface for abx-score.
//!
//! Available commands:
//!
//! - **score**: ABX score of every cell in a JSON document
//! - **distance**: pairwise edit-distance matrix between two batches
//!
//! ## Usage
//!
//! ```text
//! # Score cells with unit-cost edit distance
//! abx-score score cells.json
//!
//! # Collapse repeated units and normalize by length, JSON output
//! abx-score score cells.json --collapse-repeats --normalize --format json
//!
//! # Distances within one batch, exploiting symmetry
//! abx-score distance units.json --symmetric
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::distance::edit::{EditDistanceOptions, Normalization};

pub mod distance;
pub mod score;

#[derive(Parser)]
#[command(name = "abx-score")]
#[command(version)]
#[command(about = "ABX discrimination scores for discrete sequence representations")]
#[command(
    long_about = "abx-score evaluates symbolic sequence representations with the ABX task.\n\nFor each cell it computes edit distances from every X item to every A and B item and reports how often X is closer to A than to B:\n- 0 means perfect discrimination\n- 0.5 means chance level"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the ABX score of each cell in a JSON file
    Score(score::ScoreArgs),

    /// Compute the edit-distance matrix between two batches
    Distance(distance::DistanceArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Edit-distance options shared by all commands
#[derive(clap::Args, Debug, Default)]
pub struct EngineArgs {
    /// JSON file with edit-distance options (costs, `collapse_repeats`, normalization)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Collapse runs of repeated symbols before aligning
    #[arg(long)]
    pub collapse_repeats: bool,

    /// Divide each distance by the length of the longer sequence
    #[arg(long)]
    pub normalize: bool,

    /// Cost of substituting one symbol for another
    #[arg(long)]
    pub substitution_cost: Option<f64>,

    /// Cost of inserting a symbol
    #[arg(long)]
    pub insertion_cost: Option<f64>,

    /// Cost of deleting a symbol
    #[arg(long)]
    pub deletion_cost: Option<f64>,

    /// Worker threads for distance computation (0 = one per core)
    #[arg(long, default_value = "0")]
    pub threads: usize,
}

impl EngineArgs {
    /// Options from the config file, overridden by explicit flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn options(&self) -> anyhow::Result<EditDistanceOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => EditDistanceOptions::default(),
        };

        if self.collapse_repeats {
            options.collapse_repeats = true;
        }
        if self.normalize {
            options.normalization = Normalization::MaxLength;
        }
        if let Some(cost) = self.substitution_cost {
            options.costs.substitution = cost;
        }
        if let Some(cost) = self.insertion_cost {
            options.costs.insertion = cost;
        }
        if let Some(cost) = self.deletion_cost {
            options.costs.deletion = cost;
        }

        debug!(?options, "edit distance options");
        Ok(options)
    }

    /// Size the global rayon pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the global pool was already initialized.
    #[cfg(feature = "parallel")]
    pub fn configure_threads(&self) -> anyhow::Result<()> {
        if self.threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build_global()
                .context("Failed to configure thread pool")?;
        }
        Ok(())
    }

    #[cfg(not(feature = "parallel"))]
    pub fn configure_threads(&self) -> anyhow::Result<()> {
        if self.threads > 1 {
            tracing::warn!("built without the parallel feature; ignoring --threads");
        }
        Ok(())
    }
}

/// Format a distance or score without trailing zeros for integral values
pub(crate) fn format_value(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_options_defaults() {
        let options = EngineArgs::default().options().unwrap();
        assert_eq!(options, EditDistanceOptions::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(
            file,
            r#"{{"costs": {{"substitution": 2.0, "insertion": 3.0}}, "normalization": "none"}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let args = EngineArgs {
            config: Some(file.path().to_path_buf()),
            normalize: true,
            insertion_cost: Some(0.5),
            ..EngineArgs::default()
        };
        let options = args.options().unwrap();
        assert_eq!(options.costs.substitution, 2.0);
        assert_eq!(options.costs.insertion, 0.5);
        assert_eq!(options.costs.deletion, 1.0);
        assert_eq!(options.normalization, Normalization::MaxLength);
        assert!(!options.collapse_repeats);
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let args = EngineArgs {
            config: Some(PathBuf::from("/nonexistent/options.json")),
            ..EngineArgs::default()
        };
        assert!(args.options().is_err());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(0.25), "0.25");
    }
}
