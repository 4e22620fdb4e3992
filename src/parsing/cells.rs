use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::core::batch::SequenceBatch;
use crate::core::cell::Cell;
use crate::utils::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid cell '{name}': {source}")]
    InvalidCell {
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// A cell together with the label it is reported under.
#[derive(Debug, Clone)]
pub struct NamedCell {
    pub name: String,
    pub cell: Cell,
}

#[derive(Debug, Deserialize)]
struct CellsDocument {
    cells: Vec<CellEntry>,
}

#[derive(Debug, Deserialize)]
struct CellEntry {
    #[serde(default)]
    name: Option<String>,
    a: SequenceBatch,
    b: SequenceBatch,
    #[serde(default)]
    x: Option<SequenceBatch>,
    #[serde(default)]
    is_symmetric: bool,
}

/// Read a cells document from disk.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_cells_text`].
pub fn parse_cells_file(path: &Path) -> Result<Vec<NamedCell>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_cells_text(&content)
}

/// Parse a document of the form `{"cells": [{"a": .., "b": .., "x": .., "is_symmetric": ..}]}`.
///
/// Each batch is either a list of sequences, `{"sequences": [..]}`, or the
/// padded form `{"data": [..], "lengths": [..]}`. A symmetric cell may omit
/// `x`, in which case `a` plays both roles. Unnamed cells are labelled
/// `cell_<index>`.
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON or batches,
/// `ParseError::InvalidFormat` for a non-symmetric cell without `x` or an
/// empty document, and `ParseError::InvalidCell` if a cell fails validation.
pub fn parse_cells_text(text: &str) -> Result<Vec<NamedCell>, ParseError> {
    let document: CellsDocument = serde_json::from_str(text)?;
    if document.cells.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No cells found in document".to_string(),
        ));
    }

    document
        .cells
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let name = entry.name.unwrap_or_else(|| format!("cell_{index}"));
            let a = Arc::new(entry.a);
            let b = Arc::new(entry.b);

            let cell = match (entry.x, entry.is_symmetric) {
                (None, true) => Cell::symmetric(a, b),
                (Some(x), is_symmetric) => Cell::new(a, b, Arc::new(x), is_symmetric)
                    .map_err(|source| ParseError::InvalidCell {
                        name: name.clone(),
                        source,
                    })?,
                (None, false) => {
                    return Err(ParseError::InvalidFormat(format!(
                        "Cell '{name}' has no X collection and is not symmetric"
                    )))
                }
            };

            Ok(NamedCell { name, cell })
        })
        .collect()
}

/// Read a single sequence batch from a JSON file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or `ParseError::Json`
/// if the content is not a valid batch.
pub fn parse_batch_file(path: &Path) -> Result<SequenceBatch, ParseError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
