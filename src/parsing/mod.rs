//! Readers for the JSON inputs of the command-line tool.
//!
//! Sequences arrive already tokenized as non-negative integers. A batch can be
//! written in any of three forms:
//!
//! | Form | Example |
//! |------|---------|
//! | Bare list | `[[1, 2, 3], [4]]` |
//! | Unpadded | `{"sequences": [[1, 2, 3], [4]]}` |
//! | Padded | `{"data": [[1, 2, 3], [4, 0, 0]], "lengths": [3, 1]}` |
//!
//! In the padded form, positions past each length are filler and never read.
//!
//! ## Example
//!
//! ```rust
//! use abx_score::parsing::cells::parse_cells_text;
//!
//! let cells = parse_cells_text(r#"{"cells": [{"a": [[1, 2]], "b": [[3]], "x": [[1]]}]}"#).unwrap();
//! assert_eq!(cells[0].name, "cell_0");
//! ```

pub mod cells;
