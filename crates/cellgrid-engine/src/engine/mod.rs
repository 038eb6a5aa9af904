//! Spreadsheet engine API.
//!
//! This module provides the formula evaluator for the spreadsheet:
//!
//! - [`Cell`], [`CellStyle`], [`Sheet`] - Data structures for cell storage
//! - [`CellRef`], [`CellRange`] - Identifier and range parsing (A1 notation ↔ indices)
//! - [`evaluate`] - Evaluate cell text against a sheet snapshot
//! - [`references_cell`], [`mentions_cell_text`] - Ask whether a formula names a cell
//! - [`coerce_number`], [`format_number`] - Numeric coercion and display

mod arith;
mod cell;
mod cell_ref;
mod deps;
mod eval;
mod format;
mod range;

pub use arith::{MAX_DEPTH, eval_arithmetic};
pub use cell::{
    Cell, CellStyle, DEFAULT_BACKGROUND_COLOR, DEFAULT_COLOR, DEFAULT_FONT_SIZE, Sheet,
};
pub use cell_ref::CellRef;
pub use deps::{Reference, extract_references, mentions_cell_text, references_cell};
pub use eval::{ERROR_SENTINEL, evaluate, try_evaluate};
pub use format::{coerce_number, format_number, is_numeric_text, parse_leading_float};
pub use range::{CellRange, MAX_RANGE_CELLS};
