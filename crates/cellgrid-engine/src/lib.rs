//! cellgrid_engine - Formula evaluation for the cellgrid spreadsheet core.
//!
//! Everything here is pure: [`evaluate`] is a function of the formula text and
//! the [`Sheet`] snapshot it is given.

pub mod builtins;
pub mod engine;
pub mod error;

pub use engine::{Cell, CellRange, CellRef, CellStyle, ERROR_SENTINEL, Sheet, evaluate, try_evaluate};
pub use error::{EvalError, EvalResult};
