//! Formula evaluation errors.
//!
//! These never reach the sheet: [`crate::engine::evaluate`] folds every variant
//! into the `#ERROR!` sentinel. They exist for diagnostics and logging.

use thiserror::Error;

/// Result type for formula evaluation.
pub type EvalResult<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    /// Malformed arithmetic expression
    #[error("Parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// Character or word the arithmetic grammar does not accept
    #[error("Unexpected token '{token}' at offset {offset}")]
    UnexpectedToken { offset: usize, token: String },

    /// Function argument of the wrong shape (e.g. `SUM(A1)`)
    #[error("Invalid argument for {function}: '{argument}'")]
    BadArgument { function: String, argument: String },

    /// Range that would expand to too many cells
    #[error("Range {range} spans {cells} cells (max {max})")]
    RangeTooLarge {
        range: String,
        cells: usize,
        max: usize,
    },

    /// Division by zero, overflow or NaN
    #[error("Result is not a finite number")]
    NonFinite,

    /// Parenthesis or unary nesting beyond the parser limit
    #[error("Expression nested deeper than {0} levels")]
    TooDeep(usize),
}
