//! Rectangular cell ranges (`A1:B5`).

use std::fmt;

use super::cell_ref::CellRef;
use crate::error::{EvalError, EvalResult};

/// Upper bound on the number of cells a range may expand to.
pub const MAX_RANGE_CELLS: usize = 1_000_000;

/// A `start:end` span. Bounds are kept as written; a range whose end lies
/// before its start on either axis expands to no cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn new(start: CellRef, end: CellRef) -> Self {
        CellRange { start, end }
    }

    /// Parse a range like "A1:B5". Surrounding whitespace is ignored.
    pub fn parse(range: &str) -> Option<CellRange> {
        let (start, end) = range.trim().split_once(':')?;
        let start = CellRef::from_str(start.trim())?;
        let end = CellRef::from_str(end.trim())?;
        Some(CellRange::new(start, end))
    }

    pub fn row_count(&self) -> usize {
        (self.end.row + 1).saturating_sub(self.start.row)
    }

    pub fn col_count(&self) -> usize {
        (self.end.col + 1).saturating_sub(self.start.col)
    }

    /// Number of cells, or None on overflow.
    pub fn cell_count(&self) -> Option<usize> {
        self.row_count().checked_mul(self.col_count())
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }

    /// Expand to cell references in row-major order.
    pub fn cells(&self) -> EvalResult<Vec<CellRef>> {
        let count = self.cell_count().unwrap_or(usize::MAX);
        if count > MAX_RANGE_CELLS {
            return Err(EvalError::RangeTooLarge {
                range: self.to_string(),
                cells: count,
                max: MAX_RANGE_CELLS,
            });
        }

        let mut cells = Vec::with_capacity(count);
        for row in self.start.row..=self.end.row {
            for col in self.start.col..=self.end.col {
                cells.push(CellRef::new(col, row));
            }
        }
        Ok(cells)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
