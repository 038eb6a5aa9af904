//! Cell data structures for the spreadsheet grid.
//!
//! This module provides the core data types for representing cells:
//! - [`CellStyle`] - Presentation attributes (never read by evaluation)
//! - [`Cell`] - Raw/cached value, formula text and style
//! - [`Sheet`] - Sparse cell map; absent cells read as [`Cell::default`]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::cell_ref::CellRef;

pub const DEFAULT_FONT_SIZE: f64 = 14.0;
pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Presentation attributes of a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    pub font_size: f64,
    pub color: String,
    pub background_color: String,
}

impl Default for CellStyle {
    fn default() -> Self {
        CellStyle {
            bold: false,
            italic: false,
            font_size: DEFAULT_FONT_SIZE,
            color: DEFAULT_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

/// A cell in the spreadsheet grid.
///
/// For formula cells `value` caches the last evaluation result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cell {
    pub value: String,
    pub formula: String,
    pub style: CellStyle,
}

impl Cell {
    pub fn new_literal(value: &str) -> Cell {
        Cell {
            value: value.to_string(),
            ..Cell::default()
        }
    }

    /// Create a formula cell. The cached value starts empty until the store
    /// evaluates it.
    pub fn new_formula(formula: &str) -> Cell {
        Cell {
            formula: formula.to_string(),
            ..Cell::default()
        }
    }

    pub fn has_formula(&self) -> bool {
        !self.formula.is_empty()
    }

    /// Text shown in the editor: the formula if any, else the raw value.
    pub fn to_input_string(&self) -> String {
        if self.has_formula() {
            self.formula.clone()
        } else {
            self.value.clone()
        }
    }
}

/// Sparse cell map observed by the evaluator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    cells: HashMap<CellRef, Cell>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell_ref: &CellRef) -> Option<&Cell> {
        self.cells.get(cell_ref)
    }

    pub fn get_mut(&mut self, cell_ref: &CellRef) -> Option<&mut Cell> {
        self.cells.get_mut(cell_ref)
    }

    /// Read a cell, constructing the default cell when absent.
    pub fn cell_or_default(&self, cell_ref: &CellRef) -> Cell {
        self.cells.get(cell_ref).cloned().unwrap_or_default()
    }

    /// Get the cell for writing, creating a default cell on first write.
    pub fn entry_or_default(&mut self, cell_ref: &CellRef) -> &mut Cell {
        self.cells.entry(cell_ref.clone()).or_default()
    }

    /// Raw value of a cell; `""` when the cell does not exist.
    pub fn raw_value(&self, cell_ref: &CellRef) -> &str {
        self.cells.get(cell_ref).map(|c| c.value.as_str()).unwrap_or("")
    }

    pub fn insert(&mut self, cell_ref: CellRef, cell: Cell) -> Option<Cell> {
        self.cells.insert(cell_ref, cell)
    }

    pub fn contains(&self, cell_ref: &CellRef) -> bool {
        self.cells.contains_key(cell_ref)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellRef, &Cell)> {
        self.cells.iter()
    }

    /// Cell references in row-major order.
    pub fn sorted_refs(&self) -> Vec<CellRef> {
        let mut refs: Vec<CellRef> = self.cells.keys().cloned().collect();
        refs.sort();
        refs
    }

    /// Drain every cell out of the sheet.
    pub fn drain(&mut self) -> impl Iterator<Item = (CellRef, Cell)> + '_ {
        self.cells.drain()
    }
}

impl FromIterator<(CellRef, Cell)> for Sheet {
    fn from_iter<I: IntoIterator<Item = (CellRef, Cell)>>(iter: I) -> Self {
        Sheet {
            cells: iter.into_iter().collect(),
        }
    }
}
