use super::SheetStore;
use super::state::CellUpdate;
use crate::error::{CellgridError, Result};
use cellgrid_engine::engine::{Cell, CellRef, CellStyle, Sheet, evaluate};
use log::{debug, trace};
use std::collections::HashSet;

/// Dimension for row/column operations
#[derive(Copy, Clone)]
enum Dimension {
    Row,
    Column,
}

impl Dimension {
    /// Get the coordinate value from a CellRef for this dimension
    fn get_coord(&self, cell_ref: &CellRef) -> usize {
        match self {
            Dimension::Row => cell_ref.row,
            Dimension::Column => cell_ref.col,
        }
    }

    /// Create a new CellRef with modified coordinate in this dimension
    fn new_cell_ref(&self, cell_ref: &CellRef, new_coord: usize) -> CellRef {
        match self {
            Dimension::Row => CellRef::new(cell_ref.col, new_coord),
            Dimension::Column => CellRef::new(new_coord, cell_ref.row),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Dimension::Row => "Row",
            Dimension::Column => "Column",
        }
    }
}

/// Partial style change; `None` fields keep the cell's current attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StylePatch {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub background_color: Option<String>,
}

impl StylePatch {
    fn apply_to(&self, style: &mut CellStyle) {
        if let Some(bold) = self.bold {
            style.bold = bold;
        }
        if let Some(italic) = self.italic {
            style.italic = italic;
        }
        if let Some(font_size) = self.font_size {
            style.font_size = font_size;
        }
        if let Some(color) = &self.color {
            style.color = color.clone();
        }
        if let Some(background_color) = &self.background_color {
            style.background_color = background_color.clone();
        }
    }
}

/// Remove the cells on line `at` and move every later cell back by one.
fn remove_line(sheet: &mut Sheet, dim: Dimension, at: usize) {
    let cells: Vec<(CellRef, Cell)> = sheet.drain().collect();
    for (cell_ref, cell) in cells {
        let coord = dim.get_coord(&cell_ref);
        if coord == at {
            continue;
        }
        let new_ref = if coord > at {
            dim.new_cell_ref(&cell_ref, coord - 1)
        } else {
            cell_ref
        };
        sheet.insert(new_ref, cell);
    }
}

impl SheetStore {
    /// Merge `update` into a cell and recompute what depends on it.
    ///
    /// A non-empty formula in the update is evaluated into the cell's value.
    /// Afterwards every other formula cell that mentions this cell is
    /// re-evaluated once (no transitive chase). Returns the re-evaluated
    /// dependents in row-major order.
    pub fn update_cell(&mut self, cell_ref: &CellRef, update: CellUpdate) -> Vec<CellRef> {
        let mut sheet = self.working_copy();
        let formula_updated = update.formula.is_some();

        let cell = sheet.entry_or_default(cell_ref);
        if let Some(value) = update.value {
            cell.value = value;
        }
        if let Some(formula) = update.formula {
            cell.formula = formula;
        }
        if let Some(style) = update.style {
            cell.style = style;
        }
        let formula = cell.formula.clone();

        if formula_updated && !formula.is_empty() {
            let value = evaluate(&formula, &sheet);
            sheet.entry_or_default(cell_ref).value = value;
        }

        let recomputed = self.propagate(&mut sheet, cell_ref);
        self.publish(sheet);
        recomputed
    }

    /// Commit editor text: formulas start with `=`, anything else is a literal.
    pub fn commit_input(&mut self, cell_ref: &CellRef, input: &str) -> Vec<CellRef> {
        let formula = if input.starts_with('=') { input } else { "" };
        self.update_cell(
            cell_ref,
            CellUpdate {
                value: Some(input.to_string()),
                formula: Some(formula.to_string()),
                style: None,
            },
        )
    }

    /// Single propagation pass. All dependents see the same post-edit sheet,
    /// so the order they are visited in does not matter.
    fn propagate(&self, sheet: &mut Sheet, changed: &CellRef) -> Vec<CellRef> {
        let mode = self.propagation;
        let snapshot: &Sheet = sheet;
        let mut updates: Vec<(CellRef, String)> = snapshot
            .iter()
            .filter(|(r, c)| *r != changed && c.has_formula() && mode.mentions(&c.formula, changed))
            .map(|(r, c)| (r.clone(), evaluate(&c.formula, snapshot)))
            .collect();
        updates.sort_by(|a, b| a.0.cmp(&b.0));

        let mut recomputed = Vec::with_capacity(updates.len());
        for (cell_ref, value) in updates {
            trace!("recomputed {} after edit to {}: {:?}", cell_ref, changed, value);
            if let Some(cell) = sheet.get_mut(&cell_ref) {
                cell.value = value;
            }
            recomputed.push(cell_ref);
        }
        recomputed
    }

    /// Value to render: the literal, or the cached result of a formula.
    pub fn display_value(&self, cell_ref: &CellRef) -> String {
        self.sheet.raw_value(cell_ref).to_string()
    }

    /// Evaluate a cell's formula live against the current sheet.
    pub fn evaluate_cell(&self, cell_ref: &CellRef) -> String {
        match self.sheet.get(cell_ref) {
            Some(cell) if cell.has_formula() => evaluate(&cell.formula, &self.sheet),
            Some(cell) => cell.value.clone(),
            None => String::new(),
        }
    }

    /// Merge a style change into the active cell of the selection.
    pub fn apply_formatting(&mut self, patch: StylePatch) -> Vec<CellRef> {
        let active = self.selection.active.to_cell_ref();
        let mut style = self.sheet.cell_or_default(&active).style;
        patch.apply_to(&mut style);
        self.update_cell(
            &active,
            CellUpdate {
                style: Some(style),
                ..Default::default()
            },
        )
    }

    pub fn add_row(&mut self) {
        self.rows += 1;
        self.modified = true;
    }

    pub fn add_column(&mut self) {
        self.cols += 1;
        self.modified = true;
    }

    pub fn delete_row(&mut self, at_row: usize) -> Result<()> {
        self.delete_dimension(Dimension::Row, at_row)
    }

    pub fn delete_column(&mut self, at_col: usize) -> Result<()> {
        self.delete_dimension(Dimension::Column, at_col)
    }

    fn dimension_count(&mut self, dim: Dimension) -> &mut usize {
        match dim {
            Dimension::Row => &mut self.rows,
            Dimension::Column => &mut self.cols,
        }
    }

    /// Generic delete operation for row or column.
    /// Surviving formulas are not re-evaluated and their text is not rewritten.
    fn delete_dimension(&mut self, dim: Dimension, at: usize) -> Result<()> {
        let count = *self.dimension_count(dim);
        if at >= count {
            return Err(CellgridError::IndexOutOfBounds {
                dimension: dim.name(),
                index: at,
                count,
            });
        }

        let mut sheet = self.working_copy();
        remove_line(&mut sheet, dim, at);
        self.publish(sheet);
        *self.dimension_count(dim) -= 1;
        self.selection = self.selection.clamped(self.rows, self.cols);

        debug!("deleted {} {} ({} remaining)", dim.name().to_lowercase(), at, count - 1);
        Ok(())
    }

    /// Replace every occurrence of `find` in the values of the selected cells.
    /// Formula text is untouched and nothing is re-evaluated.
    /// Returns the number of cells changed.
    pub fn find_and_replace(&mut self, find: &str, replace: &str) -> usize {
        if find.is_empty() {
            return 0;
        }

        let mut sheet = self.working_copy();
        let mut changed = 0;
        for cell_ref in self.selection.cells() {
            if let Some(cell) = sheet.get_mut(&cell_ref) {
                if cell.value.contains(find) {
                    cell.value = cell.value.replace(find, replace);
                    changed += 1;
                }
            }
        }

        if changed > 0 {
            self.publish(sheet);
        }
        changed
    }

    /// Delete rows of the selection whose values repeat an earlier selected row.
    /// Returns the number of rows removed.
    pub fn remove_duplicates(&mut self) -> usize {
        if self.rows == 0 || self.cols == 0 {
            return 0;
        }
        let (top, left, bottom, right) = self.selection.bounds();
        let bottom = bottom.min(self.rows - 1);

        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for row in top..=bottom {
            let key = (left..=right)
                .map(|col| self.sheet.raw_value(&CellRef::new(col, row)))
                .collect::<Vec<_>>()
                .join("|");
            if !seen.insert(key) {
                duplicates.push(row);
            }
        }
        if duplicates.is_empty() {
            return 0;
        }

        let mut sheet = self.working_copy();
        for &row in duplicates.iter().rev() {
            remove_line(&mut sheet, Dimension::Row, row);
        }
        self.publish(sheet);
        self.rows -= duplicates.len();
        self.selection = self.selection.clamped(self.rows, self.cols);

        debug!("removed {} duplicate rows", duplicates.len());
        duplicates.len()
    }
}
