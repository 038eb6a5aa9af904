use crate::config::{PropagationMode, StoreConfig};
use crate::error::Result;
use cellgrid_engine::engine::{Cell, CellRef, CellStyle, Sheet};
use std::path::PathBuf;
use std::sync::Arc;

use super::selection::Selection;

/// Partial update applied by [`SheetStore::update_cell`]. `None` fields are
/// left as they are.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellUpdate {
    pub value: Option<String>,
    pub formula: Option<String>,
    pub style: Option<CellStyle>,
}

impl CellUpdate {
    pub fn value(value: impl Into<String>) -> Self {
        CellUpdate {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn formula(formula: impl Into<String>) -> Self {
        CellUpdate {
            formula: Some(formula.into()),
            ..Default::default()
        }
    }
}

/// UI-agnostic sheet state: the cell map, grid dimensions and selection.
///
/// Every operation derives a new [`Sheet`] from the current one and publishes it
/// by swapping the `Arc`, so snapshots handed out earlier never change.
pub struct SheetStore {
    /// Published cell map
    pub(crate) sheet: Arc<Sheet>,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) selection: Selection,
    pub(crate) propagation: PropagationMode,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has been modified since the last load/save
    pub modified: bool,
}

impl SheetStore {
    /// Create an empty store with default configuration.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    pub fn with_config(config: &StoreConfig) -> Self {
        SheetStore {
            sheet: Arc::new(Sheet::new()),
            rows: config.rows,
            cols: config.cols,
            selection: Selection::default(),
            propagation: config.propagation,
            file_path: None,
            modified: false,
        }
    }

    /// Create a store holding `sheet` as its initial data.
    pub fn with_data(sheet: Sheet, config: &StoreConfig) -> Self {
        let mut store = Self::with_config(config);
        store.sheet = Arc::new(sheet);
        store
    }

    /// Create a store and load a file if it exists; otherwise remember the path
    /// for the first save.
    pub fn with_file(path: PathBuf, config: &StoreConfig) -> Result<Self> {
        let mut store = Self::with_config(config);
        if path.exists() {
            store.load_file(&path)?;
        } else {
            store.file_path = Some(path);
        }
        Ok(store)
    }

    /// Current published snapshot.
    pub fn snapshot(&self) -> Arc<Sheet> {
        Arc::clone(&self.sheet)
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn cell(&self, cell_ref: &CellRef) -> Option<&Cell> {
        self.sheet.get(cell_ref)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    pub fn propagation(&self) -> PropagationMode {
        self.propagation
    }

    pub fn set_propagation(&mut self, mode: PropagationMode) {
        self.propagation = mode;
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection, clamped to the grid.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.rows, self.cols);
    }

    /// Replace the whole cell map, as a successful load does.
    pub fn set_data(&mut self, sheet: Sheet) {
        self.replace_sheet(sheet);
        self.modified = true;
    }

    /// Swap in a new sheet, growing the grid so every cell is addressable.
    pub(crate) fn replace_sheet(&mut self, sheet: Sheet) {
        for (cell_ref, _) in sheet.iter() {
            self.rows = self.rows.max(cell_ref.row + 1);
            self.cols = self.cols.max(cell_ref.col + 1);
        }
        self.sheet = Arc::new(sheet);
        self.selection = self.selection.clamped(self.rows, self.cols);
    }

    /// Working copy of the published sheet for an operation to mutate.
    pub(crate) fn working_copy(&self) -> Sheet {
        (*self.sheet).clone()
    }

    pub(crate) fn publish(&mut self, sheet: Sheet) {
        self.sheet = Arc::new(sheet);
        self.modified = true;
    }
}

impl Default for SheetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CellgridError;

    fn cell(id: &str) -> CellRef {
        CellRef::from_str(id).unwrap()
    }

    #[test]
    fn test_set_data_grows_grid_to_fit() {
        let mut store = SheetStore::new();
        let sheet: Sheet = [
            (cell("A150"), Cell::new_literal("far")),
            (cell("AD1"), Cell::new_literal("wide")),
        ]
        .into_iter()
        .collect();
        store.set_data(sheet);

        assert_eq!(store.row_count(), 150);
        assert_eq!(store.col_count(), 30);
        assert!(store.modified);
        assert_eq!(store.cell(&cell("A150")).unwrap().value, "far");

        store.delete_row(120).unwrap();
        assert_eq!(store.cell(&cell("A149")).unwrap().value, "far");
        assert!(matches!(
            store.delete_row(149),
            Err(CellgridError::IndexOutOfBounds { count: 149, .. })
        ));
    }

    #[test]
    fn test_set_data_keeps_larger_grid_and_clamps_selection() {
        let mut store = SheetStore::new();
        store.set_selection(Selection::single(99, 25));
        store.set_data([(cell("B2"), Cell::new_literal("x"))].into_iter().collect());

        assert_eq!(store.row_count(), 100);
        assert_eq!(store.col_count(), 26);
        assert_eq!(store.selection(), Selection::single(99, 25));
        assert!(store.cell(&cell("A1")).is_none());
    }
}
