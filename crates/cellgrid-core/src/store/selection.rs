//! Rectangular grid selection.

use cellgrid_engine::engine::CellRef;

/// A zero-indexed grid position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        GridPos { row, col }
    }

    pub fn to_cell_ref(self) -> CellRef {
        CellRef::new(self.col, self.row)
    }
}

/// Selection as the UI reports it. `start` and `end` are the drag anchors and
/// may be given in either order; `active` is the focused cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: GridPos,
    pub end: GridPos,
    pub active: GridPos,
}

impl Selection {
    pub fn new(start: GridPos, end: GridPos, active: GridPos) -> Self {
        Selection { start, end, active }
    }

    /// Select a single cell.
    pub fn single(row: usize, col: usize) -> Self {
        let pos = GridPos::new(row, col);
        Selection::new(pos, pos, pos)
    }

    /// (top_row, left_col, bottom_row, right_col), all inclusive.
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        (
            self.start.row.min(self.end.row),
            self.start.col.min(self.end.col),
            self.start.row.max(self.end.row),
            self.start.col.max(self.end.col),
        )
    }

    /// Cell references inside the rectangle, row-major.
    pub fn cells(&self) -> Vec<CellRef> {
        let (top, left, bottom, right) = self.bounds();
        let mut cells = Vec::new();
        for row in top..=bottom {
            for col in left..=right {
                cells.push(CellRef::new(col, row));
            }
        }
        cells
    }

    /// Clamp every position into a `rows` x `cols` grid.
    pub(crate) fn clamped(&self, rows: usize, cols: usize) -> Selection {
        let clamp = |pos: GridPos| {
            GridPos::new(
                pos.row.min(rows.saturating_sub(1)),
                pos.col.min(cols.saturating_sub(1)),
            )
        };
        Selection::new(clamp(self.start), clamp(self.end), clamp(self.active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_normalize_drag_direction() {
        let sel = Selection::new(GridPos::new(4, 3), GridPos::new(1, 0), GridPos::new(4, 3));
        assert_eq!(sel.bounds(), (1, 0, 4, 3));
    }

    #[test]
    fn test_cells_row_major() {
        let sel = Selection::new(GridPos::new(0, 0), GridPos::new(1, 1), GridPos::new(0, 0));
        let ids: Vec<String> = sel.cells().iter().map(|r| r.to_string()).collect();
        assert_eq!(ids, vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_clamped() {
        let sel = Selection::new(GridPos::new(0, 0), GridPos::new(500, 40), GridPos::new(7, 2));
        let clamped = sel.clamped(100, 26);
        assert_eq!(clamped.end, GridPos::new(99, 25));
        assert_eq!(clamped.active, GridPos::new(7, 2));
    }
}
