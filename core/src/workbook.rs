//! Workbook and grid data structures.
//!
//! The decoder produces a [`Workbook`]: sheet names in manifest order, each
//! mapped to a fully materialized [`Grid`] of cell display text. Grids are
//! rectangular by construction; sparse source data passes through a
//! [`GridBuilder`] that fills unrecorded positions with empty strings.

use indexmap::IndexMap;
use std::collections::HashMap;

/// A dense, rectangular grid of cell display values for one sheet.
///
/// # Invariants
///
/// Every row in `rows` has exactly `max_cols` entries, and the grid spans
/// row 0 through the maximum row index seen in the source. Values are raw
/// display text; no type information survives decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    /// Number of columns in every row (1-based count of the widest cell seen).
    pub max_cols: usize,
    /// Row-major cell text, zero-indexed.
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at (row, col), or `""` when the position lies outside the grid.
    pub fn value_at(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Sparse accumulator for cell values, collapsed into a dense [`Grid`] once
/// the source has been fully read.
///
/// Bounds grow from the maximum row/column index recorded; they are never
/// sized ahead of parsing.
#[derive(Debug, Default)]
pub struct GridBuilder {
    cells: HashMap<(u32, u32), String>,
    max_row: Option<u32>,
    max_col: Option<u32>,
}

impl GridBuilder {
    pub fn new() -> GridBuilder {
        GridBuilder::default()
    }

    /// Record a cell at zero-based (row, col). Recording any cell, even an
    /// empty one, extends the grid bounds to cover it.
    pub fn record(&mut self, row: u32, col: u32, value: String) {
        self.max_row = Some(self.max_row.map_or(row, |r| r.max(row)));
        self.max_col = Some(self.max_col.map_or(col, |c| c.max(col)));
        self.cells.insert((row, col), value);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Materialize the rectangular grid, filling every unrecorded position
    /// with an empty string.
    pub fn finish(self) -> Grid {
        let (Some(max_row), Some(max_col)) = (self.max_row, self.max_col) else {
            return Grid::default();
        };

        let mut cells = self.cells;
        let rows = (0..=max_row)
            .map(|r| {
                (0..=max_col)
                    .map(|c| cells.remove(&(r, c)).unwrap_or_default())
                    .collect()
            })
            .collect();

        Grid {
            max_cols: max_col as usize + 1,
            rows,
        }
    }
}

/// A decoded workbook: an ordered mapping from sheet name to grid.
///
/// Sheet order follows the source file's manifest, not any alphabetical or
/// storage order. Duplicate sheet names keep the last-parsed grid at the
/// first occurrence's position (map semantics); that is how the source
/// formats behave and is not corrected here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Workbook {
    pub sheets: IndexMap<String, Grid>,
}

impl Workbook {
    pub fn new() -> Workbook {
        Workbook::default()
    }

    pub fn insert_sheet(&mut self, name: String, grid: Grid) {
        self.sheets.insert(name, grid);
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sheet at a manifest position, as (name, grid).
    pub fn sheet_at(&self, index: usize) -> Option<(&str, &Grid)> {
        self.sheets
            .get_index(index)
            .map(|(name, grid)| (name.as_str(), grid))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Grid)> {
        self.sheets.iter().map(|(name, grid)| (name.as_str(), grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_yields_empty_grid() {
        let grid = GridBuilder::new().finish();
        assert_eq!(grid.max_cols, 0);
        assert!(grid.rows.is_empty());
    }

    #[test]
    fn sparse_cells_densify_to_rectangle() {
        let mut builder = GridBuilder::new();
        builder.record(2, 3, "x".to_string());
        builder.record(0, 0, "origin".to_string());
        let grid = builder.finish();

        assert_eq!(grid.max_cols, 4);
        assert_eq!(grid.nrows(), 3);
        assert!(grid.rows.iter().all(|r| r.len() == grid.max_cols));
        assert_eq!(grid.value_at(0, 0), "origin");
        assert_eq!(grid.value_at(2, 3), "x");
        assert_eq!(grid.value_at(1, 1), "");
    }

    #[test]
    fn skipped_rows_are_synthesized_empty() {
        let mut builder = GridBuilder::new();
        builder.record(4, 0, "far".to_string());
        let grid = builder.finish();

        assert_eq!(grid.nrows(), 5);
        for r in 0..4 {
            assert_eq!(grid.rows[r], vec![String::new()]);
        }
        assert_eq!(grid.value_at(4, 0), "far");
    }

    #[test]
    fn recording_an_empty_value_extends_bounds() {
        let mut builder = GridBuilder::new();
        builder.record(0, 0, "a".to_string());
        builder.record(0, 25, String::new());
        let grid = builder.finish();
        assert_eq!(grid.max_cols, 26);
    }

    #[test]
    fn value_at_outside_bounds_is_empty() {
        let grid = Grid::default();
        assert_eq!(grid.value_at(10, 10), "");
    }

    #[test]
    fn duplicate_sheet_names_keep_last_grid_at_first_position() {
        let mut wb = Workbook::new();
        let mut first = GridBuilder::new();
        first.record(0, 0, "first".to_string());
        let mut second = GridBuilder::new();
        second.record(0, 0, "second".to_string());

        wb.insert_sheet("Data".to_string(), first.finish());
        wb.insert_sheet("Other".to_string(), Grid::default());
        wb.insert_sheet("Data".to_string(), second.finish());

        assert_eq!(wb.sheet_count(), 2);
        let (name, grid) = wb.sheet_at(0).unwrap();
        assert_eq!(name, "Data");
        assert_eq!(grid.value_at(0, 0), "second");
    }
}
