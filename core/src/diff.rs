//! Positional diffing of decoded workbooks.
//!
//! Sheets pair by manifest position, rows and columns by raw index. There
//! is no name-based reconciliation and no similarity alignment: an inserted
//! row shifts everything after it, and the shifted rows report as modified.
//! That trade-off is deliberate and documented at the crate level.

use crate::workbook::{Grid, Workbook};
use serde::Serialize;

/// Placeholder name reported when one workbook has no sheet at a paired
/// position.
pub const MISSING_SHEET_NAME: &str = "(missing sheet)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    Equal,
    Added,
    Deleted,
    Modified,
}

/// One cell position compared across the two inputs. `a` and `b` hold the
/// raw, untrimmed values; classification happens on trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellDiff {
    pub col: usize,
    pub a: String,
    pub b: String,
    pub status: CellStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDiff {
    /// 1-based, for display.
    pub row_index: usize,
    pub cells: Vec<CellDiff>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridDiff {
    pub max_cols: usize,
    pub rows: Vec<RowDiff>,
}

/// Comparison of the sheets paired at one manifest position. `is_match`
/// holds only when both sides have a sheet there and the names are
/// identical; an absent side reports [`MISSING_SHEET_NAME`] and diffs as an
/// empty grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetDiffRecord {
    pub name_a: String,
    pub name_b: String,
    pub is_match: bool,
    pub grid_diff: GridDiff,
}

/// Per-row change counters across all sheets. A row lands in exactly one
/// bucket, with modified taking precedence over added over deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub rows_modified: usize,
    pub rows_added: usize,
    pub rows_deleted: usize,
}

impl DiffSummary {
    pub fn changed_rows(&self) -> usize {
        self.rows_modified + self.rows_added + self.rows_deleted
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub sheets: Vec<SheetDiffRecord>,
    pub summary: DiffSummary,
}

impl DiffReport {
    /// True when anything differs: a changed cell anywhere, or a sheet
    /// pairing whose names do not line up.
    pub fn has_changes(&self) -> bool {
        self.summary.changed_rows() > 0 || self.sheets.iter().any(|s| !s.is_match)
    }
}

/// Compare two workbooks position by position.
///
/// Total over its inputs: never fails for any pair of decoded workbooks,
/// including empty ones. Absence (a missing sheet, a short row) is
/// absorbed into the output, not raised.
pub fn diff_workbooks(a: &Workbook, b: &Workbook) -> DiffReport {
    let n = a.sheet_count().max(b.sheet_count());
    let empty = Grid::default();
    let mut sheets = Vec::with_capacity(n);
    let mut summary = DiffSummary::default();

    for i in 0..n {
        let sheet_a = a.sheet_at(i);
        let sheet_b = b.sheet_at(i);
        let is_match = matches!((sheet_a, sheet_b), (Some((na, _)), Some((nb, _))) if na == nb);

        let grid_a = sheet_a.map_or(&empty, |(_, g)| g);
        let grid_b = sheet_b.map_or(&empty, |(_, g)| g);
        let grid_diff = diff_grids(grid_a, grid_b);
        tally(&grid_diff, &mut summary);

        sheets.push(SheetDiffRecord {
            name_a: sheet_name_or_sentinel(sheet_a),
            name_b: sheet_name_or_sentinel(sheet_b),
            is_match,
            grid_diff,
        });
    }

    DiffReport { sheets, summary }
}

/// Positional grid comparison over the union of both grids' bounds.
pub fn diff_grids(a: &Grid, b: &Grid) -> GridDiff {
    let max_rows = a.nrows().max(b.nrows());
    let max_cols = a.max_cols.max(b.max_cols);

    let mut rows = Vec::with_capacity(max_rows);
    for r in 0..max_rows {
        let mut cells = Vec::with_capacity(max_cols);
        for c in 0..max_cols {
            let val_a = a.value_at(r, c);
            let val_b = b.value_at(r, c);
            cells.push(CellDiff {
                col: c,
                a: val_a.to_string(),
                b: val_b.to_string(),
                status: classify(val_a, val_b),
            });
        }
        rows.push(RowDiff {
            row_index: r + 1,
            cells,
        });
    }

    GridDiff { max_cols, rows }
}

fn sheet_name_or_sentinel(sheet: Option<(&str, &Grid)>) -> String {
    sheet.map_or_else(|| MISSING_SHEET_NAME.to_string(), |(name, _)| name.to_string())
}

fn classify(a: &str, b: &str) -> CellStatus {
    let a = a.trim();
    let b = b.trim();
    if a == b {
        CellStatus::Equal
    } else if !a.is_empty() && b.is_empty() {
        CellStatus::Deleted
    } else if a.is_empty() && !b.is_empty() {
        CellStatus::Added
    } else {
        CellStatus::Modified
    }
}

fn tally(grid_diff: &GridDiff, summary: &mut DiffSummary) {
    for row in &grid_diff.rows {
        let mut modified = false;
        let mut added = false;
        let mut deleted = false;
        for cell in &row.cells {
            match cell.status {
                CellStatus::Modified => modified = true,
                CellStatus::Added => added = true,
                CellStatus::Deleted => deleted = true,
                CellStatus::Equal => {}
            }
        }
        if modified {
            summary.rows_modified += 1;
        } else if added {
            summary.rows_added += 1;
        } else if deleted {
            summary.rows_deleted += 1;
        }
    }
}
