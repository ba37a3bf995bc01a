//! Grid state engine
//!
//! Mutation rules for the sheet: cell edits with the trailing grow-affordance
//! column, the clear action, load normalization and the export projection.
//! Every rule is a pure function from one [`Grid`] to the next; [`GridEngine`]
//! owns the current grid and swaps in each result.

use tracing::debug;

use crate::types::{
    column_letter, Cell, ExportCell, ExportTable, Grid, Row, INITIAL_COLUMNS, INITIAL_ROWS,
    LOADED_COLUMNS, MAX_EDITABLE_COLUMN,
};

/// What an edit did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Rejected; the grid is unchanged
    Ignored,
    /// Value written, width unchanged
    Applied,
    /// A trailing blank column was appended before writing
    Grew,
    /// The trailing blank column was removed before writing
    Shrank,
}

impl EditOutcome {
    /// Whether the edit produced a new state that should be persisted
    pub fn changed(self) -> bool {
        self != EditOutcome::Ignored
    }
}

//==============================================================================
// Pure grid rules
//==============================================================================

/// Fresh 10 x 5 grid of empty strings
pub fn initial_grid() -> Grid {
    Grid::blank(INITIAL_ROWS, INITIAL_COLUMNS)
}

/// Normalize externally supplied rows into a grid
///
/// Each row keeps its first five cells and short rows are padded with empty
/// strings, so the result is always exactly five columns wide. Cell values,
/// including absent markers, are kept as they are. No rows gives a fresh grid.
pub fn load_from(rows: Vec<Row>) -> Grid {
    if rows.is_empty() {
        return initial_grid();
    }

    let rows = rows
        .into_iter()
        .map(|mut row| {
            row.truncate(LOADED_COLUMNS);
            row.resize(LOADED_COLUMNS, Cell::empty());
            row
        })
        .collect();

    Grid::from_rows(rows)
}

/// Apply a single cell edit
///
/// Editing the last cell of the last column with text appends a blank column;
/// clearing the second-to-last cell of a row while the last column is blank
/// removes it again, never going below five columns. Edits beyond column E,
/// or outside the grid, are ignored.
pub fn edit_cell(grid: &Grid, row: usize, column: usize, value: &str) -> (Grid, EditOutcome) {
    if column > MAX_EDITABLE_COLUMN {
        return (grid.clone(), EditOutcome::Ignored);
    }
    if row >= grid.row_count() || column >= grid.column_count() {
        return (grid.clone(), EditOutcome::Ignored);
    }

    let mut next = grid.clone();
    let mut outcome = EditOutcome::Applied;

    let last_row = next.row_count() - 1;
    let last_column = next.column_count() - 1;
    if row == last_row && column == last_column && !value.is_empty() {
        for r in next.rows_mut().iter_mut() {
            r.push(Cell::empty());
        }
        outcome = EditOutcome::Grew;
    }

    let width = next.column_count();
    if width > LOADED_COLUMNS
        && next.column_is_blank(width - 1)
        && column == width - 2
        && value.is_empty()
    {
        for r in next.rows_mut().iter_mut() {
            r.pop();
        }
        outcome = EditOutcome::Shrank;
    }

    next.rows_mut()[row][column] = Cell::text(value);
    (next, outcome)
}

/// Reset the grid, keeping the corner cell
///
/// Row 0 becomes empty strings, column 0 below it becomes absent markers and
/// everything else becomes empty strings.
pub fn clear(grid: &Grid) -> Grid {
    let rows = grid
        .rows()
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            row.iter()
                .enumerate()
                .map(|(col_idx, cell)| match (row_idx, col_idx) {
                    (0, 0) => cell.clone(),
                    (0, _) => Cell::empty(),
                    (_, 0) => Cell::Absent,
                    _ => Cell::empty(),
                })
                .collect()
        })
        .collect();

    Grid::from_rows(rows)
}

/// Labeled projection used for file export
pub fn export_table(grid: &Grid) -> ExportTable {
    let width = grid.column_count();

    let mut header = Vec::with_capacity(width + 1);
    header.push(ExportCell::Text(String::new()));
    header.extend((0..width).map(|idx| ExportCell::Text(column_letter(idx))));

    let mut rows = Vec::with_capacity(grid.row_count() + 1);
    rows.push(header);
    for (idx, row) in grid.rows().iter().enumerate() {
        let mut out = Vec::with_capacity(row.len() + 1);
        out.push(ExportCell::Number(idx as u32 + 1));
        out.extend(row.iter().map(ExportCell::from));
        rows.push(out);
    }

    ExportTable { rows }
}

//==============================================================================
// Engine
//==============================================================================

/// Owner of the current grid
#[derive(Debug, Clone)]
pub struct GridEngine {
    grid: Grid,
}

impl GridEngine {
    /// Engine holding a fresh grid
    pub fn new() -> Self {
        Self {
            grid: initial_grid(),
        }
    }

    /// Engine restored from persisted rows
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut engine = Self::new();
        engine.load_from(rows);
        engine
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn initialize(&mut self) -> &Grid {
        self.replace(initial_grid());
        &self.grid
    }

    pub fn load_from(&mut self, rows: Vec<Row>) -> &Grid {
        self.replace(load_from(rows));
        &self.grid
    }

    pub fn edit_cell(&mut self, row: usize, column: usize, value: &str) -> EditOutcome {
        let (next, outcome) = edit_cell(&self.grid, row, column, value);
        match outcome {
            EditOutcome::Ignored => {
                debug!(row, column, "edit ignored");
                return outcome;
            }
            EditOutcome::Grew => debug!(width = next.column_count(), "grid grew"),
            EditOutcome::Shrank => debug!(width = next.column_count(), "grid shrank"),
            EditOutcome::Applied => {}
        }
        self.replace(next);
        outcome
    }

    pub fn clear(&mut self) -> &Grid {
        self.replace(clear(&self.grid));
        &self.grid
    }

    pub fn to_export_table(&self) -> ExportTable {
        export_table(&self.grid)
    }

    fn replace(&mut self, next: Grid) {
        debug_assert!(next.is_rectangular(), "grid rows must have equal length");
        self.grid = next;
    }
}

impl Default for GridEngine {
    fn default() -> Self {
        Self::new()
    }
}
