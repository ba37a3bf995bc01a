use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SheetsError, SheetsResult};

/// Number of rows in a fresh grid
pub const INITIAL_ROWS: usize = 10;

/// Number of columns in a fresh grid (A to E)
pub const INITIAL_COLUMNS: usize = 5;

/// Highest column index that accepts edits (column E)
pub const MAX_EDITABLE_COLUMN: usize = 4;

/// Width every row is truncated (and padded) to on load
pub const LOADED_COLUMNS: usize = 5;

//==============================================================================
// Cells
//==============================================================================

/// A single grid cell
///
/// Persisted as a JSON string, or `null` for [`Cell::Absent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Cell {
    /// User text (possibly empty)
    Text(String),
    /// No content at all; only produced for index-column cells by a clear
    Absent,
}

impl Cell {
    /// The empty-string cell
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// True only for an empty string; the absent marker is not blank
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }

    /// Text content, with the absent marker read as ""
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Text(s) => s,
            Cell::Absent => "",
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => Cell::Text(s),
            None => Cell::Absent,
        }
    }
}

impl From<Cell> for Option<String> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Text(s) => Some(s),
            Cell::Absent => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// One row of cells
pub type Row = Vec<Cell>;

//==============================================================================
// Grid
//==============================================================================

/// Rectangular table of cells, row 0 topmost
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Fresh grid of empty strings
    pub fn blank(rows: usize, columns: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| vec![Cell::empty(); columns]).collect(),
        }
    }

    /// Build a grid from rows as-is (no truncation, no padding)
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width taken from the first row (0 for an empty grid)
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|row| row.len()).unwrap_or(0)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Every row has the same length
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|row| row.len() == width)
    }

    /// Column `index` is the empty string in every row
    pub fn column_is_blank(&self, index: usize) -> bool {
        self.rows
            .iter()
            .all(|row| row.get(index).map(Cell::is_blank).unwrap_or(false))
    }
}

//==============================================================================
// Export projection
//==============================================================================

/// A cell of the labeled export table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportCell {
    Text(String),
    /// 1-based row label
    Number(u32),
    /// Written as an empty cell
    Blank,
}

impl From<&Cell> for ExportCell {
    fn from(cell: &Cell) -> Self {
        match cell {
            Cell::Text(s) => ExportCell::Text(s.clone()),
            Cell::Absent => ExportCell::Blank,
        }
    }
}

impl From<&str> for ExportCell {
    fn from(value: &str) -> Self {
        ExportCell::Text(value.to_string())
    }
}

impl From<u32> for ExportCell {
    fn from(value: u32) -> Self {
        ExportCell::Number(value)
    }
}

/// Grid with a column-letter header row and a row-number column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub rows: Vec<Vec<ExportCell>>,
}

impl ExportTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(|row| row.len()).unwrap_or(0)
    }
}

//==============================================================================
// Cell references
//==============================================================================

/// Convert a 0-based column index to spreadsheet letters (0 -> A, 26 -> AA)
pub fn column_letter(index: usize) -> String {
    let mut result = String::new();
    let mut idx = index;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Convert spreadsheet letters to a 0-based column index (A -> 0, AA -> 26)
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }

    let mut index: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }

    Some(index - 1)
}

/// A1-style address of a grid cell, stored 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Parse a reference such as `B3` (case-insensitive)
    pub fn parse(input: &str) -> SheetsResult<Self> {
        let trimmed = input.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| SheetsError::InvalidCellRef(format!("'{}' has no row number", input)))?;
        let (letters, digits) = trimmed.split_at(split);

        let column = column_index(letters).ok_or_else(|| {
            SheetsError::InvalidCellRef(format!("'{}' has no valid column letters", input))
        })?;
        let row_number: usize = digits.parse().map_err(|_| {
            SheetsError::InvalidCellRef(format!("'{}' has an invalid row number", input))
        })?;
        if row_number == 0 {
            return Err(SheetsError::InvalidCellRef(format!(
                "'{}': rows are numbered from 1",
                input
            )));
        }

        Ok(Self::new(row_number - 1, column))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.column), self.row + 1)
    }
}
