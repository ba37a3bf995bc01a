//! Excel importer implementation - .xlsx → grid rows

use crate::error::{SheetsError, SheetsResult};
use crate::types::{column_letter, Cell, Row, LOADED_COLUMNS};
use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::exporter::SHEET_NAME;

/// Widest slice of a sheet worth reading: the grid columns plus the row-number column
const READ_COLUMNS: usize = LOADED_COLUMNS + 1;

/// Reads a workbook back into grid rows
pub struct SheetImporter {
    path: PathBuf,
}

impl SheetImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Rows of `Sheet1` (or the first sheet)
    ///
    /// A letter header row and a row-number column, as written by the
    /// exporter, are stripped. At most six columns are read; rows are
    /// truncated to the grid width when loaded.
    pub fn import(&self) -> SheetsResult<Vec<Row>> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            SheetsError::Import(format!(
                "Failed to open Excel file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let sheet_names = workbook.sheet_names().to_vec();
        let sheet = sheet_names
            .iter()
            .find(|name| name.as_str() == SHEET_NAME)
            .or_else(|| sheet_names.first())
            .cloned()
            .ok_or_else(|| SheetsError::Import("Workbook has no worksheets".to_string()))?;

        let cells = read_cells(&mut workbook, &sheet)?;
        let rows = if has_labels(&cells) {
            debug!(sheet = %sheet, "stripping letter header and row numbers");
            cells
                .into_iter()
                .skip(1)
                .map(|row| row.into_iter().skip(1).map(to_cell).collect())
                .collect()
        } else {
            cells
                .into_iter()
                .map(|row| row.into_iter().map(to_cell).collect())
                .collect()
        };

        Ok(rows)
    }
}

/// Leftmost cells of a sheet positioned from A1
///
/// Cells are streamed instead of loaded as a dense calamine `Range`, so a
/// stray far-away cell costs nothing. Cells right of `READ_COLUMNS` are dropped.
fn read_cells<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
    sheet: &str,
) -> SheetsResult<Vec<Vec<Data>>> {
    let read_error =
        |e: XlsxError| SheetsError::Import(format!("Failed to read sheet '{}': {}", sheet, e));

    let mut reader = workbook.worksheet_cells_reader(sheet).map_err(read_error)?;
    let mut kept = Vec::new();
    let mut skipped = 0usize;
    while let Some(cell) = reader.next_cell().map_err(read_error)? {
        let (row, col) = cell.get_position();
        let (row, col) = (row as usize, col as usize);
        let value = Data::from(cell.get_value().clone());
        if matches!(value, Data::Empty) {
            continue;
        }
        if col >= READ_COLUMNS {
            skipped += 1;
            continue;
        }
        kept.push((row, col, value));
    }
    if skipped > 0 {
        debug!(sheet = %sheet, skipped, "ignoring cells right of the grid");
    }

    let height = kept.iter().map(|(row, _, _)| row + 1).max().unwrap_or(0);
    let width = kept.iter().map(|(_, col, _)| col + 1).max().unwrap_or(0);

    let mut cells = vec![vec![Data::Empty; width]; height];
    for (row, col, value) in kept {
        cells[row][col] = value;
    }
    Ok(cells)
}

/// Header row is blank then A, B, C...; first column counts 1, 2, 3...
fn has_labels(cells: &[Vec<Data>]) -> bool {
    let Some(header) = cells.first() else {
        return false;
    };
    if header.len() < 2 || !matches!(header[0], Data::Empty) {
        return false;
    }

    let letters_match = header[1..].iter().enumerate().all(|(idx, cell)| {
        matches!(cell, Data::String(s) if *s == column_letter(idx))
    });

    let numbers_match = cells[1..].iter().enumerate().all(|(idx, row)| {
        let expected = (idx + 1) as f64;
        match row.first() {
            Some(Data::Float(f)) => *f == expected,
            Some(Data::Int(i)) => *i as f64 == expected,
            _ => false,
        }
    });

    letters_match && numbers_match
}

fn to_cell(data: Data) -> Cell {
    match data {
        Data::Empty => Cell::empty(),
        Data::String(s) => Cell::Text(s),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Cell::Text((f as i64).to_string()),
        Data::Float(f) => Cell::Text(f.to_string()),
        Data::Int(i) => Cell::Text(i.to_string()),
        Data::Bool(b) => Cell::Text(if b { "TRUE" } else { "FALSE" }.to_string()),
        other => Cell::Text(other.to_string()),
    }
}
