//! Excel exporter implementation - grid → .xlsx

use crate::error::{SheetsError, SheetsResult};
use crate::types::{ExportCell, ExportTable};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the single worksheet in an exported workbook
pub const SHEET_NAME: &str = "Sheet1";

/// File name used for downloads
pub const DEFAULT_EXPORT_FILE: &str = "sheets.xlsx";

/// Writes an [`ExportTable`] to a fixed .xlsx path and hands it to the OS
#[derive(Debug, Clone)]
pub struct SheetExporter {
    output_path: PathBuf,
}

impl SheetExporter {
    pub fn new<P: AsRef<Path>>(output_path: P) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the table as a one-sheet workbook, replacing any previous file
    pub fn export(&self, table: &ExportTable) -> SheetsResult<&Path> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    SheetsError::ExportWrite(format!(
                        "Failed to create export directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| SheetsError::ExportWrite(format!("Failed to set worksheet name: {}", e)))?;

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                Self::write_cell(worksheet, row_idx as u32, col_idx as u16, cell)?;
            }
        }

        workbook
            .save(&self.output_path)
            .map_err(|e| SheetsError::ExportWrite(format!("Failed to save Excel file: {}", e)))?;

        info!(path = %self.output_path.display(), "Excel file downloaded successfully");
        Ok(&self.output_path)
    }

    /// Open the exported file with the platform's default handler
    pub fn share(&self) -> SheetsResult<()> {
        if !self.output_path.exists() {
            return Err(SheetsError::ExportShare(format!(
                "{} does not exist",
                self.output_path.display()
            )));
        }

        open::that(&self.output_path).map_err(|e| {
            SheetsError::ExportShare(format!(
                "Failed to share {}: {}",
                self.output_path.display(),
                e
            ))
        })
    }

    fn write_cell(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        cell: &ExportCell,
    ) -> SheetsResult<()> {
        match cell {
            ExportCell::Text(text) if text.is_empty() => {}
            ExportCell::Text(text) => {
                worksheet
                    .write_string(row, col, text)
                    .map_err(|e| SheetsError::ExportWrite(format!("Failed to write text: {}", e)))?;
            }
            ExportCell::Number(n) => {
                worksheet
                    .write_number(row, col, f64::from(*n))
                    .map_err(|e| {
                        SheetsError::ExportWrite(format!("Failed to write row number: {}", e))
                    })?;
            }
            ExportCell::Blank => {}
        }
        Ok(())
    }
}
