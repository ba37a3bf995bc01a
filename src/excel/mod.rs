//! Excel import/export
//!
//! - Export: grid → labeled `Sheet1` in an .xlsx workbook, then share
//! - Import: .xlsx → grid rows (labels stripped)

mod exporter;
mod importer;

pub use exporter::{SheetExporter, DEFAULT_EXPORT_FILE, SHEET_NAME};
pub use importer::SheetImporter;
