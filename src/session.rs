//! Host-side event handlers
//!
//! A [`Session`] is what the screen talks to: it owns the engine, issues a
//! queued save after every state change and runs the download action.
//! Storage and export failures stop here; they are logged and the in-memory
//! grid stays usable.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::core::{EditOutcome, GridEngine};
use crate::error::SheetsResult;
use crate::excel::{SheetExporter, SheetImporter};
use crate::storage::{KeyValueStore, PersistenceGateway, SaveQueue};
use crate::types::{CellRef, ExportTable, Grid};

pub struct Session {
    engine: GridEngine,
    saves: SaveQueue,
    exporter: SheetExporter,
}

impl Session {
    /// Restore the stored grid (or start fresh) and start the save worker
    pub fn open<S>(gateway: PersistenceGateway<S>, exporter: SheetExporter) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let grid = gateway.load_or_initialize();

        Self {
            engine: GridEngine::from_rows(grid.into_rows()),
            saves: SaveQueue::spawn(gateway),
            exporter,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn export_path(&self) -> &Path {
        self.exporter.output_path()
    }

    /// Text input changed at (row, column)
    pub fn change_cell(&mut self, row: usize, column: usize, value: &str) -> EditOutcome {
        let outcome = self.engine.edit_cell(row, column, value);
        if outcome.changed() {
            self.persist();
        }
        outcome
    }

    pub fn set(&mut self, cell: CellRef, value: &str) -> EditOutcome {
        self.change_cell(cell.row, cell.column, value)
    }

    /// The "Clear" action
    pub fn clear(&mut self) {
        self.engine.clear();
        info!("grid cleared");
        self.persist();
    }

    /// Back to a fresh 10 x 5 grid
    pub fn reset(&mut self) {
        self.engine.initialize();
        info!("grid reset");
        self.persist();
    }

    pub fn export_table(&self) -> ExportTable {
        self.engine.to_export_table()
    }

    /// The "Download" action: write the workbook, then optionally share it
    pub fn download(&self, share: bool) -> SheetsResult<PathBuf> {
        let table = self.engine.to_export_table();
        let path = self
            .exporter
            .export(&table)
            .inspect_err(|e| error!("Error downloading Excel file: {}", e))?
            .to_path_buf();

        if share {
            self.exporter
                .share()
                .inspect_err(|e| error!("Error sharing Excel file: {}", e))?;
        }

        Ok(path)
    }

    /// Replace the grid with the contents of a workbook
    pub fn import(&mut self, path: &Path) -> SheetsResult<&Grid> {
        let rows = SheetImporter::new(path)
            .import()
            .inspect_err(|e| error!("Error importing {}: {}", path.display(), e))?;
        self.engine.load_from(rows);
        info!(path = %path.display(), "grid imported");
        self.persist();
        Ok(self.engine.grid())
    }

    /// Wait for queued saves to finish
    pub fn flush(&self) {
        self.saves.flush();
    }

    fn persist(&self) {
        self.saves.enqueue(self.engine.grid().clone());
    }
}
