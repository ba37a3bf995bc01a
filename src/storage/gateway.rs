//! Load/save of the grid under a fixed storage key

use tracing::{error, info};

use crate::core::engine::{initial_grid, load_from};
use crate::error::{SheetsError, SheetsResult};
use crate::types::{Grid, Row};

use super::store::KeyValueStore;

/// Storage key used by default
pub const DEFAULT_STORAGE_KEY: &str = "gridData";

/// Serializes the grid as JSON rows into a key-value store
#[derive(Debug, Clone)]
pub struct PersistenceGateway<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the grid; absent markers are stored as `null`
    pub fn save(&self, grid: &Grid) -> SheetsResult<()> {
        let json = serde_json::to_string(grid).map_err(|e| {
            SheetsError::StorageWrite(format!("Failed to encode grid: {}", e))
        })?;
        self.store.set_item(&self.key, &json)
    }

    /// Raw stored rows, `None` when nothing was saved yet
    pub fn load(&self) -> SheetsResult<Option<Vec<Row>>> {
        let Some(json) = self.store.get_item(&self.key)? else {
            return Ok(None);
        };

        let rows: Vec<Row> = serde_json::from_str(&json).map_err(|e| {
            SheetsError::StorageRead(format!("Stored grid under '{}' is corrupt: {}", self.key, e))
        })?;
        Ok(Some(rows))
    }

    /// Stored grid normalized through `load_from`, or a fresh grid
    ///
    /// Read failures are logged and answered with a fresh grid.
    pub fn load_or_initialize(&self) -> Grid {
        match self.load() {
            Ok(Some(rows)) => {
                let grid = load_from(rows);
                info!(
                    rows = grid.row_count(),
                    columns = grid.column_count(),
                    "loaded stored grid"
                );
                grid
            }
            Ok(None) => {
                info!("no stored grid, starting fresh");
                initial_grid()
            }
            Err(e) => {
                error!("Error loading grid data: {}", e);
                initial_grid()
            }
        }
    }
}
