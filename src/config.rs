//! Where the grid is stored and where downloads go

use directories_next::{ProjectDirs, UserDirs};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::excel::{SheetExporter, DEFAULT_EXPORT_FILE};
use crate::storage::{FileStore, PersistenceGateway, DEFAULT_STORAGE_KEY};

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "sheets";
const APPLICATION: &str = "sheets";

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsConfig {
    /// Directory of the key-value store
    pub data_dir: PathBuf,
    /// Key the grid is stored under
    pub storage_key: String,
    /// Directory downloads are written to
    pub export_dir: PathBuf,
    /// File name of downloads
    pub export_file: String,
}

impl SheetsConfig {
    /// Explicit directories win; otherwise platform defaults, then the
    /// current directory
    pub fn resolve(data_dir: Option<PathBuf>, export_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir
            .or_else(default_data_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let export_dir = export_dir
            .or_else(default_export_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        debug!(
            data_dir = %data_dir.display(),
            export_dir = %export_dir.display(),
            "resolved configuration"
        );

        Self {
            data_dir,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_dir,
            export_file: DEFAULT_EXPORT_FILE.to_string(),
        }
    }

    /// Configuration rooted in one directory (tests, portable installs)
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            data_dir: dir.join("data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_dir: dir.to_path_buf(),
            export_file: DEFAULT_EXPORT_FILE.to_string(),
        }
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(&self.export_file)
    }

    pub fn gateway(&self) -> PersistenceGateway<FileStore> {
        PersistenceGateway::with_key(FileStore::new(&self.data_dir), self.storage_key.clone())
    }

    pub fn exporter(&self) -> SheetExporter {
        SheetExporter::new(self.export_path())
    }
}

fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|dirs| dirs.data_dir().to_path_buf())
}

fn default_export_dir() -> Option<PathBuf> {
    UserDirs::new().and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
}
