use thiserror::Error;

pub type SheetsResult<T> = Result<T, SheetsError>;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Storage write error: {0}")]
    StorageWrite(String),

    #[error("Export write error: {0}")]
    ExportWrite(String),

    #[error("Export share error: {0}")]
    ExportShare(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("Invalid command: {0}")]
    Command(String),
}
