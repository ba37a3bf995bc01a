//! Sheets - a five-column grid sheet editor
//!
//! A grid of text cells (columns A to E, growing rows) that is saved to a
//! local key-value store after every change and can be downloaded as an
//! Excel workbook.
//!
//! # Features
//!
//! - Cell edits with a trailing blank "grow" column
//! - Clear action that keeps the corner cell
//! - JSON persistence with ordered background saves
//! - Excel (.xlsx) download with letter/number labels, and import
//!
//! # Example
//!
//! ```no_run
//! use sheets::config::SheetsConfig;
//! use sheets::session::Session;
//!
//! let config = SheetsConfig::resolve(None, None);
//! let mut session = Session::open(config.gateway(), config.exporter());
//!
//! session.change_cell(0, 1, "Revenue");
//! let path = session.download(false)?;
//! println!("Saved {}", path.display());
//! # Ok::<(), sheets::error::SheetsError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod session;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{SheetsError, SheetsResult};
pub use types::{Cell, CellRef, ExportCell, ExportTable, Grid};
