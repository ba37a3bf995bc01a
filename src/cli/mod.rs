//! CLI command handlers

pub mod commands;

pub use commands::{clear, download, import, reset, set, shell, show};
