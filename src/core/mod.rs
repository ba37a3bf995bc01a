pub mod engine;

pub use engine::{EditOutcome, GridEngine};
