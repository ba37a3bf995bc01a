//! Persistence of the grid
//!
//! - [`KeyValueStore`]: the device-local store (`FileStore`, `MemoryStore`)
//! - [`PersistenceGateway`]: JSON rows under a fixed key
//! - [`SaveQueue`]: ordered fire-and-forget saves

mod gateway;
mod queue;
mod store;

pub use gateway::{PersistenceGateway, DEFAULT_STORAGE_KEY};
pub use queue::SaveQueue;
pub use store::{FileStore, KeyValueStore, MemoryStore};
