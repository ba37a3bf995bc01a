//! Single-writer save queue
//!
//! Edits enqueue grid snapshots and return immediately. One worker thread
//! writes them in the order they were issued, so the stored state always
//! ends at the latest edit. Snapshots still waiting behind a newer one are
//! skipped. Failed saves are logged and not retried.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, warn};

use crate::types::Grid;

use super::gateway::PersistenceGateway;
use super::store::KeyValueStore;

enum SaveCommand {
    Save(Grid),
    Flush(Sender<()>),
}

/// Background writer for a [`PersistenceGateway`]
pub struct SaveQueue {
    sender: Option<Sender<SaveCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl SaveQueue {
    /// Start the worker thread that owns `gateway`
    pub fn spawn<S>(gateway: PersistenceGateway<S>) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let (tx, rx) = channel();
        let worker = thread::Builder::new()
            .name("sheets-save".to_string())
            .spawn(move || run_worker(gateway, rx));

        match worker {
            Ok(handle) => Self {
                sender: Some(tx),
                worker: Some(handle),
            },
            Err(e) => {
                // Without a worker every enqueue becomes a logged no-op
                error!("Failed to start save worker: {}", e);
                Self {
                    sender: None,
                    worker: None,
                }
            }
        }
    }

    /// Queue a snapshot for saving; returns without waiting
    pub fn enqueue(&self, grid: Grid) {
        let Some(sender) = &self.sender else {
            warn!("save worker unavailable, grid not persisted");
            return;
        };
        if sender.send(SaveCommand::Save(grid)).is_err() {
            warn!("save worker stopped, grid not persisted");
        }
    }

    /// Block until every snapshot queued so far has been written (or failed)
    pub fn flush(&self) {
        let Some(sender) = &self.sender else {
            return;
        };
        let (ack_tx, ack_rx) = channel();
        if sender.send(SaveCommand::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for SaveQueue {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain what is left and exit
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("save worker panicked");
            }
        }
    }
}

fn run_worker<S: KeyValueStore>(gateway: PersistenceGateway<S>, rx: Receiver<SaveCommand>) {
    while let Ok(command) = rx.recv() {
        match command {
            SaveCommand::Save(grid) => {
                let mut latest = grid;
                let mut pending_flush = Vec::new();
                let mut skipped = 0usize;

                // Coalesce whatever is already queued behind this snapshot
                while let Ok(next) = rx.try_recv() {
                    match next {
                        SaveCommand::Save(newer) => {
                            latest = newer;
                            skipped += 1;
                        }
                        SaveCommand::Flush(ack) => pending_flush.push(ack),
                    }
                }
                if skipped > 0 {
                    debug!(skipped, "coalesced queued saves");
                }

                write(&gateway, &latest);
                for ack in pending_flush {
                    let _ = ack.send(());
                }
            }
            SaveCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("save worker finished");
}

fn write<S: KeyValueStore>(gateway: &PersistenceGateway<S>, grid: &Grid) {
    match gateway.save(grid) {
        Ok(()) => debug!("Grid data saved successfully"),
        Err(e) => error!("Error saving grid data: {}", e),
    }
}
