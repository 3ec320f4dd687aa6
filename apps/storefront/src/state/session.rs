//! # Session State
//!
//! Owns the selection engine for the running session.
//!
//! ## Thread Safety
//! The engine is wrapped in `Arc<Mutex<T>>`: every command runs against it
//! one at a time, which keeps operations atomic with respect to each other.
//!
//! ## Observers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Command                  SessionState              Side effects        │
//! │  ───────                  ────────────              ────────────        │
//! │                                                                         │
//! │  get_cart ───────────────► with_engine() ─────────► (read only)        │
//! │                                                                         │
//! │  add_to_cart ────────────► with_engine_mut() ─────► snapshot published  │
//! │                                  │                  on watch channel   │
//! │                                  └────────────────► notices buffered   │
//! │                                                                         │
//! │  response ◄────────────── drain_notices()                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use medicare_core::notify::NoticeBuffer;
use medicare_core::{AuthSignal, Catalog, Notice, Notifier, SelectionEngine, SelectionSnapshot};
use tokio::sync::watch;
use tracing::debug;

/// Selection state for one session.
#[derive(Debug)]
pub struct SessionState {
    catalog: Arc<Catalog>,
    engine: Arc<Mutex<SelectionEngine>>,
    notices: Arc<NoticeBuffer>,
    snapshot_tx: watch::Sender<SelectionSnapshot>,
}

impl SessionState {
    pub fn new(catalog: Arc<Catalog>, auth: Arc<dyn AuthSignal>) -> Self {
        let notices = Arc::new(NoticeBuffer::new());
        let engine = SelectionEngine::new(catalog.clone(), auth, notices.clone());
        let (snapshot_tx, _rx) = watch::channel(engine.snapshot());

        SessionState {
            catalog,
            engine: Arc::new(Mutex::new(engine)),
            notices,
            snapshot_tx,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Executes a function with read access to the engine.
    pub fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SelectionEngine) -> R,
    {
        let engine = self.lock();
        f(&engine)
    }

    /// Executes a function with write access to the engine, then publishes
    /// the new snapshot if anything changed.
    pub fn with_engine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SelectionEngine) -> R,
    {
        let mut engine = self.lock();
        let result = f(&mut engine);

        let snapshot = engine.snapshot();
        let published = self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot;
            true
        });
        if published {
            debug!("Selection snapshot published");
        }

        result
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SelectionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Sends a notice through the session's notice buffer.
    pub fn notify(&self, notice: Notice) {
        self.notices.notify(notice);
    }

    /// Takes the notices produced since the last call.
    pub fn drain_notices(&self) -> Vec<Notice> {
        self.notices.drain()
    }

    fn lock(&self) -> MutexGuard<'_, SelectionEngine> {
        self.engine.lock().unwrap_or_else(|e| e.into_inner())
    }
}
