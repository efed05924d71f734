//! Single-slot write-through queue for the theme preference
//!
//! Mutations drop their value into a `watch` slot; one worker task drains
//! it, keeping at most one store write in flight. A value queued behind an
//! in-flight write is replaced by any newer one, so the store always ends on
//! the most recent mode and never goes backwards.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use storage::{PreferenceStore, ThemeMode};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

/// A mode waiting to be persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingWrite {
    /// Monotonic mutation counter
    pub generation: u64,
    /// Mode to persist
    pub mode: ThemeMode,
}

struct Worker {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

enum QueueState {
    /// Not started; holds the receiving end of the slot
    Idle(watch::Receiver<Option<PendingWrite>>),
    Running(Worker),
    Stopped,
}

/// Serialized write-through of theme mode changes
pub(crate) struct WriteQueue {
    slot: watch::Sender<Option<PendingWrite>>,
    settled: Arc<watch::Sender<u64>>,
    /// Flips to true once the worker has exited
    stopped: watch::Sender<bool>,
    issued: AtomicU64,
    state: Mutex<QueueState>,
}

impl WriteQueue {
    pub fn new() -> Self {
        let (slot, slot_rx) = watch::channel(None);
        let (settled, _) = watch::channel(0);
        let (stopped, _) = watch::channel(false);

        Self {
            slot,
            settled: Arc::new(settled),
            stopped,
            issued: AtomicU64::new(0),
            state: Mutex::new(QueueState::Idle(slot_rx)),
        }
    }

    /// Queue `mode` for persistence, superseding any value not yet picked up
    ///
    /// Callers serialize enqueues with their own state lock so generations
    /// follow mutation order.
    pub fn enqueue(&self, mode: ThemeMode) -> u64 {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.slot.send_replace(Some(PendingWrite { generation, mode }));

        if matches!(*self.state.lock(), QueueState::Stopped) {
            tracing::debug!(%mode, "theme resolver disposed; change will not be persisted");
        }
        generation
    }

    /// Spawn the worker; returns false if it was already started or stopped
    pub fn start(&self, store: Arc<dyn PreferenceStore>, key: String) -> bool {
        let mut state = self.state.lock();
        let slot_rx = match std::mem::replace(&mut *state, QueueState::Stopped) {
            QueueState::Idle(rx) => rx,
            other => {
                *state = other;
                return false;
            }
        };

        let (stop_tx, stop_rx) = oneshot::channel();
        let settled = Arc::clone(&self.settled);
        let handle = tokio::spawn(run_worker(slot_rx, stop_rx, store, key, settled));

        *state = QueueState::Running(Worker { stop_tx, handle });
        true
    }

    /// Stop the worker after it persists the latest pending value
    pub async fn stop(&self) {
        let previous = std::mem::replace(&mut *self.state.lock(), QueueState::Stopped);

        if let QueueState::Running(worker) = previous {
            let _ = worker.stop_tx.send(());
            if let Err(e) = worker.handle.await {
                tracing::error!(error = %e, "theme write worker panicked");
            }
        }
        self.stopped.send_replace(true);
    }

    /// Wait until every change enqueued so far has been handed to the store
    ///
    /// Returns immediately when no worker is running, and as soon as the
    /// worker stops if that happens first.
    pub async fn flush(&self) {
        let target = self.issued.load(Ordering::SeqCst);
        if !matches!(*self.state.lock(), QueueState::Running(_)) {
            return;
        }

        let mut settled_rx = self.settled.subscribe();
        let mut stopped_rx = self.stopped.subscribe();
        tokio::select! {
            _ = settled_rx.wait_for(|settled| *settled >= target) => {}
            _ = stopped_rx.wait_for(|stopped| *stopped) => {}
        }
    }
}

async fn run_worker(
    mut slot_rx: watch::Receiver<Option<PendingWrite>>,
    mut stop_rx: oneshot::Receiver<()>,
    store: Arc<dyn PreferenceStore>,
    key: String,
    settled: Arc<watch::Sender<u64>>,
) {
    loop {
        tokio::select! {
            biased;
            changed = slot_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let pending = *slot_rx.borrow_and_update();
                if let Some(write) = pending {
                    persist(store.as_ref(), &key, write).await;
                    settled.send_replace(write.generation);
                }
            }
            _ = &mut stop_rx => {
                if slot_rx.has_changed().unwrap_or(false) {
                    let pending = *slot_rx.borrow_and_update();
                    if let Some(write) = pending {
                        persist(store.as_ref(), &key, write).await;
                        settled.send_replace(write.generation);
                    }
                }
                break;
            }
        }
    }

    tracing::debug!("theme write worker stopped");
}

async fn persist(store: &dyn PreferenceStore, key: &str, write: PendingWrite) {
    match store.set(key, write.mode.as_str()).await {
        Ok(()) => {
            tracing::debug!(key, mode = %write.mode, generation = write.generation, "persisted theme mode");
        }
        Err(error) => {
            tracing::warn!(
                key,
                mode = %write.mode,
                %error,
                "failed to persist theme mode; in-memory value stays authoritative"
            );
        }
    }
}
