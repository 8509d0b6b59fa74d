//! Background execution of backend calls.
//!
//! Blocking requests run on short-lived threads and report back through a
//! channel that the UI polls once per frame.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use super::mutation::{MoveReceipt, MoveTicket};
use crate::services::api::{ApiError, PlanningBackend};

/// A move whose request has completed, successfully or not.
#[derive(Debug)]
pub struct CompletedMove {
    pub receipt: MoveReceipt,
    pub outcome: Result<(), ApiError>,
}

/// Sends move requests off the UI thread.
pub struct MutationWorker {
    backend: Arc<dyn PlanningBackend>,
    tx: Sender<CompletedMove>,
    rx: Receiver<CompletedMove>,
    pending: usize,
}

impl MutationWorker {
    pub fn new(backend: Arc<dyn PlanningBackend>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            backend,
            tx,
            rx,
            pending: 0,
        }
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Send the ticket's request on a new thread. Every dispatched move is
    /// reported by `poll`, even when the backend call panics.
    pub fn dispatch(&mut self, ticket: MoveTicket) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.pending += 1;

        thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| backend.send(&ticket.request)))
                .unwrap_or_else(|_| {
                    log::error!("Move worker for {} panicked", ticket.receipt.key);
                    Err(ApiError::Network("move worker stopped".to_string()))
                });
            let _ = tx.send(CompletedMove {
                receipt: ticket.receipt,
                outcome,
            });
        });
    }

    /// Drain every move that finished since the last call.
    pub fn poll(&mut self) -> Vec<CompletedMove> {
        let mut completed = Vec::new();
        while let Ok(done) = self.rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            completed.push(done);
        }
        completed
    }
}

/// Result of polling a [`BackgroundTask`].
#[derive(Debug, PartialEq)]
pub enum TaskPoll<T> {
    Ready(T),
    Pending,
    /// The worker thread ended without reporting
    Lost,
}

/// One blocking job running on its own thread.
pub struct BackgroundTask<T> {
    rx: Receiver<T>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(job());
        });
        Self { rx }
    }

    pub fn poll(&self) -> TaskPoll<T> {
        match self.rx.try_recv() {
            Ok(value) => TaskPoll::Ready(value),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }
}
