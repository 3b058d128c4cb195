//! Queued observer
//!
//! A [`QueuedObserver`] turns each synchronous notification into a
//! [`StateChange`] message on a bounded tokio channel. The notifier never
//! waits on the consumer: when the channel is full the change is dropped
//! and counted.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  update()  ┌────────────────┐  try_send  ┌──────────────┐
//! │   Subject    │───────────▶│ QueuedObserver │───────────▶│ mpsc channel │
//! └──────────────┘            └────────────────┘            └──────────────┘
//!                                                                  │
//!                                                                  ▼
//!                                                      ┌─────────────────────┐
//!                                                      │ dispatcher task     │
//!                                                      │ AsyncObserver::     │
//!                                                      │   on_change()       │
//!                                                      └─────────────────────┘
//! ```
//!
//! ## Queue lifetime
//!
//! The sending half lives inside the observer. The queue closes once the
//! observer has been detached (or its subject dropped) and every other
//! handle to it has been released. A dispatcher then drains what is left
//! and stops.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::traits::{Observer, Subject};

/// A state change captured at notification time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    /// Subject state when the notification ran
    pub state: i64,
    /// Per-observer notification counter, starting at 1
    pub sequence: u64,
    /// When the notification ran
    pub observed_at: DateTime<Utc>,
}

/// Observer that forwards notifications onto a bounded queue
pub struct QueuedObserver {
    name: String,
    subject: Weak<dyn Subject>,
    tx: mpsc::Sender<StateChange>,
    sequence: AtomicU64,
    dropped: AtomicU64,
}

impl QueuedObserver {
    /// Bind a new queued observer to `subject`
    ///
    /// # Parameters
    ///
    /// - `subject`: Subject to attach to
    /// - `name`: Name used in log records
    /// - `capacity`: Maximum number of undelivered changes
    ///
    /// # Returns
    ///
    /// - `Ok((observer, receiver))`: Observer is attached; changes arrive on `receiver`
    /// - `Err(Error::InvalidInput)`: `capacity` is zero
    pub fn attach_to<S: Subject + 'static>(
        subject: &Arc<S>,
        name: impl Into<String>,
        capacity: usize,
    ) -> Result<(Arc<Self>, mpsc::Receiver<StateChange>)> {
        if capacity == 0 {
            return Err(Error::invalid_input("queue capacity must be > 0"));
        }

        let handle: Arc<dyn Subject> = subject.clone();
        let (tx, rx) = mpsc::channel(capacity);

        let observer = Arc::new(Self {
            name: name.into(),
            subject: Arc::downgrade(&handle),
            tx,
            sequence: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        });

        handle.attach(observer.clone());
        Ok((observer, rx))
    }

    /// Number of changes dropped because the queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::SeqCst)
    }

    /// Number of notifications received so far
    pub fn notifications(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Capture the subject's current state and enqueue it
    ///
    /// # Returns
    ///
    /// - `Ok(sequence)`: The change was queued under `sequence`
    /// - `Err(Error::SubjectDropped)`: The subject no longer exists
    /// - `Err(Error::QueueFull)`: No room; the change was dropped and counted
    /// - `Err(Error::QueueClosed)`: The receiver is gone
    pub fn try_enqueue(&self) -> Result<u64> {
        let subject = self.subject.upgrade().ok_or(Error::SubjectDropped)?;

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let change = StateChange {
            state: subject.state(),
            sequence,
            observed_at: Utc::now(),
        };

        match self.tx.try_send(change) {
            Ok(()) => Ok(sequence),
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::SeqCst);
                Err(Error::QueueFull(sequence))
            }
            Err(TrySendError::Closed(_)) => Err(Error::QueueClosed),
        }
    }
}

impl Observer for QueuedObserver {
    fn update(&self) {
        match self.try_enqueue() {
            Ok(sequence) => trace!(observer = %self.name, sequence, "State change queued"),
            Err(e @ Error::QueueFull(_)) => warn!(
                observer = %self.name,
                "{}. Consider increasing queue.capacity or draining faster.",
                e
            ),
            Err(e) => debug!(observer = %self.name, "State change not queued: {}", e),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Trait for consumers of queued state changes
#[async_trait]
pub trait AsyncObserver: Send + Sync {
    /// Handle one state change
    async fn on_change(&self, change: StateChange);

    /// Name used in log records
    fn name(&self) -> &str {
        "async-observer"
    }
}

/// Drain `rx` on a tokio task, handing each change to `observer`
///
/// The task ends when the queue closes and resolves to the number of
/// changes handled.
pub fn spawn_dispatcher<A>(
    mut rx: mpsc::Receiver<StateChange>,
    observer: Arc<A>,
) -> JoinHandle<usize>
where
    A: AsyncObserver + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut handled = 0usize;

        while let Some(change) = rx.recv().await {
            trace!(
                observer = observer.name(),
                sequence = change.sequence,
                "Dispatching state change"
            );
            observer.on_change(change).await;
            handled += 1;
        }

        debug!(
            observer = observer.name(),
            handled,
            "Notification queue closed, dispatcher stopped"
        );
        handled
    })
}

/// Adapt a queue receiver into a `Stream`
pub fn into_stream(rx: mpsc::Receiver<StateChange>) -> ReceiverStream<StateChange> {
    ReceiverStream::new(rx)
}
