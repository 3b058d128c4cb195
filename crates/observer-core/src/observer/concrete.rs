// # Concrete Observer
//
// Reference implementation of Observer.
//
// On every notification it pulls the subject's state, caches it, and writes
// one line to its output sink:
//
// ```text
// Observer state updated to: <integer>
// ```
//
// The sink is stdout unless another writer is supplied, which is how the
// tests capture output.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::traits::{Observer, Subject};

/// Observer that mirrors its subject's state and reports each change
///
/// The observer attaches itself during construction and keeps only a weak
/// handle to the subject, so it never extends the subject's lifetime.
///
/// # Example
///
/// ```rust
/// use observer_core::{ConcreteObserver, ConcreteSubject, Subject};
///
/// let subject = ConcreteSubject::shared();
/// let observer = ConcreteObserver::with_writer(&subject, "log", Box::new(std::io::sink()));
///
/// subject.set_state(5);
/// assert_eq!(observer.observer_state(), 5);
/// ```
pub struct ConcreteObserver {
    name: String,
    observer_state: AtomicI64,
    subject: Weak<dyn Subject>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConcreteObserver {
    /// Bind a new observer to `subject`, reporting to stdout
    pub fn new<S: Subject + 'static>(subject: &Arc<S>) -> Arc<Self> {
        Self::with_writer(subject, "observer", Box::new(io::stdout()))
    }

    /// Bind a new named observer to `subject`, reporting to `writer`
    pub fn with_writer<S: Subject + 'static>(
        subject: &Arc<S>,
        name: impl Into<String>,
        writer: Box<dyn Write + Send>,
    ) -> Arc<Self> {
        let handle: Arc<dyn Subject> = subject.clone();

        let observer = Arc::new(Self {
            name: name.into(),
            observer_state: AtomicI64::new(0),
            subject: Arc::downgrade(&handle),
            out: Mutex::new(writer),
        });

        handle.attach(observer.clone());
        observer
    }

    /// State cached at the last notification (`0` before the first one)
    pub fn observer_state(&self) -> i64 {
        self.observer_state.load(Ordering::SeqCst)
    }

    /// Strong handle to the bound subject
    ///
    /// # Returns
    ///
    /// - `Ok(Arc<dyn Subject>)`: The subject is still alive
    /// - `Err(Error::SubjectDropped)`: The subject has been dropped
    pub fn subject(&self) -> Result<Arc<dyn Subject>> {
        self.subject.upgrade().ok_or(Error::SubjectDropped)
    }

    fn report(&self, state: i64) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "Observer state updated to: {}", state)?;
        out.flush()
    }
}

impl Observer for ConcreteObserver {
    fn update(&self) {
        let subject = match self.subject() {
            Ok(subject) => subject,
            Err(e) => {
                debug!(observer = %self.name, "Update ignored: {}", e);
                return;
            }
        };

        let state = subject.state();
        self.observer_state.store(state, Ordering::SeqCst);
        trace!(observer = %self.name, state, "Observer state updated");

        if let Err(e) = self.report(state) {
            warn!(observer = %self.name, "Failed to write state update: {}", e);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ConcreteObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcreteObserver")
            .field("name", &self.name)
            .field("observer_state", &self.observer_state())
            .field("subject_alive", &(self.subject.strong_count() > 0))
            .finish()
    }
}
