// # Concrete Subject
//
// Integer-state implementation of Subject.
//
// ## Locking
//
// - The observer sequence sits behind an `RwLock`
// - `attach`/`detach` take the write lock for the duration of one push or
//   one remove
// - `notify_observers` takes the read lock only to clone the handles, then
//   releases it before calling any observer
//
// No lock is ever held while observer code runs, so observers are free to
// call `attach`, `detach`, `state` or even `set_state` from `update`.
//
// ## Poisoning
//
// Every critical section is a single `Vec` operation that cannot leave the
// sequence half-modified, so a poisoned lock is recovered instead of
// propagated.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use crate::traits::{Observer, Subject};

/// Subject holding an integer state
///
/// # Example
///
/// ```rust
/// use observer_core::{ConcreteSubject, Subject};
///
/// let subject = ConcreteSubject::shared();
/// assert_eq!(subject.state(), 0);
///
/// subject.set_state(7);
/// assert_eq!(subject.state(), 7);
/// ```
#[derive(Default)]
pub struct ConcreteSubject {
    state: AtomicI64,
    observers: RwLock<Vec<Arc<dyn Observer>>>,
}

impl ConcreteSubject {
    /// Create a new subject with state `0` and no observers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new subject behind an `Arc`, ready for observers to bind to
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Create a subject with an initial state
    ///
    /// No notification is sent for the initial value.
    pub fn with_state(value: i64) -> Self {
        Self {
            state: AtomicI64::new(value),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Names of the attached observers, in notification order
    pub fn observer_names(&self) -> Vec<String> {
        self.read_observers()
            .iter()
            .map(|observer| observer.name().to_string())
            .collect()
    }

    fn read_observers(&self) -> RwLockReadGuard<'_, Vec<Arc<dyn Observer>>> {
        self.observers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_observers(&self) -> RwLockWriteGuard<'_, Vec<Arc<dyn Observer>>> {
        self.observers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Subject for ConcreteSubject {
    fn attach(&self, observer: Arc<dyn Observer>) {
        debug!(observer = observer.name(), "Attaching observer");
        self.write_observers().push(observer);
    }

    fn detach(&self, observer: &Arc<dyn Observer>) {
        // The removed handle is dropped after the guard, so an observer whose
        // Drop impl touches this subject cannot deadlock.
        let removed = {
            let mut observers = self.write_observers();
            let index = observers
                .iter()
                .position(|attached| Arc::ptr_eq(attached, observer));
            index.map(|index| observers.remove(index))
        };

        match removed {
            Some(removed) => debug!(observer = removed.name(), "Detached observer"),
            None => debug!(
                observer = observer.name(),
                "Observer not attached, detach ignored"
            ),
        }
    }

    fn notify_observers(&self) {
        let snapshot: Vec<Arc<dyn Observer>> = self.read_observers().clone();

        debug!(
            observers = snapshot.len(),
            state = self.state(),
            "Notifying observers"
        );

        for observer in &snapshot {
            trace!(observer = observer.name(), "Updating observer");
            observer.update();
        }
    }

    fn state(&self) -> i64 {
        self.state.load(Ordering::SeqCst)
    }

    fn set_state(&self, value: i64) {
        self.state.store(value, Ordering::SeqCst);
        self.notify_observers();
    }

    fn observer_count(&self) -> usize {
        self.read_observers().len()
    }

    fn is_attached(&self, observer: &Arc<dyn Observer>) -> bool {
        self.read_observers()
            .iter()
            .any(|attached| Arc::ptr_eq(attached, observer))
    }
}

impl fmt::Debug for ConcreteSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcreteSubject")
            .field("state", &self.state())
            .field("observers", &self.observer_names())
            .finish()
    }
}
