// # Subject Trait
//
// Defines the interface for anything that owns observable state and a list
// of dependents to notify when that state changes.
//
// ## Implementations
//
// - `ConcreteSubject`: integer state, lock-guarded observer list
//
// ## Usage
//
// ```rust,ignore
// use observer_core::{ConcreteObserver, ConcreteSubject, Subject, SubjectExt};
//
// let subject = ConcreteSubject::shared();
// let observer = ConcreteObserver::new(&subject);
//
// subject.set_state(1); // prints "Observer state updated to: 1"
// subject.detach_observer(&observer);
// subject.set_state(2); // prints nothing
// ```

use std::sync::Arc;

use crate::traits::observer::Observer;

/// Trait for subject implementations
///
/// A subject keeps an ordered sequence of observers. Order is attachment
/// order and duplicates are allowed; an observer attached twice is notified
/// twice per state change.
///
/// # Identity
///
/// `detach` and `is_attached` compare observers by shared allocation
/// (`Arc::ptr_eq`), never by value equality. Two distinct observers that
/// happen to hold the same data are different observers, and an observer
/// embedded as a field of another is never mistaken for its container.
///
/// # Notification
///
/// `set_state` must not return before every observer attached at the time
/// of the call has had its `update` hook invoked. Implementations iterate a
/// snapshot of the sequence, so observers may attach or detach from inside
/// `update`; such changes apply from the next notification onwards.
pub trait Subject: Send + Sync {
    /// Append an observer to the end of the sequence
    fn attach(&self, observer: Arc<dyn Observer>);

    /// Remove the first occurrence of `observer`
    ///
    /// Detaching an observer that is not attached is a silent no-op.
    fn detach(&self, observer: &Arc<dyn Observer>);

    /// Invoke every attached observer's `update` in attachment order
    fn notify_observers(&self);

    /// Current state
    fn state(&self) -> i64;

    /// Store a new state, then notify every attached observer
    fn set_state(&self, value: i64);

    /// Number of entries in the observer sequence (duplicates counted)
    fn observer_count(&self) -> usize;

    /// Whether `observer` appears at least once in the sequence
    fn is_attached(&self, observer: &Arc<dyn Observer>) -> bool;
}

/// Convenience methods for observers held by their concrete type
///
/// The handle is cloned and coerced to `Arc<dyn Observer>`; the clone
/// shares the original allocation, so identity is preserved.
pub trait SubjectExt: Subject {
    /// Detach an observer held as `Arc<O>`
    fn detach_observer<O: Observer + 'static>(&self, observer: &Arc<O>) {
        let handle: Arc<dyn Observer> = observer.clone();
        self.detach(&handle);
    }

    /// Whether an observer held as `Arc<O>` is attached
    fn has_observer<O: Observer + 'static>(&self, observer: &Arc<O>) -> bool {
        let handle: Arc<dyn Observer> = observer.clone();
        self.is_attached(&handle)
    }
}

impl<S: Subject + ?Sized> SubjectExt for S {}
