// # Observer Implementations
//
// This module provides implementations of the Observer trait.
//
// - `ConcreteObserver`: mirrors state and writes one line per update
// - `QueuedObserver`: forwards updates onto a bounded async queue

pub mod concrete;
pub mod queued;

pub use concrete::ConcreteObserver;
pub use queued::{AsyncObserver, QueuedObserver, StateChange, into_stream, spawn_dispatcher};
