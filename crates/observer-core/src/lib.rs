// # observer-core
//
// Core library for the subject/observer notification system.
//
// ## Architecture Overview
//
// This library provides the two roles of the observer pattern and their
// reference implementations:
// - **Subject**: Trait for owning state and notifying dependents
// - **Observer**: Trait for reacting to a subject's state changes
// - **ConcreteSubject**: Integer-state subject with a lock-guarded observer list
// - **ConcreteObserver**: Observer that mirrors state and reports each change
// - **QueuedObserver**: Observer that hands changes to an async consumer
//
// ## Design Principles
//
// 1. **Pull model**: Notifications carry no payload; observers read state back
// 2. **Non-owning back-reference**: Observers hold `Weak` handles to subjects
// 3. **Snapshot iteration**: Observers may attach/detach during notification
// 4. **Synchronous fan-out**: `set_state` returns after every observer ran
// 5. **Library-First**: The demo binary is a thin layer over this crate

pub mod config;
pub mod error;
pub mod observer;
pub mod subject;
pub mod traits;

// Re-export core types for convenience
pub use config::{DemoConfig, ObserverConfig, QueueConfig};
pub use error::{Error, Result};
pub use observer::{AsyncObserver, ConcreteObserver, QueuedObserver, StateChange};
pub use subject::ConcreteSubject;
pub use traits::{Observer, Subject, SubjectExt};
