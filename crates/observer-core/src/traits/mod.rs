//! Core traits for the observer system
//!
//! This module defines the two roles every implementation plays.
//!
//! - [`Subject`]: Own state and notify dependents when it changes
//! - [`Observer`]: React to notifications by pulling state from the subject

pub mod observer;
pub mod subject;

pub use observer::Observer;
pub use subject::{Subject, SubjectExt};
