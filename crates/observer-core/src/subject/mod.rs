// # Subject Implementations
//
// This module provides implementations of the Subject trait.

pub mod concrete;

pub use concrete::ConcreteSubject;
