//! Builder API for ergonomic controller construction.
//!
//! This module provides a fluent builder and the `chain!` macro for wiring
//! sensor events to actions with minimal boilerplate.

pub mod controller;
pub mod error;
pub mod macros;

pub use controller::ControllerBuilder;
pub use error::BuildError;
