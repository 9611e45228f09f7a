//! stepcheck - stepping scenario verification for debugger test harnesses
//!
//! This library checks the stops a debugger session produced against the
//! stops a scenario author declared, per stepping operation, and reports
//! the precise difference when they disagree.

pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{count_expected_stops, verify_stops, Step, Stop, StopMismatch, Test};
