//! Stepping scenario verification
//!
//! Scenarios describe a debugging session declaratively: breakpoints to
//! install, where the program halts first, and a sequence of stepping
//! operations with the stops each one must produce. The verifier checks
//! stops recorded by a session driver against those expectations.

mod breakpoint;
mod runner;
mod scenario;
mod session;
mod verifier;

pub use breakpoint::BreakpointLocation;
pub use runner::{run_suite, run_tests, verify_test, RunOptions, SuiteResult, TestResult};
pub use scenario::{load_suite, ActivityHandle, Step, StepKind, Stop, Test};
pub use session::{ObservedSession, ObservedTest};
pub use verifier::{count_expected_stops, verify_stops, StopMismatch};
