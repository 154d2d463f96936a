//! Fault isolation for calls into routing collaborators.
//!
//! `FaultIsolator` runs an operation, keeps its `Result` internally and
//! hands every failure to a `FaultReporter` instead of the caller.

mod isolator;
mod reporter;

pub use isolator::FaultIsolator;
pub use reporter::{FaultReport, FaultReporter, RecordingFaultReporter, TracingFaultReporter};
