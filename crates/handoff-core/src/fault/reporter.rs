//! Fault reporting side-channel.

use std::sync::Mutex;

use crate::error::HandoffError;

/// Receives every failure absorbed by a `FaultIsolator`.
pub trait FaultReporter: Send + Sync {
    /// Records `error`, raised while running the operation labelled `operation`.
    fn report(&self, operation: &str, error: &HandoffError);
}

/// Default reporter: writes absorbed failures to the tracing subscriber.
///
/// `NoMatch` is an expected outcome of repeated deletes and is logged at
/// debug level; everything else is an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFaultReporter;

impl FaultReporter for TracingFaultReporter {
    fn report(&self, operation: &str, error: &HandoffError) {
        if error.is_no_match() {
            tracing::debug!(operation, %error, "[FaultIsolator] Nothing to do");
        } else {
            tracing::error!(operation, %error, "[FaultIsolator] Isolated operation failed");
        }
    }
}

/// A single absorbed failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultReport {
    pub operation: String,
    pub error: HandoffError,
}

/// Keeps every report in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingFaultReporter {
    reports: Mutex<Vec<FaultReport>>,
}

impl RecordingFaultReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all reports received so far.
    pub fn reports(&self) -> Vec<FaultReport> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_empty()
    }

    /// Counts reports whose error satisfies `predicate`.
    pub fn count_where(&self, predicate: impl Fn(&HandoffError) -> bool) -> usize {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|report| predicate(&report.error))
            .count()
    }
}

impl FaultReporter for RecordingFaultReporter {
    fn report(&self, operation: &str, error: &HandoffError) {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(FaultReport {
                operation: operation.to_string(),
                error: error.clone(),
            });
    }
}
