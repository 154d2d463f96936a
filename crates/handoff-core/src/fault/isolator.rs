//! Fault-isolating executor.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use super::reporter::{FaultReporter, TracingFaultReporter};
use crate::error::{HandoffError, Result};

/// Runs operations against routing collaborators so that no failure,
/// including a panic, escapes to the caller.
///
/// `try_get` is the primitive: it keeps the `Result` and reports the error.
/// `get` and `execute` collapse it to `Option<T>` and `()` for call sites
/// that only need best-effort behaviour.
#[derive(Clone)]
pub struct FaultIsolator {
    reporter: Arc<dyn FaultReporter>,
}

impl FaultIsolator {
    pub fn new(reporter: Arc<dyn FaultReporter>) -> Self {
        Self { reporter }
    }

    /// Creates an isolator that reports through `tracing`.
    pub fn with_tracing() -> Self {
        Self::new(Arc::new(TracingFaultReporter))
    }

    /// Awaits `operation`, reporting any failure before returning it.
    ///
    /// A panic inside `operation` is caught and surfaced as
    /// `HandoffError::Panicked`.
    pub async fn try_get<T, F>(&self, label: &str, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let outcome = match AssertUnwindSafe(operation).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(HandoffError::Panicked(panic_message(payload.as_ref()))),
        };

        if let Err(error) = &outcome {
            self.report(label, error);
        }

        outcome
    }

    /// Returns the operation's value, or `None` after reporting its failure.
    pub async fn get<T, F>(&self, label: &str, operation: F) -> Option<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.try_get(label, operation).await.ok()
    }

    /// Runs the operation for its side effect. Always returns normally.
    pub async fn execute<F>(&self, label: &str, operation: F)
    where
        F: Future<Output = Result<()>>,
    {
        let _ = self.try_get(label, operation).await;
    }

    /// Forwards a failure detected by the caller itself.
    pub fn report(&self, label: &str, error: &HandoffError) {
        self.reporter.report(label, error);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::RecordingFaultReporter;

    fn isolator() -> (FaultIsolator, Arc<RecordingFaultReporter>) {
        let reporter = Arc::new(RecordingFaultReporter::new());
        (FaultIsolator::new(reporter.clone()), reporter)
    }

    async fn crashing_fetch() -> Result<u32> {
        panic!("store driver crashed")
    }

    #[tokio::test]
    async fn test_get_returns_value_without_report() {
        let (isolator, reporter) = isolator();

        let value = isolator.get("answer", async { Ok(42) }).await;

        assert_eq!(value, Some(42));
        assert!(reporter.is_empty());
    }

    #[tokio::test]
    async fn test_get_reports_and_returns_none() {
        let (isolator, reporter) = isolator();

        let value: Option<Vec<u8>> = isolator
            .get("get_connections", async {
                Err(HandoffError::store_unavailable("connection refused"))
            })
            .await;

        assert!(value.is_none());
        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].operation, "get_connections");
        assert!(reports[0].error.is_store_unavailable());
    }

    #[tokio::test]
    async fn test_try_get_preserves_error_kind() {
        let (isolator, reporter) = isolator();

        let result: Result<()> = isolator
            .try_get("disconnect", async {
                Err(HandoffError::teardown_failure("skype", "c1", "timeout"))
            })
            .await;

        assert!(result.unwrap_err().is_teardown_failure());
        assert_eq!(reporter.count_where(HandoffError::is_teardown_failure), 1);
    }

    #[tokio::test]
    async fn test_execute_swallows_failure() {
        let (isolator, reporter) = isolator();

        isolator
            .execute("disconnect", async { Err(HandoffError::internal("boom")) })
            .await;
        isolator.execute("disconnect", async { Ok(()) }).await;

        assert_eq!(reporter.reports().len(), 1);
    }

    #[tokio::test]
    async fn test_panic_is_contained_and_reported() {
        let (isolator, reporter) = isolator();

        let value = isolator.get("explode", crashing_fetch()).await;

        assert!(value.is_none());
        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].error,
            HandoffError::Panicked("store driver crashed".to_string())
        );
    }

    #[tokio::test]
    async fn test_report_forwards_caller_detected_errors() {
        let (isolator, reporter) = isolator();

        isolator.report("delete_conversation", &HandoffError::no_match("skype", "c9"));

        assert_eq!(reporter.count_where(HandoffError::is_no_match), 1);
    }
}
