//! Cooperative cancellation for in-flight editor operations
//!
//! Every async session operation takes a [`CancelToken`]. Cancellation is
//! checked before the operation starts and again when it completes; a
//! cancelled result is discarded and reported as [`TaskOutcome::Cancelled`]
//! so the caller never applies it to editor state.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Result of a cancellable operation
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome<T, E> {
    Completed(T),
    Failed(E),
    /// The token was cancelled; any result was dropped
    Cancelled,
}

impl<T, E> TaskOutcome<T, E> {
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskOutcome::Completed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TaskOutcome::Cancelled)
    }

    pub fn ok(self) -> Option<T> {
        match self {
            TaskOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn err(self) -> Option<E> {
        match self {
            TaskOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TaskOutcome<U, E> {
        match self {
            TaskOutcome::Completed(value) => TaskOutcome::Completed(f(value)),
            TaskOutcome::Failed(err) => TaskOutcome::Failed(err),
            TaskOutcome::Cancelled => TaskOutcome::Cancelled,
        }
    }
}

/// Drive `fut` unless `token` is cancelled before it starts or by the time
/// it finishes.
pub async fn run_cancellable<T, E, F>(token: &CancelToken, fut: F) -> TaskOutcome<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    if token.is_cancelled() {
        return TaskOutcome::Cancelled;
    }
    let result = fut.await;
    if token.is_cancelled() {
        return TaskOutcome::Cancelled;
    }
    match result {
        Ok(value) => TaskOutcome::Completed(value),
        Err(err) => TaskOutcome::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_when_not_cancelled() {
        let token = CancelToken::new();
        let outcome: TaskOutcome<u32, String> = run_cancellable(&token, async { Ok(7) }).await;
        assert_eq!(outcome, TaskOutcome::Completed(7));
    }

    #[tokio::test]
    async fn test_cancelled_before_start_skips_work() {
        let token = CancelToken::new();
        token.clone().cancel();
        let mut ran = false;
        let outcome: TaskOutcome<(), String> = run_cancellable(&token, async {
            ran = true;
            Ok(())
        })
        .await;
        assert!(outcome.is_cancelled());
        assert!(!ran);
    }

    #[tokio::test]
    async fn test_cancelled_during_work_discards_result() {
        let token = CancelToken::new();
        let handle = token.clone();
        let outcome: TaskOutcome<u32, String> = run_cancellable(&token, async move {
            handle.cancel();
            Ok(1)
        })
        .await;
        assert!(outcome.is_cancelled());
    }

    #[test]
    fn test_outcome_accessors() {
        let failed: TaskOutcome<u32, &str> = TaskOutcome::Failed("boom");
        assert_eq!(failed.clone().err(), Some("boom"));
        assert_eq!(failed.map(|v| v + 1).ok(), None);
    }
}
