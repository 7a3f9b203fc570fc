//! Request context carrying the caller's token and deadline.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;

/// Per-request state passed into every service method.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Bearer token, if the caller supplied one.
    pub token: Option<String>,
    /// Point after which pending store calls are abandoned.
    pub deadline: Option<Instant>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// A context with no token and no deadline.
    pub fn anonymous() -> Self {
        Self {
            token: None,
            deadline: None,
            request_time: Utc::now(),
        }
    }

    /// A context carrying `token`. Empty tokens count as absent.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
            ..Self::anonymous()
        }
    }

    /// Set the deadline `timeout` from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Whether any token accompanied the request.
    pub fn token_present(&self) -> bool {
        self.token.is_some()
    }

    /// Run `fut`, abandoning it when the deadline passes.
    ///
    /// Dropping the future cancels the underlying store call; an open
    /// transaction is rolled back when its handle is dropped.
    pub async fn run<T, F>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match self.deadline {
            None => fut.await,
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| AppError::cancelled("Request deadline exceeded."))?,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault_core::error::ErrorKind;

    #[test]
    fn empty_token_is_absent() {
        assert!(!RequestContext::with_token("").token_present());
        assert!(RequestContext::with_token("abc").token_present());
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_deadline_cancels() {
        let ctx = RequestContext::anonymous().with_timeout(Duration::from_secs(1));
        let err = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn completes_within_deadline() {
        let ctx = RequestContext::anonymous().with_timeout(Duration::from_secs(5));
        let value = ctx.run(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }
}
