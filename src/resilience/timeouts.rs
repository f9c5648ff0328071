//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap store calls with a deadline
//! - Cancel the pending operation cleanly when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from connect and command errors
//! - A timed-out store call is reported the same way as an unreachable store

use std::future::Future;
use std::time::Duration;

use crate::store::{StoreError, StoreResult};

/// Run `operation`, failing with [`StoreError::Timeout`] once `limit` passes.
pub async fn with_timeout<T, F>(limit: Duration, operation: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "Store operation timed out");
            Err(StoreError::Timeout(limit.as_millis() as u64))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_limit() {
        let value = with_timeout(Duration::from_millis(100), async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let err = with_timeout::<(), _>(Duration::from_millis(100), async {
            Err(StoreError::Command("boom".into()))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Command(_)));
    }

    #[tokio::test]
    async fn test_slow_operation_times_out() {
        let err = with_timeout(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Timeout(20)));
    }
}
