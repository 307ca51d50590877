//! # Request Metrics
//!
//! In-process atomic counters, exposed as JSON at `GET /metrics`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shared metrics state.
#[derive(Debug, Clone)]
pub struct ApiMetrics {
    pub request_count: Arc<AtomicU64>,
    pub error_count: Arc<AtomicU64>,
    pub proofs_generated: Arc<AtomicU64>,
    pub proofs_verified: Arc<AtomicU64>,
    pub proofs_rejected: Arc<AtomicU64>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub errors: u64,
    pub proofs_generated: u64,
    pub proofs_verified: u64,
    pub proofs_rejected: u64,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self {
            request_count: Arc::new(AtomicU64::new(0)),
            error_count: Arc::new(AtomicU64::new(0)),
            proofs_generated: Arc::new(AtomicU64::new(0)),
            proofs_verified: Arc::new(AtomicU64::new(0)),
            proofs_rejected: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a stateless verification outcome.
    pub fn record_verification(&self, valid: bool) {
        let counter = if valid {
            &self.proofs_verified
        } else {
            &self.proofs_rejected
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_generation(&self) {
        self.proofs_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.request_count.load(Ordering::Relaxed),
            errors: self.error_count.load(Ordering::Relaxed),
            proofs_generated: self.proofs_generated.load(Ordering::Relaxed),
            proofs_verified: self.proofs_verified.load(Ordering::Relaxed),
            proofs_rejected: self.proofs_rejected.load(Ordering::Relaxed),
        }
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware that increments request and error counters.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.request_count.fetch_add(1, Ordering::Relaxed);
        if response.status().is_server_error() || response.status().is_client_error() {
            m.error_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    response
}

/// GET /metrics: Current counter values.
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Counter snapshot", body = MetricsSnapshot),
    ),
    tag = "operations"
)]
pub async fn metrics_handler(Extension(metrics): Extension<ApiMetrics>) -> Json<MetricsSnapshot> {
    Json(metrics.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let snapshot = ApiMetrics::new().snapshot();
        assert_eq!(snapshot.requests, 0);
        assert_eq!(snapshot.proofs_generated, 0);
    }

    #[test]
    fn clones_share_counters() {
        let metrics = ApiMetrics::new();
        let clone = metrics.clone();
        clone.record_generation();
        clone.record_verification(true);
        clone.record_verification(false);
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.proofs_generated, 1);
        assert_eq!(snapshot.proofs_verified, 1);
        assert_eq!(snapshot.proofs_rejected, 1);
    }
}
