//! # Health Probes
//!
//! Routes:
//! - GET /health/liveness — always `ok` while the process runs
//! - GET /health/readiness — `ready` once the router is serving

use axum::routing::get;

use crate::router::{AuthPolicy, RouteGroup};

/// Probe group. Never requires authentication.
pub fn group() -> RouteGroup {
    RouteGroup::new("health")
        .with_policy(AuthPolicy::always_unauthenticated())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
}

async fn liveness() -> &'static str {
    "ok"
}

async fn readiness() -> &'static str {
    "ready"
}
