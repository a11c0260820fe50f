//! # Middleware Modules
//!
//! Tower layers wrapped around the whole router by
//! [`ApiRouter::finish`](crate::router::ApiRouter::finish). The gate itself
//! lives in [`crate::gate`] because it is installed per route.

pub mod date;
pub mod panic;
pub mod tracing_layer;
