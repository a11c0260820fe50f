//! # Request/Response Tracing
//!
//! `tower_http::trace::TraceLayer` with a span carrying only method and
//! path. Query strings and headers stay out of the span, so credentials
//! never reach the logs.

use axum::http::Request;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Span factory for director requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

/// Build the trace layer. Responses are logged at `INFO` with latency.
pub fn layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_built_without_query() {
        let request = Request::builder()
            .uri("/info?token=abc")
            .body(())
            .unwrap();
        let span = RequestSpan.make_span(&request);
        // No subscriber is installed in unit tests, so the span is disabled;
        // building it must still succeed.
        drop(span);
    }
}
