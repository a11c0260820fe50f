//! # Date Header
//!
//! Stamps every response with `Date`, whatever produced it: a handler, the
//! gate's 401, the 404 fallback or the panic handler.

use std::time::SystemTime;

use axum::response::Response;
use axum_extra::headers::{Date, HeaderMapExt};

/// `map_response` callback setting `Date` to now.
pub async fn stamp_date(mut response: Response) -> Response {
    response
        .headers_mut()
        .typed_insert(Date::from(SystemTime::now()));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn sets_date_header() {
        let response = stamp_date("ok".into_response()).await;
        let value = response.headers()[header::DATE].to_str().unwrap();
        assert!(value.ends_with("GMT"), "unexpected Date: {value}");
    }

    #[tokio::test]
    async fn replaces_existing_date() {
        let mut response = "ok".into_response();
        response
            .headers_mut()
            .insert(header::DATE, "yesterday".parse().unwrap());
        let response = stamp_date(response).await;
        assert_ne!(response.headers()[header::DATE], "yesterday");
        assert_eq!(response.headers().get_all(header::DATE).iter().count(), 1);
    }
}
