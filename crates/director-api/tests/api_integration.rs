//! # Director API Integration Tests
//!
//! The assembled router from `director_api::app`: info and health probes are
//! open, `/users/me` and unknown routes are gated.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum_extra::headers::{Authorization, HeaderMapExt};
use director_api::routes::info::InfoResponse;
use director_api::routes::users::CurrentUserResponse;
use director_api::DirectorConfig;
use http_body_util::BodyExt;
use tower::ServiceExt;

const CONFIG: &str = r#"
name: test-director
auth:
  realm: Test Director
  users:
    - name: alice
      password: s3cret
      roles: [admin, read]
"#;

fn test_app() -> axum::Router {
    director_api::app(DirectorConfig::from_yaml(CONFIG, "inline").unwrap())
}

fn request(uri: &str, credential: Option<(&str, &str)>) -> Request<Body> {
    let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    if let Some((user, pass)) = credential {
        request
            .headers_mut()
            .typed_insert(Authorization::basic(user, pass));
    }
    request
}

async fn body_bytes(response: axum::http::Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

#[tokio::test]
async fn info_is_public() {
    let response = test_app().oneshot(request("/info", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::DATE).is_some());

    let info: InfoResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(info.name, "test-director");
    assert_eq!(info.user_authentication.kind, "basic");
    assert_eq!(info.user_authentication.realm, "Test Director");
}

#[tokio::test]
async fn health_probes_are_public() {
    let app = test_app();
    for (uri, expected) in [("/health/liveness", "ok"), ("/health/readiness", "ready")] {
        let response = app.clone().oneshot(request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, expected.as_bytes());
    }
}

#[tokio::test]
async fn users_me_requires_authentication() {
    let response = test_app().oneshot(request("/users/me", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()[header::WWW_AUTHENTICATE],
        "Basic realm=\"Test Director\""
    );
}

#[tokio::test]
async fn users_me_returns_identity() {
    let response = test_app()
        .oneshot(request("/users/me", Some(("alice", "s3cret"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let me: CurrentUserResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(me.user, "alice");
    assert_eq!(me.roles, vec!["admin".to_string(), "read".to_string()]);
}

#[tokio::test]
async fn bootstrap_admin_disabled_when_users_configured() {
    let response = test_app()
        .oneshot(request("/users/me", Some(("admin", "admin"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_route_gated_then_not_found() {
    let app = test_app();

    let anonymous = app
        .clone()
        .oneshot(request("/deployments", None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let authenticated = app
        .oneshot(request("/deployments", Some(("alice", "s3cret"))))
        .await
        .unwrap();
    assert_eq!(authenticated.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(authenticated).await).unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(!body.to_string().contains("alice"));
}
