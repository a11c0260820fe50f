//! # Authentication Gate
//!
//! The single enforcement point in front of every route. [`intercept`] runs
//! as axum middleware around each registered route and around the 404
//! fallback, so unknown routes are gated exactly like known ones.
//!
//! ## Decision
//!
//! ```text
//! auth not required ──────────────────────────────► handler (no identity)
//! auth required ─► Basic credential? ─ no ────────► 401
//!                          │ yes
//!                          ▼
//!                  provider.authenticate ─ reject ─► 401
//!                          │ accept      ─ fault ──► 500
//!                          │             ─ timeout ► 503
//!                          ▼
//!                  handler (identity in extensions)
//! ```
//!
//! A client without credentials gets 401 before routing is disclosed: the
//! fallback returns 404 only once the gate has let the request through.
//!
//! ## Identity in handlers
//!
//! Handlers extract [`Authenticated`] (401 if absent) or [`CurrentUser`]
//! (`None` on routes that skip authentication).

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::{Authorization, HeaderMapExt};
use director_core::{AuthError, Credential, Identity, IdentityProvider};
use thiserror::Error;

use crate::error::AppError;

// ── Credential extraction ───────────────────────────────────────────────────

/// Why no credential could be read from a request.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// No `Authorization` header at all.
    #[error("missing authorization header")]
    Missing,
    /// A scheme other than `Basic`, e.g. `Bearer`.
    #[error("authorization header does not use the Basic scheme")]
    UnsupportedScheme,
    /// `Basic` with a payload that is not base64 `user:secret`.
    #[error("malformed Basic credentials")]
    Malformed,
}

/// Read an HTTP Basic credential from `headers`.
pub fn extract_credential(headers: &HeaderMap) -> Result<Credential, CredentialError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .ok_or(CredentialError::Missing)?;

    let is_basic = raw
        .to_str()
        .ok()
        .and_then(|value| value.split_whitespace().next())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("basic"));
    if !is_basic {
        return Err(CredentialError::UnsupportedScheme);
    }

    let Authorization(basic) = headers
        .typed_get::<Authorization<Basic>>()
        .ok_or(CredentialError::Malformed)?;
    Ok(Credential::new(basic.username(), basic.password()))
}

/// `WWW-Authenticate` value for `realm`. Fails if the realm cannot appear in
/// a header (control characters, quotes).
pub fn challenge_header(realm: &str) -> Result<HeaderValue, String> {
    if realm.contains('"') {
        return Err(format!("realm {realm:?} must not contain quotes"));
    }
    HeaderValue::from_str(&format!("Basic realm=\"{realm}\""))
        .map_err(|e| format!("realm {realm:?} is not a valid header value: {e}"))
}

/// Challenge carried in request extensions so extractors can answer 401
/// with the same header as the gate.
#[derive(Debug, Clone)]
struct AuthChallenge(HeaderValue);

fn unauthorized(err: AppError, challenge: HeaderValue) -> Response {
    if let AppError::Unauthorized(reason) = &err {
        tracing::warn!(%reason, "authentication failed");
    }
    let mut response = err.into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, challenge);
    response
}

// ── Gate ────────────────────────────────────────────────────────────────────

/// Authentication gate configuration, cloned into every gated route.
///
/// Holds the provider by reference and nothing mutable. `auth_required` is
/// fixed when a route is registered; see [`AuthGate::requiring`].
#[derive(Clone)]
pub struct AuthGate {
    provider: Arc<dyn IdentityProvider>,
    challenge: HeaderValue,
    timeout: Duration,
    auth_required: bool,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("scheme", &self.provider.scheme())
            .field("challenge", &self.challenge)
            .field("timeout", &self.timeout)
            .field("auth_required", &self.auth_required)
            .finish()
    }
}

impl AuthGate {
    /// Gate in front of `provider`. Requires authentication by default.
    ///
    /// `timeout` bounds each identity lookup.
    pub fn new(provider: Arc<dyn IdentityProvider>, realm: &str, timeout: Duration) -> Self {
        let challenge = challenge_header(realm).unwrap_or_else(|reason| {
            tracing::warn!(%reason, "falling back to a challenge without realm");
            HeaderValue::from_static("Basic")
        });
        Self {
            provider,
            challenge,
            timeout,
            auth_required: true,
        }
    }

    /// Copy of this gate with the given requirement.
    pub fn requiring(&self, auth_required: bool) -> Self {
        Self {
            auth_required,
            ..self.clone()
        }
    }

    /// Whether requests through this gate must authenticate.
    pub fn auth_required(&self) -> bool {
        self.auth_required
    }

    /// Scheme name of the underlying provider.
    pub fn scheme(&self) -> &'static str {
        self.provider.scheme()
    }

    /// Extract and validate the request's credential.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AppError> {
        let credential = extract_credential(headers)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        match tokio::time::timeout(self.timeout, self.provider.authenticate(&credential)).await {
            Ok(Ok(identity)) => Ok(identity),
            Ok(Err(AuthError::InvalidCredentials)) => Err(AppError::Unauthorized(format!(
                "credential rejected for user '{}'",
                credential.username()
            ))),
            Ok(Err(AuthError::Backend(msg))) => Err(AppError::Internal(msg)),
            Err(_) => Err(AppError::Unavailable(format!(
                "identity provider did not answer within {:?}",
                self.timeout
            ))),
        }
    }

    fn reject(&self, err: AppError) -> Response {
        match err {
            AppError::Unauthorized(_) => unauthorized(err, self.challenge.clone()),
            other => other.into_response(),
        }
    }
}

/// Gate middleware. Install with `axum::middleware::from_fn_with_state`.
pub async fn intercept(State(gate): State<AuthGate>, mut request: Request, next: Next) -> Response {
    request
        .extensions_mut()
        .insert(AuthChallenge(gate.challenge.clone()));

    if !gate.auth_required() {
        request.extensions_mut().remove::<Identity>();
        return next.run(request).await;
    }

    match gate.authenticate(request.headers()).await {
        Ok(identity) => {
            tracing::debug!(principal = %identity, "request authenticated");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => gate.reject(err),
    }
}

// ── Extractors ──────────────────────────────────────────────────────────────

/// Identity of an authenticated caller.
///
/// Rejects with 401 if the gate did not attach one, which happens only on
/// routes that skip authentication. The rejection carries the same
/// `WWW-Authenticate` challenge as the gate's own 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for Authenticated {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(Authenticated(identity.clone()));
        }
        let challenge = parts
            .extensions
            .get::<AuthChallenge>()
            .map(|c| c.0.clone())
            .unwrap_or_else(|| HeaderValue::from_static("Basic"));
        Err(unauthorized(
            AppError::Unauthorized("no identity in request context".into()),
            challenge,
        ))
    }
}

/// Identity of the caller if the gate established one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub Option<Identity>);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(parts.extensions.get::<Identity>().cloned()))
    }
}
