//! # Route Groups
//!
//! A [`RouteGroup`] is a set of routes sharing an [`AuthPolicy`], the way a
//! controller groups endpoints. Each route may override the group default
//! when it is registered. [`ApiRouter`] mounts groups, wraps every route in
//! the gate with its own requirement, and gates the 404 fallback with the
//! router's unmatched policy.

use axum::handler::Handler;
use axum::http::Uri;
use axum::middleware::{from_fn_with_state, map_response};
use axum::routing::MethodRouter;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;
use crate::gate::{intercept, AuthGate};
use crate::middleware::{date, panic, tracing_layer};
use crate::state::AppState;

// ── Policy ──────────────────────────────────────────────────────────────────

/// Default authentication requirement for a group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    default_auth_required: bool,
}

impl AuthPolicy {
    /// Every route requires authentication unless it overrides.
    pub const fn required() -> Self {
        Self {
            default_auth_required: true,
        }
    }

    /// No route requires authentication unless it overrides.
    pub const fn always_unauthenticated() -> Self {
        Self {
            default_auth_required: false,
        }
    }

    /// Whether a route with the given override must authenticate.
    pub fn requires_auth(&self, route_override: Option<bool>) -> bool {
        route_override.unwrap_or(self.default_auth_required)
    }
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::required()
    }
}

// ── RouteGroup ──────────────────────────────────────────────────────────────

struct GroupRoute {
    path: String,
    handler: MethodRouter<AppState>,
    auth_override: Option<bool>,
}

/// Routes sharing one [`AuthPolicy`].
pub struct RouteGroup {
    name: &'static str,
    policy: AuthPolicy,
    routes: Vec<GroupRoute>,
}

impl RouteGroup {
    /// Empty group requiring authentication.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            policy: AuthPolicy::default(),
            routes: Vec::new(),
        }
    }

    /// Replace the group's default policy.
    pub fn with_policy(mut self, policy: AuthPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Route following the group policy.
    pub fn route(self, path: &str, handler: MethodRouter<AppState>) -> Self {
        self.push(path, handler, None)
    }

    /// Route that never requires authentication.
    pub fn public_route(self, path: &str, handler: MethodRouter<AppState>) -> Self {
        self.push(path, handler, Some(false))
    }

    /// Route that always requires authentication.
    pub fn protected_route(self, path: &str, handler: MethodRouter<AppState>) -> Self {
        self.push(path, handler, Some(true))
    }

    fn push(mut self, path: &str, handler: MethodRouter<AppState>, auth_override: Option<bool>) -> Self {
        self.routes.push(GroupRoute {
            path: path.to_string(),
            handler,
            auth_override,
        });
        self
    }

    /// Group name, used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Group default policy.
    pub fn policy(&self) -> AuthPolicy {
        self.policy
    }

    /// Whether `path` requires authentication, if the group registers it.
    pub fn requires_auth(&self, path: &str) -> Option<bool> {
        self.routes
            .iter()
            .find(|route| route.path == path)
            .map(|route| self.policy.requires_auth(route.auth_override))
    }

    fn into_router(self, gate: &AuthGate) -> Router<AppState> {
        let mut router = Router::new();
        for route in self.routes {
            let required = self.policy.requires_auth(route.auth_override);
            tracing::debug!(group = self.name, path = %route.path, auth_required = required, "mounting route");
            let layer = from_fn_with_state(gate.requiring(required), intercept);
            router = router.route(&route.path, route.handler.layer(layer));
        }
        router
    }
}

// ── ApiRouter ───────────────────────────────────────────────────────────────

/// Assembles route groups behind the gate.
///
/// ```text
/// Date → CatchPanic → Trace → route table ─► gate(route policy) → handler
///                                        └─► gate(unmatched policy) → 404
/// ```
pub struct ApiRouter {
    gate: AuthGate,
    unmatched: AuthPolicy,
    router: Router<AppState>,
}

impl ApiRouter {
    /// Router whose unmatched requests require authentication.
    pub fn new(gate: AuthGate) -> Self {
        Self {
            gate,
            unmatched: AuthPolicy::default(),
            router: Router::new(),
        }
    }

    /// Policy applied to requests no route matches.
    pub fn unmatched_policy(mut self, policy: AuthPolicy) -> Self {
        self.unmatched = policy;
        self
    }

    /// Merge a group's routes.
    pub fn mount(mut self, group: RouteGroup) -> Self {
        tracing::debug!(group = group.name(), "mounting route group");
        self.router = self.router.merge(group.into_router(&self.gate));
        self
    }

    /// Install the gated fallback and the outer layers.
    pub fn finish(self) -> Router<AppState> {
        let fallback_gate = self.gate.requiring(self.unmatched.requires_auth(None));
        self.router
            .fallback(not_found.layer(from_fn_with_state(fallback_gate, intercept)))
            .layer(tracing_layer::layer())
            .layer(CatchPanicLayer::custom(panic::handle_panic))
            .layer(map_response(date::stamp_date))
    }
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[test]
    fn default_policy_requires_auth() {
        let policy = AuthPolicy::default();
        assert!(policy.requires_auth(None));
        assert!(!policy.requires_auth(Some(false)));
    }

    #[test]
    fn always_unauthenticated_policy() {
        let policy = AuthPolicy::always_unauthenticated();
        assert!(!policy.requires_auth(None));
        assert!(policy.requires_auth(Some(true)));
    }

    #[test]
    fn group_route_overrides() {
        let group = RouteGroup::new("test")
            .route("/a", get(|| async { "a" }))
            .public_route("/b", get(|| async { "b" }));
        assert_eq!(group.requires_auth("/a"), Some(true));
        assert_eq!(group.requires_auth("/b"), Some(false));
        assert_eq!(group.requires_auth("/c"), None);
    }

    #[test]
    fn group_policy_applies_to_plain_routes() {
        let group = RouteGroup::new("open")
            .with_policy(AuthPolicy::always_unauthenticated())
            .route("/a", get(|| async { "a" }))
            .protected_route("/b", get(|| async { "b" }));
        assert_eq!(group.name(), "open");
        assert_eq!(group.policy(), AuthPolicy::always_unauthenticated());
        assert_eq!(group.requires_auth("/a"), Some(false));
        assert_eq!(group.requires_auth("/b"), Some(true));
    }
}
