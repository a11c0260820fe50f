//! # director-api — Control-Plane API with an Authentication Gate
//!
//! Every route of the director, and every request that matches no route,
//! passes through [`gate::intercept`] before anything else sees it.
//!
//! ## API Surface
//!
//! | Route                 | Module               | Authentication |
//! |-----------------------|----------------------|----------------|
//! | `/info`               | [`routes::info`]     | not required   |
//! | `/health/*`           | [`routes::health`]   | not required   |
//! | `/users/me`           | [`routes::users`]    | required       |
//! | anything else (404)   | fallback             | required       |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! Date → CatchPanic → TraceLayer → AuthGate → Handler
//! ```
//!
//! ## Outcomes
//!
//! | Condition                                   | Status |
//! |---------------------------------------------|--------|
//! | auth required, no/invalid credential        | 401    |
//! | auth required, valid credential, route      | 200    |
//! | auth required, valid credential, no route   | 404    |
//! | auth not required, route                    | 200    |
//! | auth not required, no route                 | 404    |

pub mod config;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use director_core::IdentityProvider;

pub use config::DirectorConfig;
pub use error::AppError;
pub use gate::{AuthGate, Authenticated, CurrentUser};
pub use router::{ApiRouter, AuthPolicy, RouteGroup};
pub use state::AppState;

/// Assemble the director router with the local identity provider described
/// by `config`.
pub fn app(config: DirectorConfig) -> Router {
    let provider = Arc::new(config.auth.build_provider());
    app_with_provider(config, provider)
}

/// Assemble the director router in front of an arbitrary identity provider.
pub fn app_with_provider(config: DirectorConfig, provider: Arc<dyn IdentityProvider>) -> Router {
    let gate = AuthGate::new(provider, &config.auth.realm, config.auth.timeout());
    let state = AppState::new(config, gate.scheme());

    ApiRouter::new(gate)
        .mount(routes::info::group())
        .mount(routes::health::group())
        .mount(routes::users::group())
        .finish()
        .with_state(state)
}
