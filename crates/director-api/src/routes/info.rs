//! # Director Info
//!
//! Routes:
//! - GET /info — director name, version and how clients should authenticate
//!
//! Clients call this before they have credentials, so the group skips
//! authentication.

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::router::{AuthPolicy, RouteGroup};
use crate::state::AppState;

/// `/info` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub user_authentication: UserAuthentication,
}

/// How clients authenticate against this director.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserAuthentication {
    #[serde(rename = "type")]
    pub kind: String,
    pub realm: String,
}

/// Info group. Never requires authentication.
pub fn group() -> RouteGroup {
    RouteGroup::new("info")
        .with_policy(AuthPolicy::always_unauthenticated())
        .route("/info", get(info))
}

async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: state.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        user_authentication: UserAuthentication {
            kind: state.auth_scheme.to_string(),
            realm: state.config.auth.realm.clone(),
        },
    })
}
