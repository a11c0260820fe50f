//! # Current User
//!
//! Routes:
//! - GET /users/me — principal and roles of the authenticated caller

use axum::routing::get;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::gate::Authenticated;
use crate::router::RouteGroup;

/// `/users/me` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: String,
    pub roles: Vec<String>,
}

/// User group. Requires authentication.
pub fn group() -> RouteGroup {
    RouteGroup::new("users").route("/users/me", get(me))
}

async fn me(Authenticated(identity): Authenticated) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        user: identity.principal().to_string(),
        roles: identity.roles().to_vec(),
    })
}
