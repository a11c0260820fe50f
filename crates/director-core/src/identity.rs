//! # Identity
//!
//! The validated principal attached to a request after authentication.

use serde::{Deserialize, Serialize};

/// Identity of an authenticated caller.
///
/// Immutable once constructed. The gate inserts it into the request
/// extensions; it lives only as long as the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    principal: String,
    #[serde(default)]
    roles: Vec<String>,
}

impl Identity {
    /// Identity with no roles.
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            roles: Vec::new(),
        }
    }

    /// Identity carrying the given roles.
    pub fn with_roles(principal: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            principal: principal.into(),
            roles,
        }
    }

    /// The principal name.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Roles granted to the principal.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Whether the principal holds `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.principal)
    }
}
