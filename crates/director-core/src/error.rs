//! # Error Hierarchy
//!
//! Failures an [`IdentityProvider`](crate::IdentityProvider) may report.

use thiserror::Error;

/// Outcome of a rejected or failed credential check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credential was not accepted. Deliberately carries no detail:
    /// unknown user and wrong secret are indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The identity backend could not reach a verdict.
    #[error("identity backend error: {0}")]
    Backend(String),
}
