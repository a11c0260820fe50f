#![deny(missing_docs)]

//! # director-core — Identity Types for the Director API
//!
//! This crate defines what the authentication gate consumes: the
//! [`Credential`] a client presents, the [`Identity`] a successful check
//! produces, and the [`IdentityProvider`] seam between the two. It has no web
//! dependencies; header parsing and HTTP status mapping live in
//! `director-api`.
//!
//! ## Design Principles
//!
//! 1. **The gate never owns credential storage.** It holds one
//!    `Arc<dyn IdentityProvider>` and asks it for a verdict.
//!
//! 2. **Constant-shape failures.** An unknown user and a wrong secret both
//!    produce [`AuthError::InvalidCredentials`] after the same digest
//!    comparison, so neither the error nor the timing enumerates users.
//!
//! 3. **Secrets are transient.** A [`Credential`] wipes its secret on drop
//!    and never prints it through `Debug`.

pub mod credential;
pub mod error;
pub mod identity;
pub mod provider;
pub mod store;

pub use credential::Credential;
pub use error::AuthError;
pub use identity::Identity;
pub use provider::{IdentityProvider, LocalIdentityProvider};
pub use store::{SecretDigest, UserRecord, UserStore};
