//! # Identity Providers
//!
//! The [`IdentityProvider`] trait is the seam between the authentication
//! gate and whatever knows who the users are. The gate holds one
//! `Arc<dyn IdentityProvider>` and calls it concurrently from every
//! in-flight request; implementations synchronize their own backing store.
//!
//! [`LocalIdentityProvider`] is the fixed-store implementation: a
//! [`UserStore`] of Basic-auth users configured at startup.
//!
//! ## Bootstrap account
//!
//! A freshly installed director has no users. While the store is empty the
//! local provider accepts the bootstrap credential (`admin`/`admin` unless
//! configured otherwise). Once any user exists the bootstrap account stops
//! working.

use async_trait::async_trait;

use crate::credential::Credential;
use crate::error::AuthError;
use crate::identity::Identity;
use crate::store::{SecretDigest, UserRecord, UserStore, PLACEHOLDER_DIGEST};

/// Name and secret of the default bootstrap account.
pub const BOOTSTRAP_USER: &str = "admin";

/// Validates a presented [`Credential`].
///
/// Implementations must be safe to call from many requests at once and must
/// return [`AuthError::InvalidCredentials`] for every rejection, without
/// revealing whether the user exists.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Check `credential`, returning the authenticated identity.
    async fn authenticate(&self, credential: &Credential) -> Result<Identity, AuthError>;

    /// Scheme name reported to clients (e.g. in `/info`).
    fn scheme(&self) -> &'static str {
        "basic"
    }
}

/// Identity provider over an in-memory [`UserStore`].
#[derive(Debug, Clone)]
pub struct LocalIdentityProvider {
    store: UserStore,
    bootstrap: Option<UserRecord>,
}

impl LocalIdentityProvider {
    /// Provider over `store`, with the default `admin`/`admin` bootstrap
    /// account active while the store is empty.
    pub fn new(store: UserStore) -> Self {
        Self {
            store,
            bootstrap: Some(UserRecord::new(
                BOOTSTRAP_USER,
                BOOTSTRAP_USER,
                vec![BOOTSTRAP_USER.to_string()],
            )),
        }
    }

    /// Provider over `store` with no bootstrap account.
    pub fn without_bootstrap(store: UserStore) -> Self {
        Self {
            store,
            bootstrap: None,
        }
    }

    /// The backing store.
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Whether requests are currently checked against the bootstrap account.
    pub fn bootstrap_active(&self) -> bool {
        self.bootstrap.is_some() && self.store.is_empty()
    }

    fn lookup(&self, username: &str) -> Option<UserRecord> {
        if self.store.is_empty() {
            return self
                .bootstrap
                .as_ref()
                .filter(|record| record.name() == username)
                .cloned();
        }
        self.store.get(username)
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn authenticate(&self, credential: &Credential) -> Result<Identity, AuthError> {
        let presented = SecretDigest::of(credential.secret());

        match self.lookup(credential.username()) {
            Some(record) if record.digest().matches(&presented) => Ok(Identity::with_roles(
                record.name(),
                record.roles().to_vec(),
            )),
            Some(_) => Err(AuthError::InvalidCredentials),
            None => {
                // Same comparison as the known-user path.
                let _ = PLACEHOLDER_DIGEST.matches(&presented);
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
