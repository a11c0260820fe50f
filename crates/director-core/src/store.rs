//! # User Store
//!
//! Thread-safe, cloneable in-memory user table backing
//! [`LocalIdentityProvider`](crate::LocalIdentityProvider).
//!
//! Secrets are never stored in the clear: each record keeps the SHA-256
//! digest of its secret. Digests have a fixed length, so comparing a
//! presented secret against a stored one takes the same time whatever the
//! secret's length.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

// -- Secret digest ------------------------------------------------------------

/// SHA-256 digest of a secret.
///
/// Compare with [`SecretDigest::matches`]; there is no `PartialEq`.
#[derive(Clone, Copy)]
pub struct SecretDigest([u8; 32]);

/// Compared against when no record exists for the presented user.
pub(crate) const PLACEHOLDER_DIGEST: SecretDigest = SecretDigest([0u8; 32]);

impl SecretDigest {
    /// Digest `secret`.
    pub fn of(secret: &str) -> Self {
        Self(Sha256::digest(secret.as_bytes()).into())
    }

    /// Constant-time comparison against another digest.
    pub fn matches(&self, other: &SecretDigest) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl std::fmt::Debug for SecretDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretDigest([REDACTED])")
    }
}

// -- Records ------------------------------------------------------------------

/// One configured user.
#[derive(Debug, Clone)]
pub struct UserRecord {
    name: String,
    digest: SecretDigest,
    roles: Vec<String>,
}

impl UserRecord {
    /// Build a record from a clear-text secret. Only the digest is kept.
    pub fn new(name: impl Into<String>, secret: &str, roles: Vec<String>) -> Self {
        Self {
            name: name.into(),
            digest: SecretDigest::of(secret),
            roles,
        }
    }

    /// The user name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Digest of the user's secret.
    pub fn digest(&self) -> &SecretDigest {
        &self.digest
    }

    /// Roles granted to the user.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

// -- Store --------------------------------------------------------------------

/// User table keyed by name.
///
/// The `RwLock` is `parking_lot`, not `tokio::sync`: it is never held across
/// an `.await`, and a panicking writer does not poison it.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the previous one with the same name.
    pub fn insert(&self, record: UserRecord) -> Option<UserRecord> {
        self.users.write().insert(record.name.clone(), record)
    }

    /// Remove a user by name.
    pub fn remove(&self, name: &str) -> Option<UserRecord> {
        self.users.write().remove(name)
    }

    /// Look up a user by name.
    pub fn get(&self, name: &str) -> Option<UserRecord> {
        self.users.read().get(name).cloned()
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<UserRecord> for UserStore {
    fn from_iter<I: IntoIterator<Item = UserRecord>>(iter: I) -> Self {
        let store = Self::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}
