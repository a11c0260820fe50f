//! # Credential
//!
//! Material presented by a client for a single request's validation.

use zeroize::Zeroizing;

/// A username and secret pair, as carried by HTTP Basic authentication.
///
/// The secret is zeroed when the credential is dropped. Custom `Debug`
/// redacts it to prevent credential leakage in logs.
#[derive(Clone)]
pub struct Credential {
    username: String,
    secret: Zeroizing<String>,
}

impl Credential {
    /// Build a credential from its parts.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: Zeroizing::new(secret.into()),
        }
    }

    /// The presented username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The presented secret.
    pub fn secret(&self) -> &str {
        self.secret.as_str()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_parts() {
        let cred = Credential::new("admin", "hunter2");
        assert_eq!(cred.username(), "admin");
        assert_eq!(cred.secret(), "hunter2");
    }

    #[test]
    fn debug_redacts_secret() {
        let cred = Credential::new("admin", "hunter2");
        let printed = format!("{cred:?}");
        assert!(printed.contains("admin"));
        assert!(printed.contains("[REDACTED]"));
        assert!(!printed.contains("hunter2"));
    }
}
