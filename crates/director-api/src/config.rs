//! # Director Configuration
//!
//! Explicit configuration object handed to the server and gate constructors
//! by the process entry point. Read from a YAML file, then overridden by
//! environment variables.
//!
//! ```yaml
//! name: director
//! port: 25555
//! auth:
//!   realm: Director
//!   timeout_ms: 5000
//!   bootstrap_admin: true
//!   users:
//!     - name: admin
//!       password: admin
//!       roles: [admin]
//! ```
//!
//! Every field is optional; a missing file yields [`DirectorConfig::default`].

use std::path::Path;
use std::time::Duration;

use director_core::{LocalIdentityProvider, UserRecord, UserStore};
use serde::Deserialize;
use thiserror::Error;

/// Errors loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The values parse but are unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectorConfig {
    /// Director name reported by `/info`.
    pub name: String,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Authentication settings.
    pub auth: AuthSettings,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            name: "director".to_string(),
            port: 25555,
            auth: AuthSettings::default(),
        }
    }
}

/// Authentication gate and local identity provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthSettings {
    /// Realm sent in `WWW-Authenticate` challenges.
    pub realm: String,
    /// Upper bound on a single identity lookup, in milliseconds.
    pub timeout_ms: u64,
    /// Accept `admin`/`admin` while no users are configured.
    pub bootstrap_admin: bool,
    /// Local users.
    pub users: Vec<UserEntry>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            realm: "Director".to_string(),
            timeout_ms: 5_000,
            bootstrap_admin: true,
            users: Vec::new(),
        }
    }
}

impl AuthSettings {
    /// Identity lookup timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build the local identity provider for these users.
    pub fn build_provider(&self) -> LocalIdentityProvider {
        let store: UserStore = self
            .users
            .iter()
            .map(|user| UserRecord::new(user.name.clone(), &user.password, user.roles.clone()))
            .collect();

        if self.bootstrap_admin {
            if store.is_empty() {
                tracing::warn!("no users configured; bootstrap account admin/admin is active");
            }
            LocalIdentityProvider::new(store)
        } else {
            LocalIdentityProvider::without_bootstrap(store)
        }
    }
}

/// One configured user.
///
/// Custom `Debug` redacts the password to prevent credential leakage in logs.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserEntry {
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl std::fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserEntry")
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .field("roles", &self.roles)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl DirectorConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_yaml(&text, &origin),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %origin, "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: origin,
                source,
            }),
        }
    }

    /// Apply `PORT` from the environment, if set.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(std::env::var("PORT").ok().as_deref())
    }

    fn with_overrides(mut self, port: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(port) = port {
            self.port = port
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("PORT={port}: {e}")))?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.timeout_ms == 0 {
            return Err(ConfigError::Invalid("auth.timeout_ms must be positive".into()));
        }
        if let Err(reason) = crate::gate::challenge_header(&self.auth.realm) {
            return Err(ConfigError::Invalid(format!("auth.realm: {reason}")));
        }
        let mut seen = std::collections::HashSet::new();
        for user in &self.auth.users {
            if user.name.is_empty() || user.name.contains(':') {
                return Err(ConfigError::Invalid(format!(
                    "user name '{}' must be non-empty and contain no ':'",
                    user.name
                )));
            }
            if !seen.insert(user.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate user '{}'", user.name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use director_core::{Credential, IdentityProvider};
    use std::io::Write;

    const SAMPLE: &str = r#"
name: test-director
port: 8080
auth:
  realm: Test
  timeout_ms: 250
  users:
    - name: alice
      password: s3cret
      roles: [admin]
    - name: bob
      password: hunter2
"#;

    #[test]
    fn parses_full_document() {
        let config = DirectorConfig::from_yaml(SAMPLE, "inline").unwrap();
        assert_eq!(config.name, "test-director");
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.realm, "Test");
        assert_eq!(config.auth.timeout(), Duration::from_millis(250));
        assert!(config.auth.bootstrap_admin);
        assert_eq!(config.auth.users.len(), 2);
        assert!(config.auth.users[1].roles.is_empty());
    }

    #[test]
    fn empty_document_is_default() {
        let config = DirectorConfig::from_yaml("{}", "inline").unwrap();
        assert_eq!(config.port, 25555);
        assert_eq!(config.auth.timeout_ms, 5_000);
        assert!(config.auth.users.is_empty());
    }

    #[test]
    fn unknown_field_rejected() {
        let err = DirectorConfig::from_yaml("blobstore: {}", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn duplicate_user_rejected() {
        let yaml = "auth:\n  users:\n    - {name: a, password: x}\n    - {name: a, password: y}\n";
        let err = DirectorConfig::from_yaml(yaml, "inline").unwrap_err();
        assert!(err.to_string().contains("duplicate user"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = DirectorConfig::from_yaml("auth:\n  timeout_ms: 0\n", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn realm_must_fit_in_a_header() {
        let err = DirectorConfig::from_yaml("auth:\n  realm: \"bad\\x01realm\"\n", "inline")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let mut config = DirectorConfig::default();
        config.auth.realm = "say \"hi\"".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.auth.realm = "Director Staging".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn debug_redacts_passwords() {
        let config = DirectorConfig::from_yaml(SAMPLE, "inline").unwrap();
        let printed = format!("{config:?}");
        assert!(printed.contains("alice"));
        assert!(!printed.contains("s3cret"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = DirectorConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "test-director");
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DirectorConfig::load(&dir.path().join("absent.yml")).unwrap();
        assert_eq!(config.port, 25555);
    }

    #[test]
    fn port_override() {
        let config = DirectorConfig::default().with_overrides(Some("9000")).unwrap();
        assert_eq!(config.port, 9000);
        assert!(DirectorConfig::default().with_overrides(Some("nope")).is_err());
        assert_eq!(
            DirectorConfig::default().with_overrides(None).unwrap().port,
            25555
        );
    }

    #[tokio::test]
    async fn provider_built_from_users() {
        let config = DirectorConfig::from_yaml(SAMPLE, "inline").unwrap();
        let provider = config.auth.build_provider();
        assert!(!provider.bootstrap_active());

        let identity = provider
            .authenticate(&Credential::new("alice", "s3cret"))
            .await
            .unwrap();
        assert!(identity.has_role("admin"));
        assert!(provider
            .authenticate(&Credential::new("admin", "admin"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn provider_without_users_uses_bootstrap_unless_disabled() {
        let open = DirectorConfig::default().auth.build_provider();
        assert!(open.bootstrap_active());

        let closed = DirectorConfig::from_yaml("auth:\n  bootstrap_admin: false\n", "inline")
            .unwrap()
            .auth
            .build_provider();
        assert!(!closed.bootstrap_active());
    }
}
