//! # Application State
//!
//! Shared state for the Axum application, passed to route handlers via the
//! `State` extractor. The authentication gate does not read it: the gate
//! carries its own provider reference.

use std::sync::Arc;

use crate::config::DirectorConfig;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<DirectorConfig>,
    /// Scheme name of the identity provider, reported by `/info`.
    pub auth_scheme: &'static str,
}

impl AppState {
    /// State over `config` for a provider using `auth_scheme`.
    pub fn new(config: DirectorConfig, auth_scheme: &'static str) -> Self {
        Self {
            config: Arc::new(config),
            auth_scheme,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DirectorConfig::default(), "basic")
    }
}
