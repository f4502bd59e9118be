//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together:
//! the REST client (via assetbay-api), the file-backed session store, and
//! the core services. Command handlers receive the composed `CliContext`
//! and delegate work to core flows.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use assetbay_api::{ApiConfig, DefaultStorefrontClient};
use assetbay_core::paths::default_download_dir;
use assetbay_core::{
    DownloadFlow, DownloadGate, PlanService, SessionStore, StorefrontPort, UserProfile,
};

use crate::error::CliError;
use crate::session::FileSessionStore;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// API client configuration (base URL, token, retry policy).
    pub api: ApiConfig,
    /// Directory downloaded archives are saved into by default.
    pub download_dir: PathBuf,
}

impl CliConfig {
    /// Config from the environment, with an optional base-URL override
    /// from the command line.
    pub fn with_defaults(api_url_override: Option<String>) -> Result<Self> {
        let mut api = ApiConfig::from_env();
        if let Some(url) = api_url_override {
            api.base_url = url;
        }
        let download_dir = default_download_dir()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(Self { api, download_dir })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The storefront port (REST client in production).
    pub port: Arc<dyn StorefrontPort>,
    /// Session snapshot store.
    pub sessions: Arc<dyn SessionStore>,
    /// Profile from the cached session, when one exists.
    pub profile: Option<UserProfile>,
    /// Whether a token (env or session) is available for this invocation.
    pub authenticated: bool,
    /// Resolved configuration.
    pub config: CliConfig,
}

impl CliContext {
    /// A download flow over the composed port.
    pub fn flow(&self) -> DownloadFlow {
        DownloadFlow::new(Arc::clone(&self.port))
    }

    /// A plan service over the composed port.
    pub fn plans(&self) -> PlanService {
        PlanService::new(Arc::clone(&self.port))
    }

    /// A fresh gate for one asset's download control.
    pub fn gate(&self) -> DownloadGate {
        DownloadGate::new(self.authenticated)
    }
}

/// Bootstrap the CLI application.
///
/// Token precedence: an explicit `ASSETBAY_TOKEN` wins over the cached
/// session token. A corrupt session file is tolerated (warn and continue
/// unauthenticated) so a bad write can never lock the CLI out.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let sessions = FileSessionStore::at_default_path()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let session = match sessions.load() {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable session snapshot");
            None
        }
    };

    let mut api = config.api.clone();
    if api.token.is_none() {
        api.token = session.as_ref().map(|s| s.token.clone());
    }
    let authenticated = api.token.is_some();

    let client = DefaultStorefrontClient::new(&api).map_err(CliError::from)?;

    Ok(CliContext {
        port: Arc::new(client),
        sessions: Arc::new(sessions),
        profile: session.map(|s| s.profile),
        authenticated,
        config: CliConfig {
            api,
            download_dir: config.download_dir,
        },
    })
}
