//! Session resolution at startup.

use tracing::{debug, info};

use crate::application::dto::TokenSource;
use crate::application::services::SessionStore;
use crate::domain::entities::AuthToken;

/// Restores the session flag from available token sources.
///
/// The token is not checked against the server; a stale token only shows up
/// when a protected call is rejected.
pub struct ResolveSessionUseCase {
    session: SessionStore,
}

impl ResolveSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Resolves token from storage or CLI/Env and adopts it.
    ///
    /// Priority:
    /// 1. Token storage
    /// 2. CLI/Env (passed as argument)
    ///
    /// Storage failures are treated as "no stored token".
    pub async fn execute(&self, cli_token: Option<String>) -> Option<TokenSource> {
        debug!("Checking token storage for a session");
        match self.session.stored_token().await {
            Ok(Some(token)) => {
                info!("Using token from token storage");
                self.session.adopt(token);
                return Some(TokenSource::Storage);
            }
            Ok(None) => {
                debug!("No token found in token storage");
            }
            Err(e) => {
                debug!(error = %e, "Failed to read token storage");
            }
        }

        if let Some(token) = cli_token.as_deref().and_then(AuthToken::new) {
            info!("Using token from command line / environment");
            self.session.adopt(token);
            return Some(TokenSource::CommandLine);
        }

        debug!("No token found in any source");
        None
    }
}
