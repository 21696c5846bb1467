//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::LoginResponse;
use crate::application::services::SessionStore;
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, Credentials};

/// Handles the login workflow: one API call, then the session token.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    session: SessionStore,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>, session: SessionStore) -> Self {
        Self { auth_port, session }
    }

    /// Executes login with provided credentials.
    ///
    /// # Errors
    /// Returns error if the server rejects the credentials or is unreachable.
    pub async fn execute(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        debug!("Attempting login");

        let grant = self.auth_port.login(credentials).await.map_err(|e| {
            warn!(error = %e, "Login rejected");
            e
        })?;

        info!(user_id = %grant.user.id(), "Successfully authenticated");

        let token_persisted = self.session.establish(grant.token).await;

        Ok(LoginResponse::new(grant.user, token_persisted))
    }
}
