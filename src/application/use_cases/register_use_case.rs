//! Registration use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::User;
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, Registration};

/// Creates an account. Registration does not log the new user in.
#[derive(Clone)]
pub struct RegisterUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl RegisterUseCase {
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// # Errors
    /// Returns error if the server rejects the registration.
    pub async fn execute(&self, registration: &Registration) -> Result<User, ApiError> {
        debug!(email = %registration.email, "Registering account");

        match self.auth_port.register(registration).await {
            Ok(user) => {
                info!(user_id = %user.id(), "Account registered");
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Registration rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockAuthPort;

    #[tokio::test]
    async fn test_successful_registration() {
        let use_case = RegisterUseCase::new(Arc::new(MockAuthPort::new(true)));

        let user = use_case
            .execute(&Registration::new("Rina", "rina@example.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(user.email(), "rina@example.com");
    }

    #[tokio::test]
    async fn test_rejected_registration_carries_fields() {
        let use_case = RegisterUseCase::new(Arc::new(MockAuthPort::new(false)));

        let error = use_case
            .execute(&Registration::new("R", "rina@example.com", "secret1"))
            .await
            .unwrap_err();

        assert_eq!(error.fields().first("name"), Some("Nama minimal 3 karakter"));
    }
}
