//! User-management API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{Envelope, ErrorEnvelope, LoginBody, LoginData, UserBody, UserResponse};
use crate::domain::entities::{AuthToken, User, UserId};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, Credentials, LoginGrant, Registration, UserDraft, UserPort};

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:3001";
const USER_AGENT: &str = concat!("userdesk/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the `/api` endpoints. Unwraps `{ data }` envelopes and
/// turns non-2xx responses into [`ApiError::Rejected`]. No retries.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_API_BASE, DEFAULT_TIMEOUT)
    }

    /// Creates client with custom base URL and request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Returns base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn transport_error(e: &reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::network("request timed out")
        } else if e.is_connect() {
            ApiError::network("failed to connect to the API")
        } else {
            ApiError::network(e.to_string())
        }
    }

    async fn rejection(status: StatusCode, response: Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();

        let envelope = serde_json::from_str::<ErrorEnvelope>(&body).unwrap_or_else(|e| {
            debug!(error = %e, "Error response body is not an API envelope");
            ErrorEnvelope::default()
        });

        let message = envelope.summary().unwrap_or_else(|| {
            status.canonical_reason().map_or_else(
                || format!("HTTP {}", status.as_u16()),
                str::to_string,
            )
        });
        let fields = envelope.field_errors();

        debug!(
            status = status.as_u16(),
            message = %message,
            field_count = fields.len(),
            "Request rejected"
        );

        ApiError::rejected(status.as_u16(), message, fields)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach the API");
            Self::transport_error(&e)
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::rejection(status, response).await)
        }
    }

    async fn data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.execute(request).await?;

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse response envelope");
            ApiError::decode(e.to_string())
        })?;

        debug!(message = %envelope.message, "Request succeeded");

        envelope
            .data
            .ok_or_else(|| ApiError::decode("response envelope has no data"))
    }
}

#[async_trait]
impl AuthPort for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        let body = LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        };

        let data: LoginData = self
            .data(self.client.post(self.url("/api/login")).json(&body))
            .await?;

        let token = AuthToken::new(&data.token)
            .ok_or_else(|| ApiError::decode("login response carries an empty token"))?;

        Ok(LoginGrant {
            user: data.user.into(),
            token,
        })
    }

    async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let body = UserBody {
            name: &registration.name,
            email: &registration.email,
            password: Some(&registration.password),
        };

        let user: UserResponse = self
            .data(self.client.post(self.url("/api/register")).json(&body))
            .await?;

        Ok(user.into())
    }
}

#[async_trait]
impl UserPort for ApiClient {
    async fn list_users(&self, token: &AuthToken) -> Result<Vec<User>, ApiError> {
        let users: Vec<UserResponse> = self
            .data(
                self.client
                    .get(self.url("/api/users"))
                    .bearer_auth(token.as_str()),
            )
            .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, token: &AuthToken, id: UserId) -> Result<User, ApiError> {
        let user: UserResponse = self
            .data(
                self.client
                    .get(self.url(&format!("/api/users/{id}")))
                    .bearer_auth(token.as_str()),
            )
            .await?;

        Ok(user.into())
    }

    async fn create_user(&self, token: &AuthToken, draft: &UserDraft) -> Result<User, ApiError> {
        let body = UserBody {
            name: &draft.name,
            email: &draft.email,
            password: Some(draft.password.as_deref().unwrap_or_default()),
        };

        let user: UserResponse = self
            .data(
                self.client
                    .post(self.url("/api/users"))
                    .bearer_auth(token.as_str())
                    .json(&body),
            )
            .await?;

        Ok(user.into())
    }

    async fn update_user(
        &self,
        token: &AuthToken,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<User, ApiError> {
        let body = UserBody {
            name: &draft.name,
            email: &draft.email,
            password: draft.password.as_deref(),
        };

        let user: UserResponse = self
            .data(
                self.client
                    .put(self.url(&format!("/api/users/{id}")))
                    .bearer_auth(token.as_str())
                    .json(&body),
            )
            .await?;

        Ok(user.into())
    }

    async fn delete_user(&self, token: &AuthToken, id: UserId) -> Result<(), ApiError> {
        self.execute(
            self.client
                .delete(self.url(&format!("/api/users/{id}")))
                .bearer_auth(token.as_str()),
        )
        .await?;

        Ok(())
    }
}
