use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::User;
use crate::domain::validation::ValidationErrors;

/// Success envelope: `{ status, message, data }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Error envelope. Every field is optional so that any JSON object decodes.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ErrorEnvelope {
    /// Reads `data` as field messages. Values that are strings count as a
    /// single message; anything else is skipped.
    pub fn field_errors(&self) -> ValidationErrors {
        let Some(Value::Object(map)) = &self.data else {
            return ValidationErrors::new();
        };

        map.iter()
            .filter(|(field, _)| field.as_str() != "message")
            .map(|(field, value)| {
                let messages: Vec<String> = match value {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                    Value::String(message) => vec![message.clone()],
                    _ => Vec::new(),
                };
                (field.clone(), messages)
            })
            .collect()
    }

    /// Top-level message, falling back to `data.message`.
    pub fn summary(&self) -> Option<String> {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .or_else(|| {
                self.data
                    .as_ref()
                    .and_then(|data| data.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
    }
}

/// User as serialized by the API.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<UserResponse> for User {
    fn from(response: UserResponse) -> Self {
        Self::new(response.id, response.name, response.email)
            .with_timestamps(response.created_at, response.updated_at)
    }
}

/// `data` of a successful login.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for register, store and update. `password` is omitted when absent so
/// that an update keeps the current password.
#[derive(Debug, Serialize)]
pub struct UserBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}
