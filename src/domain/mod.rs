//! Domain layer with core entities, routing policy and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Navigable routes and their access requirements.
pub mod route;
/// Server-reported field validation messages.
pub mod validation;

pub use entities::{AuthToken, User, UserId};
pub use errors::{ApiError, StorageError};
pub use ports::{
    AuthPort, Credentials, LoginGrant, Registration, TokenStoragePort, UserDraft, UserPort,
};
pub use route::{Access, Route};
pub use validation::ValidationErrors;
