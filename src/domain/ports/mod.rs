mod auth_port;
mod token_storage_port;
mod user_port;

pub use auth_port::{AuthPort, Credentials, LoginGrant, Registration};
pub use token_storage_port::TokenStoragePort;
pub use user_port::{UserDraft, UserPort};
