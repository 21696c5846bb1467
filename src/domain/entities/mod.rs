//! Domain entity definitions.

mod token;
mod user;

pub use token::AuthToken;
pub use user::{User, UserId};
