//! Application layer with use cases, session state and navigation policy.

/// Data transfer objects.
pub mod dto;
/// Session and routing services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginResponse, TokenSource};
pub use services::{GateDecision, RouteGate, SessionStore};
pub use use_cases::{LoginUseCase, ManageUsersUseCase, RegisterUseCase, ResolveSessionUseCase};
