//! userdesk - a terminal client for a CRUD user-management API.
//!
//! This crate provides login, registration and a protected user list with
//! create, edit and delete screens, organised in clean-architecture layers:
//! domain entities and ports, application use cases and routing policy,
//! HTTP and token-storage adapters, and a ratatui presentation layer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, session state and the route gate.
pub mod application;
/// Domain layer containing entities, errors, routes and port definitions.
pub mod domain;
/// Infrastructure layer containing the API client, storage and configuration.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "userdesk";
