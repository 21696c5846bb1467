//! User-management API client.

mod client;
mod dto;

pub use client::{ApiClient, DEFAULT_API_BASE};
