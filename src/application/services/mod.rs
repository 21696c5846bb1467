//! Session and routing services.

mod route_gate;
mod session_store;

pub use route_gate::{GateDecision, RouteGate};
pub use session_store::SessionStore;
