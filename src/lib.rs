//! Real-time delivery core for the Souk marketplace.
//!
//! Three independent services behind one axum server: an admin
//! notification hub streaming over SSE with per-connection keep-alive, a
//! presence/rooms tracker for buyer-seller conversations over WebSocket,
//! and heartbeat-driven visitor session liveness with pull-based
//! staleness sweeping. Everything is in-memory and single-process;
//! delivery is best-effort by design.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod time;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{router, run};
