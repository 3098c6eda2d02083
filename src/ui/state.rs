//! Server state shared across handlers.

use serde::Deserialize;
use std::{sync::Arc, time::Duration};

use crate::{
    config::ServerConfig,
    domain::{ConnectionHub, VisitorSessionStore},
    infrastructure::{ConnectionRegistry, InMemoryVisitorSessionStore, PresenceTracker},
};

/// Query parameters for the admin notification stream
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// Pre-shared admin token; the Authorization header is accepted too
    pub token: Option<String>,
}

/// Shared application state.
///
/// The three stateful services each own their table exclusively; handlers
/// only reach them through the operations on the ports.
pub struct AppState {
    /// Admin notification connection hub
    pub hub: Arc<dyn ConnectionHub>,
    /// Presence and room membership tracker
    pub presence: Arc<PresenceTracker>,
    /// Visitor session store
    pub visitors: Arc<dyn VisitorSessionStore>,
    pub config: ServerConfig,
}

impl AppState {
    /// Wire up the in-memory services for a single-process deployment.
    pub fn new(config: ServerConfig) -> Self {
        let hub = ConnectionRegistry::new(Duration::from_millis(config.ping_interval_ms));
        Self {
            hub,
            presence: Arc::new(PresenceTracker::new()),
            visitors: Arc::new(InMemoryVisitorSessionStore::new()),
            config,
        }
    }
}
