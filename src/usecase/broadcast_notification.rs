//! UseCase: fan an admin notification out to every connected stream.

use std::sync::Arc;

use crate::{
    domain::{ConnectionHub, Notification},
    usecase::error::BroadcastError,
};

/// Serializes a notification once and hands it to the hub for best-effort
/// fan-out. Per-connection failures are the hub's problem, not the
/// caller's: a dead stream is removed, the rest still receive the event.
pub struct BroadcastNotificationUseCase {
    hub: Arc<dyn ConnectionHub>,
}

impl BroadcastNotificationUseCase {
    pub fn new(hub: Arc<dyn ConnectionHub>) -> Self {
        Self { hub }
    }

    /// Broadcast the notification.
    ///
    /// # Returns
    ///
    /// The number of connections the notification was delivered to.
    pub async fn execute(&self, notification: &Notification) -> Result<usize, BroadcastError> {
        let payload = serde_json::to_string(notification)?;
        let delivered = self.hub.broadcast(payload).await;
        tracing::info!(
            "broadcast '{:?}' notification to {} connections",
            notification.kind,
            delivered
        );
        Ok(delivered)
    }
}
