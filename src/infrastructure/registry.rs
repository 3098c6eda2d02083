//! In-memory connection registry for the admin notification stream.
//!
//! One process-wide table maps connection ids to their sink, liveness
//! state and keep-alive task. All mutation goes through the
//! [`ConnectionHub`] operations; the raw table is never exposed.

use std::{
    collections::HashMap,
    sync::{Arc, Weak},
    time::Duration,
};

use async_trait::async_trait;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    domain::{ConnectionHub, ConnectionId, ConnectionIdFactory, Sink, Timestamp},
    infrastructure::dto::sse::{PingMessage, StreamMessageType},
    time,
};

/// One registered connection.
struct ConnectionEntry {
    sink: Arc<dyn Sink>,
    active: bool,
    last_activity_at: Timestamp,
    keepalive: Option<JoinHandle<()>>,
}

/// Mutex-guarded connection table plus the per-connection keep-alive
/// monitors it owns.
///
/// Constructed as `Arc<Self>` so keep-alive tasks hold only a `Weak`
/// back-reference: dropping the registry lets every monitor terminate on
/// its next tick instead of keeping the table alive forever.
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, ConnectionEntry>>,
    ping_interval: Duration,
    weak_self: Weak<ConnectionRegistry>,
}

impl ConnectionRegistry {
    /// Create a registry whose keep-alive monitors tick at `ping_interval`.
    pub fn new(ping_interval: Duration) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            connections: Mutex::new(HashMap::new()),
            ping_interval,
            weak_self: weak_self.clone(),
        })
    }

    /// Sink for `id` if the entry exists and is active.
    async fn active_sink(&self, id: &ConnectionId) -> Option<Arc<dyn Sink>> {
        let connections = self.connections.lock().await;
        connections
            .get(id)
            .filter(|entry| entry.active)
            .map(|entry| entry.sink.clone())
    }

    /// Spawn the liveness monitor for one connection.
    ///
    /// The task is self-terminating: it stops on its own when the registry
    /// or the entry is gone, and it runs the shared deactivate-and-remove
    /// path when a probe send fails. External teardown additionally aborts
    /// it through the stored handle, so there is one deterministic
    /// cancellation point either way.
    fn spawn_keepalive(&self, id: ConnectionId) -> JoinHandle<()> {
        let weak = self.weak_self.clone();
        let period = self.ping_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first interval tick completes immediately; consume it so
            // the first probe goes out one full period after admission
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(registry) = weak.upgrade() else {
                    break;
                };
                let Some(sink) = registry.active_sink(&id).await else {
                    tracing::debug!("connection '{}' gone, keep-alive stops", id);
                    break;
                };

                let ping = PingMessage {
                    r#type: StreamMessageType::Ping,
                    timestamp: time::now_millis(),
                };
                let payload = serde_json::to_string(&ping).unwrap();

                if sink.send(&payload).is_err() {
                    // a liveness probe doubles as failure detection
                    tracing::info!("keep-alive probe failed for '{}', removing", id);
                    registry.deactivate_and_remove(&id).await;
                    break;
                }
                registry.touch(&id).await;
            }
        })
    }
}

#[async_trait]
impl ConnectionHub for ConnectionRegistry {
    async fn admit(&self, sink: Arc<dyn Sink>) -> ConnectionId {
        let id = ConnectionIdFactory::generate().unwrap();

        {
            let mut connections = self.connections.lock().await;
            connections.insert(
                id.clone(),
                ConnectionEntry {
                    sink,
                    active: true,
                    last_activity_at: time::now(),
                    keepalive: None,
                },
            );
        }

        // attach the monitor after insertion; if the entry was already
        // torn down in between, the fresh task must not outlive it
        let handle = self.spawn_keepalive(id.clone());
        {
            let mut connections = self.connections.lock().await;
            match connections.get_mut(&id) {
                Some(entry) => entry.keepalive = Some(handle),
                None => handle.abort(),
            }
        }

        tracing::info!("admitted connection '{}'", id);
        id
    }

    async fn is_active(&self, id: &ConnectionId) -> bool {
        let connections = self.connections.lock().await;
        connections.get(id).is_some_and(|entry| entry.active)
    }

    async fn touch(&self, id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if let Some(entry) = connections.get_mut(id) {
            entry.last_activity_at = time::now();
        }
    }

    async fn broadcast(&self, payload: String) -> usize {
        // snapshot (id, sink) pairs so removal during the fan-out never
        // races the table, and no lock is held across sends
        let targets: Vec<(ConnectionId, Arc<dyn Sink>)> = {
            let connections = self.connections.lock().await;
            connections
                .iter()
                .filter(|(_, entry)| entry.active)
                .map(|(id, entry)| (id.clone(), entry.sink.clone()))
                .collect()
        };

        let mut delivered = 0;
        let mut failed = Vec::new();
        for (id, sink) in targets {
            match sink.send(&payload) {
                Ok(()) => delivered += 1,
                Err(_) => failed.push(id),
            }
        }

        for id in &failed {
            tracing::info!("broadcast delivery failed for '{}', removing", id);
            self.deactivate_and_remove(id).await;
        }

        delivered
    }

    async fn deactivate_and_remove(&self, id: &ConnectionId) {
        let entry = {
            let mut connections = self.connections.lock().await;
            connections.remove(id)
        };

        // idempotent: later callers find nothing to do
        let Some(mut entry) = entry else {
            return;
        };

        entry.active = false;
        if let Some(handle) = entry.keepalive.take() {
            handle.abort();
        }
        entry.sink.close();
        tracing::info!("removed connection '{}'", id);
    }

    async fn connection_count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}
