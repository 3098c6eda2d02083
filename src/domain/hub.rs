//! Connection hub port.

use std::sync::Arc;

use async_trait::async_trait;

use super::{sink::Sink, value_object::ConnectionId};

/// Process-wide table of admitted push connections.
///
/// Owns every connection's lifecycle: admission, keep-alive, fan-out and
/// teardown. No other component mutates connection state directly. The
/// single-process in-memory registry implements this today; a distributed
/// pub/sub-backed hub could be substituted without changing callers, which
/// is why fan-out is exposed as an opaque `broadcast` rather than a table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionHub: Send + Sync {
    /// Admit a new connection: allocate an id, register the sink as active
    /// and start its liveness monitor.
    async fn admit(&self, sink: Arc<dyn Sink>) -> ConnectionId;

    /// Whether the id refers to a registered, active connection.
    /// Absent and inactive both mean "not deliverable".
    async fn is_active(&self, id: &ConnectionId) -> bool;

    /// Refresh the connection's last-activity timestamp.
    /// Unknown ids are silent no-ops.
    async fn touch(&self, id: &ConnectionId);

    /// Fan one serialized payload out to every active connection,
    /// best-effort. Connections whose sink fails are deactivated and
    /// removed; a failure never aborts delivery to the others.
    ///
    /// Returns the number of successful deliveries.
    async fn broadcast(&self, payload: String) -> usize;

    /// Deactivate the connection, cancel its liveness monitor, close its
    /// sink and drop it from the table. Idempotent: the first caller wins,
    /// later callers (failed send, abort signal, explicit disconnect) are
    /// no-ops.
    async fn deactivate_and_remove(&self, id: &ConnectionId);

    /// Number of currently registered connections.
    async fn connection_count(&self) -> usize;
}
