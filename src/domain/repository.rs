//! Visitor session store port.

use async_trait::async_trait;

use super::{
    entity::VisitorSession,
    error::SessionStoreError,
    value_object::{SessionId, Timestamp},
};

/// Persistence port for visitor sessions.
///
/// The UseCase layer depends on this trait, not on a concrete store
/// (dependency inversion, same as the rest of the repository layer). The
/// in-memory implementation backs the single-process deployment; a
/// database-backed one is the substitution point for an external store.
///
/// Unknown session ids are silent no-ops everywhere: visitor tracking is
/// best-effort and must never surface "not found" to its callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitorSessionStore: Send + Sync {
    /// Insert a freshly started session.
    async fn insert(&self, session: VisitorSession) -> Result<(), SessionStoreError>;

    /// Fetch one session by id.
    async fn get(&self, id: &SessionId) -> Result<Option<VisitorSession>, SessionStoreError>;

    /// Refresh `last_activity_at`. Never creates a session and never
    /// reactivates an ended one.
    async fn heartbeat(&self, id: &SessionId, at: Timestamp) -> Result<(), SessionStoreError>;

    /// Record a navigation: bump the page view count, update the current
    /// page and refresh activity.
    async fn record_page_view(
        &self,
        id: &SessionId,
        path: String,
        at: Timestamp,
    ) -> Result<(), SessionStoreError>;

    /// Set `ended_at` once. Later calls leave the first end time in place.
    async fn mark_ended(&self, id: &SessionId, at: Timestamp) -> Result<(), SessionStoreError>;

    /// Batch-end every active session whose last activity is older than
    /// `threshold_ms` relative to `now`. Idempotent; safe to run
    /// concurrently with heartbeats.
    ///
    /// Returns how many sessions were reclassified.
    async fn sweep_stale(
        &self,
        threshold_ms: i64,
        now: Timestamp,
    ) -> Result<usize, SessionStoreError>;

    /// All sessions with `ended_at` still unset.
    async fn active_sessions(&self) -> Result<Vec<VisitorSession>, SessionStoreError>;
}
