//! InMemory visitor session store.
//!
//! Implements the VisitorSessionStore trait defined by the domain layer
//! with a HashMap behind a tokio Mutex. Acceptable for the single-process
//! deployment; a DBMS-backed implementation would slot in behind the same
//! trait with a row-to-entity conversion layer.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    SessionId, SessionStoreError, Timestamp, VisitorSession, VisitorSessionStore,
};

/// HashMap-backed session store.
///
/// The single lock serializes sweeps against heartbeats: a heartbeat
/// racing a sweep lands either before it (session kept) or after it
/// (rejected by the ended session), never half-applied.
pub struct InMemoryVisitorSessionStore {
    sessions: Mutex<HashMap<SessionId, VisitorSession>>,
}

impl InMemoryVisitorSessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Total session count, ended ones included.
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryVisitorSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisitorSessionStore for InMemoryVisitorSessionStore {
    async fn insert(&self, session: VisitorSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &SessionId) -> Result<Option<VisitorSession>, SessionStoreError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(id).cloned())
    }

    async fn heartbeat(&self, id: &SessionId, at: Timestamp) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(id)
            && !session.record_heartbeat(at)
        {
            tracing::debug!("heartbeat for ended session '{}' ignored", id);
        }
        Ok(())
    }

    async fn record_page_view(
        &self,
        id: &SessionId,
        path: String,
        at: Timestamp,
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(id) {
            session.record_page_view(path, at);
        }
        Ok(())
    }

    async fn mark_ended(&self, id: &SessionId, at: Timestamp) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(id) {
            session.end(at);
        }
        Ok(())
    }

    async fn sweep_stale(
        &self,
        threshold_ms: i64,
        now: Timestamp,
    ) -> Result<usize, SessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        let mut swept = 0;
        for session in sessions.values_mut() {
            if session.is_active()
                && session.last_activity_at.is_stale(now, threshold_ms)
                && session.end(now)
            {
                swept += 1;
            }
        }
        if swept > 0 {
            tracing::info!("swept {} stale visitor sessions", swept);
        }
        Ok(swept)
    }

    async fn active_sessions(&self) -> Result<Vec<VisitorSession>, SessionStoreError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions
            .values()
            .filter(|session| session.is_active())
            .cloned()
            .collect())
    }
}
