//! UseCase: visitor session liveness tracking.

use std::sync::Arc;

use crate::{
    config::DEFAULT_VISITOR_STALE_MS,
    domain::{SessionId, VisitorSession, VisitorSessionStore},
    infrastructure::dto::http::TrackAction,
    time,
    usecase::error::TrackError,
};

/// Client attributes captured when a session starts, derived from request
/// headers at the boundary.
#[derive(Debug, Clone)]
pub struct VisitorContext {
    pub country: String,
    pub device: String,
    pub browser: String,
}

impl Default for VisitorContext {
    fn default() -> Self {
        Self {
            country: "unknown".to_string(),
            device: "unknown".to_string(),
            browser: "unknown".to_string(),
        }
    }
}

/// Drives the visitor session lifecycle against the store.
///
/// Staleness is detected on demand when the active list is queried
/// (pull-based sweep); there is no background scheduler.
pub struct VisitorTrackingUseCase {
    store: Arc<dyn VisitorSessionStore>,
    stale_threshold_ms: i64,
}

impl VisitorTrackingUseCase {
    pub fn new(store: Arc<dyn VisitorSessionStore>) -> Self {
        Self {
            store,
            stale_threshold_ms: DEFAULT_VISITOR_STALE_MS,
        }
    }

    pub fn with_threshold(store: Arc<dyn VisitorSessionStore>, stale_threshold_ms: i64) -> Self {
        Self {
            store,
            stale_threshold_ms,
        }
    }

    /// Apply one tracking action.
    ///
    /// `heartbeat` refreshes activity and never creates a session.
    /// `page_change` records a navigation, starting the session on first
    /// sight (the entry page is the first path seen). `disconnect` marks
    /// the session ended, once.
    pub async fn track(
        &self,
        action: TrackAction,
        session_id: String,
        path: String,
        context: VisitorContext,
    ) -> Result<(), TrackError> {
        let id = SessionId::new(session_id)?;
        let now = time::now();

        match action {
            TrackAction::Heartbeat => {
                self.store.heartbeat(&id, now).await?;
            }
            TrackAction::PageChange => {
                if self.store.get(&id).await?.is_some() {
                    self.store.record_page_view(&id, path, now).await?;
                } else {
                    let session = VisitorSession::new(
                        id,
                        path,
                        context.country,
                        context.device,
                        context.browser,
                        now,
                    );
                    tracing::info!("visitor session '{}' started", session.id);
                    self.store.insert(session).await?;
                }
            }
            TrackAction::Disconnect => {
                self.store.mark_ended(&id, now).await?;
            }
        }

        Ok(())
    }

    /// Sweep stale sessions, then list the remaining active ones.
    pub async fn active_visitors(&self) -> Result<Vec<VisitorSession>, TrackError> {
        self.store
            .sweep_stale(self.stale_threshold_ms, time::now())
            .await?;
        Ok(self.store.active_sessions().await?)
    }
}
