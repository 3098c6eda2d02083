//! Admin notification stream handler (SSE).

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::sse::{Event, Sse},
};
use futures_util::Stream;

use crate::{
    domain::{ConnectionHub, ConnectionId},
    infrastructure::ChannelSink,
    ui::state::{AppState, StreamQuery},
    usecase::AdmitConnectionUseCase,
};

/// Removes the connection when the SSE response is dropped.
///
/// The drop fires on client disconnect, transport abort and graceful
/// response completion alike, so every exit path funnels into the same
/// idempotent deactivate-and-remove.
struct ConnectionGuard {
    hub: Option<Arc<dyn ConnectionHub>>,
    id: Option<ConnectionId>,
}

impl ConnectionGuard {
    fn new(hub: Arc<dyn ConnectionHub>, id: ConnectionId) -> Self {
        Self {
            hub: Some(hub),
            id: Some(id),
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if let (Some(hub), Some(id)) = (self.hub.take(), self.id.take()) {
            tokio::spawn(async move {
                hub.deactivate_and_remove(&id).await;
            });
        }
    }
}

/// `GET /api/notifications/stream`
///
/// Rejects with 401 before any state is created when the pre-shared
/// token is absent or wrong. On success the stream opens with a
/// `connected` message and then carries pings and broadcast
/// notifications, one JSON object per `data:` line.
pub async fn notification_stream(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, StatusCode> {
    if !super::authorized(&state.config.admin_token, &headers, query.token.as_deref()) {
        tracing::warn!("unauthorized notification stream attempt");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let (sink, rx) = ChannelSink::channel();
    let usecase = AdmitConnectionUseCase::new(state.hub.clone());
    let id = usecase.execute(Arc::new(sink)).await;
    tracing::info!("admin stream '{}' connected", id);

    let guard = ConnectionGuard::new(state.hub.clone(), id);
    let stream = futures_util::stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let payload = rx.recv().await?;
        Some((Ok(Event::default().data(payload)), (rx, guard)))
    });

    Ok(Sse::new(stream))
}
