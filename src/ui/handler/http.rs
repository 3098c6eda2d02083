//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::{
    domain::Notification,
    infrastructure::dto::http::{
        ActiveVisitorsResponse, NotifyRequest, NotifyResponse, TrackRequest, TrackResponse,
        VisitorDto,
    },
    time,
    ui::state::AppState,
    usecase::{BroadcastNotificationUseCase, VisitorContext, VisitorTrackingUseCase},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /api/notifications`
///
/// Publish an admin notification to every connected stream. Requires the
/// pre-shared admin token.
pub async fn publish_notification(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<NotifyRequest>,
) -> Result<Json<NotifyResponse>, StatusCode> {
    if !super::authorized(&state.config.admin_token, &headers, None) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let notification = Notification::new(
        request.r#type,
        request.title,
        request.message,
        request.data,
        time::now(),
    );

    let usecase = BroadcastNotificationUseCase::new(state.hub.clone());
    match usecase.execute(&notification).await {
        Ok(delivered) => Ok(Json(NotifyResponse { delivered })),
        Err(e) => {
            tracing::error!("failed to broadcast notification: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// `POST /api/visitors/track`
///
/// Always reports success: tracking must never break the page that sent
/// the beacon. Failures are logged and swallowed.
pub async fn track_visitor(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<TrackRequest>,
) -> Json<TrackResponse> {
    let usecase =
        VisitorTrackingUseCase::with_threshold(state.visitors.clone(), state.config.visitor_stale_ms);
    let context = visitor_context(&headers);

    if let Err(e) = usecase
        .track(request.action, request.session_id, request.path, context)
        .await
    {
        tracing::warn!("visitor tracking failed: {}", e);
    }

    Json(TrackResponse { success: true })
}

/// `GET /api/visitors/active`
///
/// Sweeps stale sessions first (pull-based staleness detection), then
/// lists the remaining active visitors.
pub async fn active_visitors(State(state): State<Arc<AppState>>) -> Json<ActiveVisitorsResponse> {
    let usecase =
        VisitorTrackingUseCase::with_threshold(state.visitors.clone(), state.config.visitor_stale_ms);

    let visitors: Vec<VisitorDto> = match usecase.active_visitors().await {
        Ok(sessions) => sessions
            .into_iter()
            .map(|session| VisitorDto {
                id: session.id.as_str().to_string(),
                current_page: session.current_page,
                country: session.country,
                device: session.device,
                browser: session.browser,
                started_at: session.started_at.value(),
                page_view_count: session.page_view_count,
                last_activity: session.last_activity_at.value(),
            })
            .collect(),
        Err(e) => {
            tracing::warn!("failed to list active visitors: {}", e);
            Vec::new()
        }
    };

    Json(ActiveVisitorsResponse {
        count: visitors.len(),
        visitors,
        timestamp: time::now_millis(),
    })
}

/// Classify the requesting client from its headers.
fn visitor_context(headers: &HeaderMap) -> VisitorContext {
    let country = headers
        .get("cf-ipcountry")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    VisitorContext {
        country,
        device: classify_device(user_agent).to_string(),
        browser: classify_browser(user_agent).to_string(),
    }
}

fn classify_device(user_agent: &str) -> &'static str {
    if user_agent.is_empty() {
        "unknown"
    } else if user_agent.contains("iPad") || user_agent.contains("Tablet") {
        "tablet"
    } else if user_agent.contains("Mobile")
        || user_agent.contains("Android")
        || user_agent.contains("iPhone")
    {
        "mobile"
    } else {
        "desktop"
    }
}

fn classify_browser(user_agent: &str) -> &'static str {
    // order matters: Chrome UAs contain "Safari", Edge UAs contain both
    if user_agent.contains("Edg") {
        "Edge"
    } else if user_agent.contains("OPR") || user_agent.contains("Opera") {
        "Opera"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else {
        "unknown"
    }
}
