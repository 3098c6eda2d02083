//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::NotificationKind;

/// Action carried by a visitor tracking request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackAction {
    Heartbeat,
    PageChange,
    Disconnect,
}

/// Visitor tracking request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub action: TrackAction,
    pub path: String,
    pub session_id: String,
}

/// Visitor tracking response body (always success; tracking must never
/// break the caller)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackResponse {
    pub success: bool,
}

/// One active visitor in the dashboard listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorDto {
    pub id: String,
    pub current_page: String,
    pub country: String,
    pub device: String,
    pub browser: String,
    pub started_at: i64,
    pub page_view_count: u64,
    pub last_activity: i64,
}

/// Active visitors listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveVisitorsResponse {
    pub count: usize,
    pub visitors: Vec<VisitorDto>,
    pub timestamp: i64,
}

/// Admin notification publish request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub r#type: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Admin notification publish response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyResponse {
    /// Number of admin streams the notification was delivered to
    pub delivered: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_request_parses_camel_case() {
        // given:
        let json = r#"{"action":"page_change","path":"/listings/7","sessionId":"v-1"}"#;

        // when:
        let req: TrackRequest = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(req.action, TrackAction::PageChange);
        assert_eq!(req.path, "/listings/7");
        assert_eq!(req.session_id, "v-1");
    }

    #[test]
    fn test_notify_request_data_defaults_to_none() {
        // given:
        let json = r#"{"type":"notice","title":"x","message":"y"}"#;

        // when:
        let req: NotifyRequest = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(req.r#type, NotificationKind::Notice);
        assert!(req.data.is_none());
    }
}
