//! WebSocket message DTOs for the presence/rooms channel.

use serde::{Deserialize, Serialize};

use crate::domain::PresenceStatus;

/// Signal sent by a client over the bidirectional channel.
///
/// Payload field names are camelCase on the wire, matching the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientSignal {
    /// Join the caller's private per-user room
    #[serde(rename_all = "camelCase")]
    JoinUserRoom { user_id: String },

    /// Join a conversation room
    #[serde(rename_all = "camelCase")]
    JoinConversation { conversation_id: String },

    /// Leave a conversation room (leaving a non-member room is a no-op)
    #[serde(rename_all = "camelCase")]
    LeaveConversation { conversation_id: String },

    /// Started typing in a conversation
    #[serde(rename_all = "camelCase")]
    TypingStart {
        conversation_id: String,
        user_name: String,
        user_id: String,
    },

    /// Stopped typing in a conversation
    #[serde(rename_all = "camelCase")]
    TypingStop {
        conversation_id: String,
        user_id: String,
    },

    /// Announce the user as online
    #[serde(rename_all = "camelCase")]
    UserOnline { user_id: String },
}

/// Event pushed by the server over the bidirectional channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Room-scoped typing indicator, delivered to every conversation
    /// member except the sender
    #[serde(rename_all = "camelCase")]
    UserTyping {
        conversation_id: String,
        user_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_name: Option<String>,
        is_typing: bool,
    },

    /// Global presence change, delivered to every connection
    #[serde(rename_all = "camelCase")]
    UserStatusChange {
        user_id: String,
        status: PresenceStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_signal_typing_start_parses() {
        // given:
        let json = r#"{"type":"typing_start","conversationId":"c1","userName":"Alice","userId":"u1"}"#;

        // when:
        let signal: ClientSignal = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(
            signal,
            ClientSignal::TypingStart {
                conversation_id: "c1".to_string(),
                user_name: "Alice".to_string(),
                user_id: "u1".to_string(),
            }
        );
    }

    #[test]
    fn test_client_signal_join_user_room_parses() {
        // given:
        let json = r#"{"type":"join_user_room","userId":"u9"}"#;

        // when:
        let signal: ClientSignal = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(
            signal,
            ClientSignal::JoinUserRoom {
                user_id: "u9".to_string()
            }
        );
    }

    #[test]
    fn test_client_signal_unknown_type_fails() {
        // given:
        let json = r#"{"type":"shout","userId":"u1"}"#;

        // when:
        let result = serde_json::from_str::<ClientSignal>(json);

        // then:
        assert!(result.is_err());
    }

    #[test]
    fn test_server_event_user_typing_wire_shape() {
        // given:
        let event = ServerEvent::UserTyping {
            conversation_id: "c1".to_string(),
            user_id: "u1".to_string(),
            user_name: Some("Alice".to_string()),
            is_typing: true,
        };

        // when:
        let json = serde_json::to_value(&event).unwrap();

        // then:
        assert_eq!(json["type"], "user_typing");
        assert_eq!(json["conversationId"], "c1");
        assert_eq!(json["userName"], "Alice");
        assert_eq!(json["isTyping"], true);
    }

    #[test]
    fn test_server_event_status_change_wire_shape() {
        // given:
        let event = ServerEvent::UserStatusChange {
            user_id: "u1".to_string(),
            status: PresenceStatus::Online,
        };

        // when:
        let json = serde_json::to_value(&event).unwrap();

        // then:
        assert_eq!(json["type"], "user_status_change");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["status"], "online");
    }

    #[test]
    fn test_server_event_typing_stop_omits_user_name() {
        // given:
        let event = ServerEvent::UserTyping {
            conversation_id: "c1".to_string(),
            user_id: "u1".to_string(),
            user_name: None,
            is_typing: false,
        };

        // when:
        let json = serde_json::to_value(&event).unwrap();

        // then:
        assert!(json.get("userName").is_none());
        assert_eq!(json["isTyping"], false);
    }
}
