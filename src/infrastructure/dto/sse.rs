//! Message DTOs for the one-way admin notification stream.
//!
//! Every stream message is one JSON object per SSE `data:` line. Admin
//! notifications themselves serialize straight from
//! [`crate::domain::Notification`]; the two shapes here are the stream's
//! own control messages.

use serde::{Deserialize, Serialize};

/// Stream control message type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamMessageType {
    Connected,
    Ping,
}

/// Greeting sent once, immediately after admission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectedMessage {
    pub r#type: StreamMessageType,
    pub message: String,
    pub timestamp: i64,
}

/// Periodic liveness probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingMessage {
    pub r#type: StreamMessageType,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_message_wire_shape() {
        // given:
        let ping = PingMessage {
            r#type: StreamMessageType::Ping,
            timestamp: 1234,
        };

        // when:
        let json = serde_json::to_string(&ping).unwrap();

        // then:
        assert_eq!(json, r#"{"type":"ping","timestamp":1234}"#);
    }

    #[test]
    fn test_connected_message_wire_shape() {
        // given:
        let msg = ConnectedMessage {
            r#type: StreamMessageType::Connected,
            message: "Notification stream connected".to_string(),
            timestamp: 99,
        };

        // when:
        let json = serde_json::to_value(&msg).unwrap();

        // then:
        assert_eq!(json["type"], "connected");
        assert_eq!(json["message"], "Notification stream connected");
        assert_eq!(json["timestamp"], 99);
    }
}
