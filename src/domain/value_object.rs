//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Connection identifier value object.
///
/// Identifies one admitted push connection for the lifetime of the process.
/// Generated by [`crate::domain::factory::ConnectionIdFactory`]; never
/// supplied by a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a ConnectionId from a UUID.
    ///
    /// # Returns
    ///
    /// A Result containing the ConnectionId, for consistency with the
    /// domain error handling pattern (this cannot fail in practice).
    pub fn from_uuid(uuid: uuid::Uuid) -> Result<Self, ValueObjectError> {
        Ok(Self(uuid.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identifier value object.
///
/// Represents an already-authenticated marketplace user. The core trusts
/// the caller identity; it only validates the shape of the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId.
    ///
    /// # Returns
    ///
    /// A Result containing the UserId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::UserIdEmpty);
        }
        let len = id.len();
        if len > 100 {
            return Err(ValueObjectError::UserIdTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Conversation identifier value object.
///
/// Identifies one buyer-seller conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(String);

impl ConversationId {
    /// Create a new ConversationId.
    ///
    /// # Returns
    ///
    /// A Result containing the ConversationId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConversationIdEmpty);
        }
        let len = id.len();
        if len > 100 {
            return Err(ValueObjectError::ConversationIdTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ConversationId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Visitor session identifier value object.
///
/// Supplied by the browsing client (anonymous visitors have no account).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new SessionId.
    ///
    /// # Returns
    ///
    /// A Result containing the SessionId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::SessionIdEmpty);
        }
        let len = id.len();
        if len > 100 {
            return Err(ValueObjectError::SessionIdTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SessionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Logical room key value object.
///
/// A room is a named group of connections that receive scoped events.
/// Two shapes exist: a per-user private room (`user:<id>`) and a
/// per-conversation room (`conversation:<id>`). Constructed only through
/// the two factory methods so the namespace prefixes stay consistent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomKey(String);

impl RoomKey {
    /// Build the private room key for a user.
    pub fn user(user_id: &UserId) -> Self {
        Self(format!("user:{}", user_id.as_str()))
    }

    /// Build the room key for a conversation.
    pub fn conversation(conversation_id: &ConversationId) -> Self {
        Self(format!("conversation:{}", conversation_id.as_str()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether this timestamp is older than `threshold_ms` relative to `now`.
    pub fn is_stale(&self, now: Timestamp, threshold_ms: i64) -> bool {
        self.0 < now.0 - threshold_ms
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_new_success() {
        // given:
        let id = "seller-42".to_string();

        // when:
        let result = UserId::new(id);

        // then:
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "seller-42");
    }

    #[test]
    fn test_user_id_new_empty_fails() {
        // given:
        let id = "".to_string();

        // when:
        let result = UserId::new(id);

        // then:
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), ValueObjectError::UserIdEmpty);
    }

    #[test]
    fn test_user_id_new_too_long_fails() {
        // given:
        let id = "a".repeat(101);

        // when:
        let result = UserId::new(id);

        // then:
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::UserIdTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_conversation_id_new_empty_fails() {
        // when:
        let result = ConversationId::new("".to_string());

        // then:
        assert_eq!(result.unwrap_err(), ValueObjectError::ConversationIdEmpty);
    }

    #[test]
    fn test_session_id_new_success() {
        // when:
        let result = SessionId::new("visitor-abc123".to_string());

        // then:
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "visitor-abc123");
    }

    #[test]
    fn test_room_key_user_prefix() {
        // given:
        let user_id = UserId::new("alice".to_string()).unwrap();

        // when:
        let key = RoomKey::user(&user_id);

        // then:
        assert_eq!(key.as_str(), "user:alice");
    }

    #[test]
    fn test_room_key_conversation_prefix() {
        // given:
        let conversation_id = ConversationId::new("conv-7".to_string()).unwrap();

        // when:
        let key = RoomKey::conversation(&conversation_id);

        // then:
        assert_eq!(key.as_str(), "conversation:conv-7");
    }

    #[test]
    fn test_room_key_namespaces_are_disjoint() {
        // given: a user id and a conversation id with the same raw value
        let user_id = UserId::new("77".to_string()).unwrap();
        let conversation_id = ConversationId::new("77".to_string()).unwrap();

        // then: their room keys never collide
        assert_ne!(
            RoomKey::user(&user_id),
            RoomKey::conversation(&conversation_id)
        );
    }

    #[test]
    fn test_timestamp_ordering() {
        // given:
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then:
        assert!(ts1 < ts2);
        assert!(ts2 > ts1);
    }

    #[test]
    fn test_timestamp_is_stale() {
        // given: threshold of 5 minutes
        let threshold_ms = 5 * 60 * 1000;
        let now = Timestamp::new(10 * 60 * 1000);

        // then: 10 minutes old is stale, 1 minute old is not
        assert!(Timestamp::new(0).is_stale(now, threshold_ms));
        assert!(!Timestamp::new(9 * 60 * 1000).is_stale(now, threshold_ms));
    }
}
