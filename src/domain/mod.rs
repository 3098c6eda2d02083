//! Domain layer for the real-time delivery subsystem.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod hub;
pub mod repository;
pub mod sink;
pub mod value_object;

pub use entity::{Notification, NotificationKind, PresenceStatus, VisitorSession};
pub use error::{SessionStoreError, SinkError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use hub::ConnectionHub;
pub use repository::VisitorSessionStore;
pub use sink::Sink;
pub use value_object::{ConnectionId, ConversationId, RoomKey, SessionId, Timestamp, UserId};
