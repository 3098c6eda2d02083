//! Infrastructure layer: concrete implementations of the domain ports and
//! the wire-level DTOs.

pub mod channel;
pub mod dto;
pub mod presence;
pub mod registry;
pub mod repository;

pub use channel::ChannelSink;
pub use presence::PresenceTracker;
pub use registry::ConnectionRegistry;
pub use repository::InMemoryVisitorSessionStore;
