//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// ConversationId validation error
    #[error("ConversationId cannot be empty")]
    ConversationIdEmpty,

    /// ConversationId too long error
    #[error("ConversationId cannot exceed {max} characters (got {actual})")]
    ConversationIdTooLong { max: usize, actual: usize },

    /// SessionId validation error
    #[error("SessionId cannot be empty")]
    SessionIdEmpty,

    /// SessionId too long error
    #[error("SessionId cannot exceed {max} characters (got {actual})")]
    SessionIdTooLong { max: usize, actual: usize },
}

/// Errors returned by a [`crate::domain::sink::Sink`] when the peer is gone.
///
/// A sink failure is never fatal to the caller: the registry reacts by
/// deactivating and removing the connection, nothing propagates further.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The peer side of the channel has been dropped or closed.
    #[error("sink is closed, peer has gone away")]
    Closed,
}

/// Errors surfaced by a visitor session store implementation.
///
/// The in-memory store never fails; a database-backed implementation maps
/// its driver errors onto `Backend`. Unknown session ids are NOT errors
/// (heartbeats against vanished sessions are silent no-ops).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    /// Underlying persistence failure.
    #[error("session store backend error: {0}")]
    Backend(String),
}
