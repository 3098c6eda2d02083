//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::{SessionStoreError, ValueObjectError};

/// Errors from broadcasting an admin notification.
///
/// Only serialization can fail here; per-connection delivery failures are
/// handled inside the hub and never surface to the broadcaster's caller.
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("failed to serialize notification: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from visitor tracking operations.
///
/// The boundary endpoint logs these and still reports success to its own
/// caller; tracking is best-effort from the product's perspective.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("invalid session id: {0}")]
    InvalidSessionId(#[from] ValueObjectError),

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}
