//! Outbound push channel abstraction.

use super::error::SinkError;

/// One outbound push channel to one remote peer.
///
/// The production implementation wraps the SSE response channel; tests use
/// recording or mock sinks so fan-out can be exercised without a real
/// transport. Both operations are safe to call after the peer has gone
/// away: `send` reports `SinkError::Closed`, `close` is idempotent, and
/// neither ever panics into caller logic.
///
/// Sends through one sink preserve call order (FIFO per connection).
#[cfg_attr(test, mockall::automock)]
pub trait Sink: Send + Sync {
    /// Push one serialized event to the peer.
    fn send(&self, payload: &str) -> Result<(), SinkError>;

    /// Release the channel. Idempotent; swallows peer-side failures.
    fn close(&self);
}
