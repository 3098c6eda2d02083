//! Channel-backed sink implementation.

use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::domain::{Sink, SinkError};

/// Production [`Sink`] wrapping the mpsc channel that feeds one outbound
/// transport (an SSE response body or a WebSocket writer task).
///
/// The receiver half is drained by the transport; dropping it (client
/// disconnect) makes every later `send` report [`SinkError::Closed`].
/// `close` takes the sender out, which ends the receiver stream
/// deterministically on explicit teardown. The channel is unbounded and
/// preserves send order, giving FIFO per connection.
pub struct ChannelSink {
    tx: Mutex<Option<mpsc::UnboundedSender<String>>>,
}

impl ChannelSink {
    /// Create a sink and the receiver the transport will drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<mpsc::UnboundedSender<String>>> {
        // a poisoned lock only means a panicking thread held it; the
        // Option inside is still consistent
        match self.tx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Sink for ChannelSink {
    fn send(&self, payload: &str) -> Result<(), SinkError> {
        let guard = self.lock();
        match guard.as_ref() {
            Some(tx) => tx.send(payload.to_string()).map_err(|_| SinkError::Closed),
            None => Err(SinkError::Closed),
        }
    }

    fn close(&self) {
        // dropping the sender ends the receiver stream; repeat calls
        // find None and do nothing
        self.lock().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_reaches_receiver_in_order() {
        // given:
        let (sink, mut rx) = ChannelSink::channel();

        // when:
        sink.send("first").unwrap();
        sink.send("second").unwrap();

        // then: FIFO per connection
        assert_eq!(rx.try_recv().unwrap(), "first");
        assert_eq!(rx.try_recv().unwrap(), "second");
    }

    #[test]
    fn test_send_after_receiver_dropped_fails() {
        // given:
        let (sink, rx) = ChannelSink::channel();
        drop(rx);

        // when:
        let result = sink.send("lost");

        // then:
        assert_eq!(result, Err(SinkError::Closed));
    }

    #[test]
    fn test_close_ends_stream_and_is_idempotent() {
        // given:
        let (sink, mut rx) = ChannelSink::channel();

        // when: closed twice
        sink.close();
        sink.close();

        // then: the receiver sees end-of-stream and sends fail
        assert!(rx.blocking_recv().is_none());
        assert_eq!(sink.send("late"), Err(SinkError::Closed));
    }
}
