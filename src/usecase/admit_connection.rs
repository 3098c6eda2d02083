//! UseCase: admit an admin notification stream connection.

use std::sync::Arc;

use crate::{
    domain::{ConnectionHub, ConnectionId, Sink},
    infrastructure::dto::sse::{ConnectedMessage, StreamMessageType},
    time,
};

/// Admits a pre-authorized connection into the hub and sends the one-time
/// greeting. The caller has already verified the identity; admission
/// itself cannot fail.
pub struct AdmitConnectionUseCase {
    hub: Arc<dyn ConnectionHub>,
}

impl AdmitConnectionUseCase {
    pub fn new(hub: Arc<dyn ConnectionHub>) -> Self {
        Self { hub }
    }

    /// Register the sink and greet the peer.
    ///
    /// A greeting that fails to send means the peer is already gone; the
    /// fresh entry is torn down again and the returned id refers to a
    /// connection that no longer exists, which every later operation
    /// treats as a no-op.
    pub async fn execute(&self, sink: Arc<dyn Sink>) -> ConnectionId {
        let id = self.hub.admit(sink.clone()).await;

        let greeting = ConnectedMessage {
            r#type: StreamMessageType::Connected,
            message: "Notification stream connected".to_string(),
            timestamp: time::now_millis(),
        };
        let payload = serde_json::to_string(&greeting).unwrap();

        if sink.send(&payload).is_err() {
            tracing::warn!("peer of '{}' gone before greeting, removing", id);
            self.hub.deactivate_and_remove(&id).await;
        }

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::SinkError,
        infrastructure::ConnectionRegistry,
    };
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        time::Duration,
    };

    struct RecordingSink {
        sent: std::sync::Mutex<Vec<String>>,
        failing: AtomicBool,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: std::sync::Mutex::new(Vec::new()),
                failing: AtomicBool::new(false),
            })
        }
    }

    impl Sink for RecordingSink {
        fn send(&self, payload: &str) -> Result<(), SinkError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(SinkError::Closed);
            }
            self.sent.lock().unwrap().push(payload.to_string());
            Ok(())
        }

        fn close(&self) {}
    }

    #[tokio::test]
    async fn test_admission_sends_connected_greeting() {
        // given:
        let hub = ConnectionRegistry::new(Duration::from_secs(3600));
        let usecase = AdmitConnectionUseCase::new(hub.clone());
        let sink = RecordingSink::new();

        // when:
        let id = usecase.execute(sink.clone()).await;

        // then: registered and greeted exactly once
        assert!(hub.is_active(&id).await);
        let sent = sink.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains(r#""type":"connected""#));
    }

    #[tokio::test]
    async fn test_failed_greeting_tears_the_connection_down() {
        // given: a peer that is gone before the greeting
        let hub = ConnectionRegistry::new(Duration::from_secs(3600));
        let usecase = AdmitConnectionUseCase::new(hub.clone());
        let sink = RecordingSink::new();
        sink.failing.store(true, Ordering::SeqCst);

        // when:
        let id = usecase.execute(sink).await;

        // then:
        assert!(!hub.is_active(&id).await);
        assert_eq!(hub.connection_count().await, 0);
    }
}
