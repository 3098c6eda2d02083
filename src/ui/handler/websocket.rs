//! Presence/rooms WebSocket handler.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};

use crate::{
    domain::{ConnectionId, ConversationId, RoomKey, UserId},
    infrastructure::{ChannelSink, PresenceTracker, dto::websocket::ClientSignal},
    ui::state::AppState,
};

pub async fn presence_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Register a sink for this connection; the tracker pushes events into
    // it and the send task drains them onto the socket.
    let (sink, mut rx) = ChannelSink::channel();
    let connection_id = state.presence.register(Arc::new(sink)).await;

    let presence = state.presence.clone();
    let recv_id = connection_id.clone();

    // Receive signals from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let signal = match serde_json::from_str::<ClientSignal>(&text) {
                        Ok(signal) => signal,
                        Err(e) => {
                            tracing::warn!("ignoring unparseable presence signal: {}", e);
                            continue;
                        }
                    };
                    apply_signal(&presence, &recv_id, signal).await;
                }
                Message::Close(_) => {
                    tracing::info!("presence connection '{}' requested close", recv_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Forward tracker events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Transport-level disconnect: implicit offline plus cleanup,
    // idempotent no matter which path got here first
    state.presence.disconnect(&connection_id).await;
}

/// Map one client signal onto the tracker.
///
/// Malformed identifiers are logged and dropped; presence is best-effort
/// and nothing here surfaces an error to the peer.
async fn apply_signal(presence: &PresenceTracker, id: &ConnectionId, signal: ClientSignal) {
    match signal {
        ClientSignal::JoinUserRoom { user_id } => {
            let Ok(user_id) = UserId::new(user_id) else {
                tracing::warn!("join_user_room with invalid user id");
                return;
            };
            presence.join(id, RoomKey::user(&user_id)).await;
        }
        ClientSignal::JoinConversation { conversation_id } => {
            let Ok(conversation_id) = ConversationId::new(conversation_id) else {
                tracing::warn!("join_conversation with invalid conversation id");
                return;
            };
            presence.join(id, RoomKey::conversation(&conversation_id)).await;
        }
        ClientSignal::LeaveConversation { conversation_id } => {
            let Ok(conversation_id) = ConversationId::new(conversation_id) else {
                tracing::warn!("leave_conversation with invalid conversation id");
                return;
            };
            presence.leave(id, &RoomKey::conversation(&conversation_id)).await;
        }
        ClientSignal::TypingStart {
            conversation_id,
            user_name,
            user_id,
        } => {
            let (Ok(conversation_id), Ok(user_id)) = (
                ConversationId::new(conversation_id),
                UserId::new(user_id),
            ) else {
                tracing::warn!("typing_start with invalid identifiers");
                return;
            };
            presence
                .typing(id, &conversation_id, &user_id, Some(user_name), true)
                .await;
        }
        ClientSignal::TypingStop {
            conversation_id,
            user_id,
        } => {
            let (Ok(conversation_id), Ok(user_id)) = (
                ConversationId::new(conversation_id),
                UserId::new(user_id),
            ) else {
                tracing::warn!("typing_stop with invalid identifiers");
                return;
            };
            presence
                .typing(id, &conversation_id, &user_id, None, false)
                .await;
        }
        ClientSignal::UserOnline { user_id } => {
            let Ok(user_id) = UserId::new(user_id) else {
                tracing::warn!("user_online with invalid user id");
                return;
            };
            presence.set_online(id, user_id).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_signal_routes_typing_to_room_members() {
        // given: two connections in the same conversation room
        let presence = PresenceTracker::new();
        let (alice_sink, _alice_rx) = ChannelSink::channel();
        let (bob_sink, mut bob_rx) = ChannelSink::channel();
        let alice = presence.register(Arc::new(alice_sink)).await;
        let bob = presence.register(Arc::new(bob_sink)).await;
        for id in [&alice, &bob] {
            apply_signal(
                &presence,
                id,
                ClientSignal::JoinConversation {
                    conversation_id: "c1".to_string(),
                },
            )
            .await;
        }

        // when: alice starts typing
        apply_signal(
            &presence,
            &alice,
            ClientSignal::TypingStart {
                conversation_id: "c1".to_string(),
                user_name: "Alice".to_string(),
                user_id: "u1".to_string(),
            },
        )
        .await;

        // then: bob receives the scoped event
        let event = bob_rx.recv().await.unwrap();
        assert!(event.contains("user_typing"));
        assert!(event.contains(r#""isTyping":true"#));
    }

    #[tokio::test]
    async fn test_apply_signal_with_invalid_id_is_dropped() {
        // given:
        let presence = PresenceTracker::new();
        let (sink, _rx) = ChannelSink::channel();
        let id = presence.register(Arc::new(sink)).await;

        // when: an empty user id arrives
        apply_signal(
            &presence,
            &id,
            ClientSignal::UserOnline {
                user_id: "".to_string(),
            },
        )
        .await;

        // then: nothing was announced
        assert_eq!(presence.connection_count().await, 1);
        assert!(
            !presence
                .is_online(&UserId::new("anything".to_string()).unwrap())
                .await
        );
    }
}
