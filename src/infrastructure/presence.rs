//! Presence and room membership tracker for the bidirectional channel.
//!
//! A second registry, independent of the admin notification one: it owns
//! the WebSocket connections of buyers and sellers, their room
//! memberships (per-user inbox rooms and per-conversation rooms) and the
//! per-user online state. All mutation goes through the operations here;
//! every operation on an unknown connection, room or user is a silent
//! no-op, because presence is best-effort and self-healing on the next
//! client signal.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tokio::sync::Mutex;

use crate::{
    domain::{
        ConnectionId, ConnectionIdFactory, ConversationId, PresenceStatus, RoomKey, Sink, UserId,
    },
    infrastructure::dto::websocket::ServerEvent,
};

struct TrackedConnection {
    sink: Arc<dyn Sink>,
    /// Set by the `user_online` signal; drives offline detection when the
    /// last connection of that user disconnects.
    user_id: Option<UserId>,
}

#[derive(Default)]
struct PresenceState {
    connections: HashMap<ConnectionId, TrackedConnection>,
    rooms: HashMap<RoomKey, HashSet<ConnectionId>>,
    /// Reverse index so disconnect can clear memberships without scanning
    /// every room.
    memberships: HashMap<ConnectionId, HashSet<RoomKey>>,
    /// Online connection count per user; the 0<->1 transitions are the
    /// only ones broadcast.
    online: HashMap<UserId, usize>,
}

/// Mutex-guarded presence/rooms table.
///
/// Sends happen while the lock is held; they are non-blocking channel
/// pushes, so no slow peer can stall the table.
pub struct PresenceTracker {
    state: Mutex<PresenceState>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PresenceState::default()),
        }
    }

    /// Admit a WebSocket connection into the tracker.
    pub async fn register(&self, sink: Arc<dyn Sink>) -> ConnectionId {
        let id = ConnectionIdFactory::generate().unwrap();
        let mut state = self.state.lock().await;
        state.connections.insert(
            id.clone(),
            TrackedConnection {
                sink,
                user_id: None,
            },
        );
        tracing::info!("presence connection '{}' registered", id);
        id
    }

    /// Add the connection to a room. Idempotent; unknown connections are
    /// ignored.
    pub async fn join(&self, id: &ConnectionId, room: RoomKey) {
        let mut state = self.state.lock().await;
        if !state.connections.contains_key(id) {
            return;
        }
        state.rooms.entry(room.clone()).or_default().insert(id.clone());
        state
            .memberships
            .entry(id.clone())
            .or_default()
            .insert(room.clone());
        tracing::debug!("'{}' joined room '{}'", id, room);
    }

    /// Remove the connection from a room. Leaving a room it never joined
    /// is a no-op, not an error.
    pub async fn leave(&self, id: &ConnectionId, room: &RoomKey) {
        let mut state = self.state.lock().await;
        if let Some(members) = state.rooms.get_mut(room) {
            members.remove(id);
            if members.is_empty() {
                state.rooms.remove(room);
            }
        }
        if let Some(rooms) = state.memberships.get_mut(id) {
            rooms.remove(room);
        }
        tracing::debug!("'{}' left room '{}'", id, room);
    }

    /// Send a typing indicator to every member of the conversation room
    /// except the sender.
    pub async fn typing(
        &self,
        sender: &ConnectionId,
        conversation_id: &ConversationId,
        user_id: &UserId,
        user_name: Option<String>,
        is_typing: bool,
    ) {
        let room = RoomKey::conversation(conversation_id);
        let event = ServerEvent::UserTyping {
            conversation_id: conversation_id.as_str().to_string(),
            user_id: user_id.as_str().to_string(),
            user_name,
            is_typing,
        };
        let payload = serde_json::to_string(&event).unwrap();

        let state = self.state.lock().await;
        let Some(members) = state.rooms.get(&room) else {
            return;
        };
        for member in members {
            if member == sender {
                continue;
            }
            if let Some(connection) = state.connections.get(member)
                && connection.sink.send(&payload).is_err()
            {
                tracing::debug!("typing event dropped for '{}'", member);
            }
        }
    }

    /// Bind the connection to a user and announce `online` to every
    /// tracked connection when this is the user's first connection.
    pub async fn set_online(&self, id: &ConnectionId, user_id: UserId) {
        let mut state = self.state.lock().await;
        let Some(connection) = state.connections.get_mut(id) else {
            return;
        };
        if connection.user_id.as_ref() == Some(&user_id) {
            // duplicate announce from the same connection
            return;
        }
        let previous = connection.user_id.replace(user_id.clone());
        if let Some(previous) = previous {
            Self::release_user(&mut state, &previous);
        }

        let count = state.online.entry(user_id.clone()).or_insert(0);
        *count += 1;
        let first_connection = *count == 1;

        if first_connection {
            tracing::info!("user '{}' is online", user_id);
            Self::broadcast_status(&state, &user_id, PresenceStatus::Online);
        }
    }

    /// Tear down a connection: clear its room memberships, drop empty
    /// rooms, and announce `offline` if it was the user's last connection.
    /// Idempotent; unknown connections are ignored.
    pub async fn disconnect(&self, id: &ConnectionId) {
        let mut state = self.state.lock().await;
        let Some(connection) = state.connections.remove(id) else {
            return;
        };

        if let Some(rooms) = state.memberships.remove(id) {
            for room in rooms {
                if let Some(members) = state.rooms.get_mut(&room) {
                    members.remove(id);
                    if members.is_empty() {
                        state.rooms.remove(&room);
                    }
                }
            }
        }

        connection.sink.close();

        if let Some(user_id) = connection.user_id {
            Self::release_user(&mut state, &user_id);
        }
        tracing::info!("presence connection '{}' disconnected", id);
    }

    /// Number of members currently in a room.
    pub async fn room_member_count(&self, room: &RoomKey) -> usize {
        let state = self.state.lock().await;
        state.rooms.get(room).map_or(0, |members| members.len())
    }

    /// Whether at least one connection of the user is online.
    pub async fn is_online(&self, user_id: &UserId) -> bool {
        let state = self.state.lock().await;
        state.online.get(user_id).is_some_and(|count| *count > 0)
    }

    /// Number of tracked connections.
    pub async fn connection_count(&self) -> usize {
        let state = self.state.lock().await;
        state.connections.len()
    }

    /// Decrement the user's connection count and broadcast `offline` on
    /// the 1->0 transition.
    fn release_user(state: &mut PresenceState, user_id: &UserId) {
        let Some(count) = state.online.get_mut(user_id) else {
            return;
        };
        *count = count.saturating_sub(1);
        if *count == 0 {
            state.online.remove(user_id);
            tracing::info!("user '{}' is offline", user_id);
            Self::broadcast_status(state, user_id, PresenceStatus::Offline);
        }
    }

    /// Global fan-out of a status change: any client may display another
    /// user's presence, so this is not room-scoped.
    fn broadcast_status(state: &PresenceState, user_id: &UserId, status: PresenceStatus) {
        let event = ServerEvent::UserStatusChange {
            user_id: user_id.as_str().to_string(),
            status,
        };
        let payload = serde_json::to_string(&event).unwrap();
        for (id, connection) in &state.connections {
            if connection.sink.send(&payload).is_err() {
                tracing::debug!("status event dropped for '{}'", id);
            }
        }
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new()
    }
}
