//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! Presence Registry と Room Registry を 1 つの `Mutex` で保護し、
//! 両者にまたがる操作（切断時の削除と全 Room からの離脱など）を不可分に行います。
//!
//! プロセスの終了とともに状態は失われます（永続化はしない）。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatRepository, ConnectionId, Disconnection, Participant, PresenceError, PresenceRegistry,
    RenameRejection, Room, RoomDeparture, RoomError, RoomName, RoomRegistry, RoomSnapshot,
};

/// 1 つの排他制御ドメインで扱うレジストリの組
#[derive(Debug, Default)]
pub struct ChatState {
    pub presence: PresenceRegistry,
    pub rooms: RoomRegistry,
}

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    state: Mutex<ChatState>,
}

impl InMemoryChatRepository {
    /// 空のレジストリで作成
    pub fn new() -> Self {
        Self::with_state(ChatState::default())
    }

    /// 既存の状態から作成
    pub fn with_state(state: ChatState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn register_participant(
        &self,
        connection_id: ConnectionId,
    ) -> Result<Participant, PresenceError> {
        let mut state = self.state.lock().await;
        state.presence.register(connection_id)
    }

    async fn rename_participant(
        &self,
        connection_id: &ConnectionId,
        new_username: &str,
    ) -> Result<Participant, RenameRejection> {
        let mut state = self.state.lock().await;
        state.presence.rename(connection_id, new_username)
    }

    async fn find_participant(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let state = self.state.lock().await;
        state.presence.find(connection_id).cloned()
    }

    async fn participants(&self) -> Vec<Participant> {
        let state = self.state.lock().await;
        state.presence.snapshot()
    }

    async fn count_participants(&self) -> usize {
        let state = self.state.lock().await;
        state.presence.len()
    }

    async fn disconnect(&self, connection_id: &ConnectionId) -> Disconnection {
        let mut state = self.state.lock().await;
        let participant = state.presence.remove(connection_id);
        let departures = state.rooms.leave_all(connection_id);
        Disconnection {
            participant,
            departures,
        }
    }

    async fn create_room(
        &self,
        room_name: RoomName,
        creator: ConnectionId,
    ) -> Result<Room, RoomError> {
        let mut state = self.state.lock().await;
        state.rooms.create(room_name, creator)
    }

    async fn join_room(
        &self,
        room_name: &RoomName,
        connection_id: ConnectionId,
    ) -> Result<Room, RoomError> {
        let mut state = self.state.lock().await;
        state.rooms.join(room_name, connection_id)
    }

    async fn leave_room(
        &self,
        room_name: &RoomName,
        connection_id: &ConnectionId,
    ) -> Result<RoomDeparture, RoomError> {
        let mut state = self.state.lock().await;
        state.rooms.leave(room_name, connection_id)
    }

    async fn ensure_member(
        &self,
        room_name: &RoomName,
        connection_id: &ConnectionId,
    ) -> Result<(), RoomError> {
        let state = self.state.lock().await;
        match state.rooms.get(room_name) {
            None => Err(RoomError::RoomNotFound(room_name.as_str().to_string())),
            Some(room) if !room.is_member(connection_id) => {
                Err(RoomError::NotMember(room_name.as_str().to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    async fn rooms_for(&self, connection_id: &ConnectionId) -> Vec<RoomSnapshot> {
        let state = self.state.lock().await;
        state.rooms.serialize_for(connection_id)
    }

    async fn rooms(&self) -> Vec<RoomSnapshot> {
        let state = self.state.lock().await;
        state.rooms.serialize()
    }

    async fn room_users(&self, room_name: &RoomName) -> Result<Vec<ConnectionId>, RoomError> {
        let state = self.state.lock().await;
        state
            .rooms
            .users(room_name)
            .ok_or_else(|| RoomError::RoomNotFound(room_name.as_str().to_string()))
    }
}
