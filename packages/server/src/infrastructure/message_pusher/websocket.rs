//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ブロードキャストグループ（Room）の購読状態を管理
//! - 通知を JSON にエンコードして送信（1 接続・グループ・全接続）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ConnectionId, MessagePushError, MessagePusher, Notification, PushTarget, PusherChannel,
        RoomName,
    },
    infrastructure::dto::websocket::ServerEvent,
};

/// 送信チャンネルとグループ購読の状態
#[derive(Default)]
struct PusherState {
    /// Key: 接続 ID, Value: 送信チャンネル
    clients: HashMap<ConnectionId, PusherChannel>,
    /// Key: グループ名, Value: 購読している接続 ID
    groups: HashMap<RoomName, HashSet<ConnectionId>>,
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(client_id.clone(), tx).await;
/// pusher.push(&PushTarget::Client(client_id), &Notification::RoomExists).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    state: Mutex<PusherState>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// グループを購読している接続数
    pub async fn group_size(&self, group: &RoomName) -> usize {
        let state = self.state.lock().await;
        state.groups.get(group).map_or(0, HashSet::len)
    }

    fn encode(notification: &Notification) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerEvent::from(notification))
            .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }

    fn send_tolerant(id: &ConnectionId, sender: &PusherChannel, content: &str) {
        // ブロードキャストでは一部の送信失敗を許容
        if let Err(e) = sender.send(content.to_string()) {
            tracing::warn!("Failed to push message to client '{}': {}", id, e);
        } else {
            tracing::trace!("Pushed message to client '{}'", id);
        }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel) {
        let mut state = self.state.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
        state.clients.insert(client_id, sender);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        let mut state = self.state.lock().await;
        state.clients.remove(client_id);
        state.groups.retain(|_, members| {
            members.remove(client_id);
            !members.is_empty()
        });
        tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
    }

    async fn subscribe(&self, client_id: &ConnectionId, group: &RoomName) {
        let mut state = self.state.lock().await;
        if !state.clients.contains_key(client_id) {
            tracing::warn!(
                "Client '{}' is not registered, not subscribing to '{}'",
                client_id,
                group
            );
            return;
        }
        state
            .groups
            .entry(group.clone())
            .or_default()
            .insert(client_id.clone());
        tracing::debug!("Client '{}' subscribed to group '{}'", client_id, group);
    }

    async fn unsubscribe(&self, client_id: &ConnectionId, group: &RoomName) {
        let mut state = self.state.lock().await;
        if let Some(members) = state.groups.get_mut(group) {
            members.remove(client_id);
            if members.is_empty() {
                state.groups.remove(group);
            }
        }
        tracing::debug!("Client '{}' unsubscribed from group '{}'", client_id, group);
    }

    async fn push(
        &self,
        target: &PushTarget,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(notification)?;
        let state = self.state.lock().await;

        match target {
            PushTarget::Client(client_id) => {
                let Some(sender) = state.clients.get(client_id) else {
                    return Err(MessagePushError::ClientNotFound(
                        client_id.as_str().to_string(),
                    ));
                };
                sender
                    .send(content)
                    .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
                tracing::trace!("Pushed message to client '{}'", client_id);
            }
            PushTarget::Group(group) => {
                let Some(members) = state.groups.get(group) else {
                    tracing::debug!("Group '{}' has no subscribers, skipping", group);
                    return Ok(());
                };
                for member in members {
                    match state.clients.get(member) {
                        Some(sender) => Self::send_tolerant(member, sender, &content),
                        None => tracing::warn!(
                            "Client '{}' not found during group push, skipping",
                            member
                        ),
                    }
                }
            }
            PushTarget::All => {
                for (id, sender) in &state.clients {
                    Self::send_tolerant(id, sender, &content);
                }
            }
        }

        Ok(())
    }
}
