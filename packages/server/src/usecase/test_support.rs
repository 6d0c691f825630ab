//! UseCase テスト用のヘルパー
//!
//! 実際の InMemoryChatRepository と WebSocketMessagePusher を組み合わせ、
//! 各接続が受け取った JSON を `ServerEvent` に復元して検証する。

use std::sync::Arc;

use chrono::DateTime;
use kaiwa_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessageRouter, MessageText, RoomName},
    infrastructure::{
        dto::websocket::ServerEvent, message_pusher::WebSocketMessagePusher,
        repository::InMemoryChatRepository,
    },
};

use super::ConnectParticipantUseCase;

pub(crate) struct TestHarness {
    pub repository: Arc<InMemoryChatRepository>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
    pub router: Arc<MessageRouter>,
}

impl TestHarness {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryChatRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let clock = Arc::new(FixedClock::new(
            DateTime::parse_from_rfc3339("2026-10-19T15:04:05+09:00").unwrap(),
        ));
        let router = Arc::new(MessageRouter::new(message_pusher.clone(), clock));
        Self {
            repository,
            message_pusher,
            router,
        }
    }

    /// ConnectParticipantUseCase 経由で接続し、受信チャンネルを返す
    pub async fn connect(&self, value: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        ConnectParticipantUseCase::new(self.repository.clone(), self.message_pusher.clone())
            .execute(id(value), tx)
            .await
            .unwrap();
        rx
    }
}

/// 受信済みのイベントを全て取り出す
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(raw) = rx.try_recv() {
        events.push(serde_json::from_str(&raw).unwrap());
    }
    events
}

pub(crate) fn id(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

pub(crate) fn room(value: &str) -> RoomName {
    RoomName::new(value.to_string()).unwrap()
}

pub(crate) fn text(value: &str) -> MessageText {
    MessageText::new(value.to_string()).unwrap()
}
