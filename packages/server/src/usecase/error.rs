//! UseCase 層のエラー

use thiserror::Error;

use crate::domain::{MessagePushError, PresenceError, RoomError};

/// 参加者接続の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Presence(#[from] PresenceError),
}

/// 参加者切断の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("connection '{0}' was not registered")]
    UnknownConnection(String),
}

/// Room 操作（作成・参加・離脱）の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomActionError {
    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),

    #[error(transparent)]
    Room(#[from] RoomError),
}

/// メッセージ送信の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("sender '{0}' is not registered")]
    UnknownSender(String),

    #[error(transparent)]
    Room(#[from] RoomError),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}
