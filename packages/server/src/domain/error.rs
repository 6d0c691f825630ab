//! Domain errors

use thiserror::Error;

/// 値オブジェクトの生成失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    ConnectionIdEmpty,

    #[error("username must not be empty")]
    UsernameEmpty,

    #[error("username must be at most {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("room name must not be empty")]
    RoomNameEmpty,

    #[error("room name must be at most {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    #[error("message text must not be empty")]
    MessageTextEmpty,

    #[error("message text must be at most {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },
}

/// Presence Registry の内部不整合
///
/// トランスポートが正しく使われていれば発生しない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenceError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),
}

/// 表示名変更の拒否理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenameRejection {
    #[error("username must not be empty")]
    Empty,

    #[error("username is unchanged")]
    Unchanged,

    #[error("username is too long")]
    TooLong,

    #[error("username is already taken")]
    Taken,

    #[error("connection is not registered")]
    UnknownConnection,
}

/// Room Registry の状態競合
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("room '{0}' already exists")]
    RoomExists(String),

    #[error("room '{0}' was not found")]
    RoomNotFound(String),

    #[error("already a member of room '{0}'")]
    AlreadyMember(String),

    #[error("not a member of room '{0}'")]
    NotMember(String),
}

/// メッセージ送信の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode notification: {0}")]
    EncodeFailed(String),
}
