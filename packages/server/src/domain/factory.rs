//! Factories
//!
//! 接続 ID の発行と、接続直後の参加者の身元の割り当て。

use uuid::Uuid;

use super::{
    entity::Participant,
    error::ValueObjectError,
    value_object::{ConnectionId, Username},
};

/// 既定の表示名に使う接続 ID の先頭文字数
pub const DEFAULT_USERNAME_CHARS: usize = 8;

/// ConnectionId を発行するファクトリ
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 を（ハイフンなしで）使った新しい ConnectionId を発行
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        ConnectionId::new(Uuid::new_v4().simple().to_string())
    }
}

/// 接続 ID から既定の表示名を導出する
///
/// 接続 ID の先頭を切り出すため、表示名のバリデーションを必ず通過する。
pub fn default_username(connection_id: &ConnectionId) -> Username {
    Username::from_connection_prefix(connection_id, DEFAULT_USERNAME_CHARS)
}

/// 接続直後の参加者を作成する（失敗しない）
pub fn assign_identity(connection_id: ConnectionId) -> Participant {
    let username = default_username(&connection_id);
    Participant::new(connection_id, username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_connection_id_is_simple_uuid() {
        // テスト項目: 発行される ConnectionId はハイフンなしの 32 文字
        // given (前提条件):

        // when (操作):
        let id = ConnectionIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_connection_id_is_unique() {
        // テスト項目: 連続して発行した ConnectionId は重複しない
        // given (前提条件):

        // when (操作):
        let id1 = ConnectionIdFactory::generate().unwrap();
        let id2 = ConnectionIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_assign_identity_uses_id_prefix() {
        // テスト項目: 既定の表示名は接続 ID の先頭 8 文字
        // given (前提条件):
        let id = ConnectionId::new("0123456789abcdef".to_string()).unwrap();

        // when (操作):
        let participant = assign_identity(id.clone());

        // then (期待する結果):
        assert_eq!(participant.id, id);
        assert_eq!(participant.username.as_str(), "01234567");
    }

    #[test]
    fn test_assign_identity_with_short_id() {
        // テスト項目: 8 文字未満の接続 ID はそのまま表示名になる
        // given (前提条件):
        let id = ConnectionId::new("abc".to_string()).unwrap();

        // when (操作):
        let participant = assign_identity(id);

        // then (期待する結果):
        assert_eq!(participant.username.as_str(), "abc");
    }

    #[test]
    fn test_default_username_skips_whitespace() {
        // テスト項目: 接続 ID 中の空白は既定の表示名に含まれない
        // given (前提条件):
        let id = ConnectionId::new(" a b c".to_string()).unwrap();

        // when (操作):
        let username = default_username(&id);

        // then (期待する結果):
        assert_eq!(username.as_str(), "abc");
    }

    #[test]
    fn test_assign_identity_is_deterministic() {
        // テスト項目: 同じ接続 ID からは同じ表示名が導出される
        // given (前提条件):
        let id = ConnectionId::new("deadbeefcafe".to_string()).unwrap();

        // when (操作):
        let first = default_username(&id);
        let second = default_username(&id);

        // then (期待する結果):
        assert_eq!(first, second);
    }
}
