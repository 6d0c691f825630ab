//! Presence Registry
//!
//! 接続 ID → 参加者 のマッピング。登録順を保持し、名簿のスナップショットは常に同じ順序で返る。
//!
//! 登録・改名・削除が成功した場合、呼び出し側は `snapshot()` を全接続に再送する責務を持つ。

use indexmap::IndexMap;

use super::{
    entity::Participant,
    error::{PresenceError, RenameRejection, ValueObjectError},
    factory::{DEFAULT_USERNAME_CHARS, assign_identity, default_username},
    value_object::{ConnectionId, USERNAME_MAX_CHARS, Username},
};

#[derive(Debug, Default)]
pub struct PresenceRegistry {
    participants: IndexMap<ConnectionId, Participant>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続に既定の身元を割り当てて登録する
    ///
    /// 既定の表示名が使用中の場合は、接続 ID の先頭を長く取るか番号を付けて重複を避ける。
    pub fn register(&mut self, connection_id: ConnectionId) -> Result<Participant, PresenceError> {
        if self.participants.contains_key(&connection_id) {
            return Err(PresenceError::DuplicateConnection(connection_id.into_string()));
        }

        let mut participant = assign_identity(connection_id.clone());
        if self.is_username_taken(&participant.username, &connection_id) {
            participant.username = self.free_default_username(&connection_id);
        }
        self.participants.insert(connection_id, participant.clone());
        Ok(participant)
    }

    /// 表示名を変更する
    ///
    /// 以下の場合は変更せずに拒否する:
    /// - トリム後に空
    /// - 現在の表示名と同じ
    /// - 10 文字を超える
    /// - 他の接続中の参加者が使用中
    pub fn rename(
        &mut self,
        connection_id: &ConnectionId,
        new_username: &str,
    ) -> Result<Participant, RenameRejection> {
        let Some(current) = self.participants.get(connection_id) else {
            return Err(RenameRejection::UnknownConnection);
        };

        let trimmed = new_username.trim();
        if trimmed.is_empty() {
            return Err(RenameRejection::Empty);
        }
        if trimmed == current.username.as_str() {
            return Err(RenameRejection::Unchanged);
        }

        let username = Username::new(trimmed.to_string()).map_err(|e| match e {
            ValueObjectError::UsernameTooLong { .. } => RenameRejection::TooLong,
            _ => RenameRejection::Empty,
        })?;

        if self.is_username_taken(&username, connection_id) {
            return Err(RenameRejection::Taken);
        }

        match self.participants.get_mut(connection_id) {
            Some(participant) => {
                participant.username = username;
                Ok(participant.clone())
            }
            None => Err(RenameRejection::UnknownConnection),
        }
    }

    /// 参加者を削除し、削除したレコードを返す
    ///
    /// 残りの参加者の登録順は保持される。
    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        self.participants.shift_remove(connection_id)
    }

    pub fn find(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants.get(connection_id)
    }

    /// 登録順の全参加者
    pub fn snapshot(&self) -> Vec<Participant> {
        self.participants.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// 使用中でない既定の表示名を探す
    ///
    /// 接続 ID の先頭 9, 10 文字を試し、それでも重複する場合は先頭に番号を付ける。
    fn free_default_username(&self, connection_id: &ConnectionId) -> Username {
        let longer_prefixes = (DEFAULT_USERNAME_CHARS + 1..=USERNAME_MAX_CHARS)
            .map(|chars| Username::from_connection_prefix(connection_id, chars));
        let numbered = (2usize..).filter_map(|n| {
            let suffix = n.to_string();
            let prefix = Username::from_connection_prefix(
                connection_id,
                USERNAME_MAX_CHARS.saturating_sub(suffix.len()),
            );
            Username::new(format!("{}{}", prefix, suffix)).ok()
        });

        longer_prefixes
            .chain(numbered)
            .find(|candidate| !self.is_username_taken(candidate, connection_id))
            .unwrap_or_else(|| default_username(connection_id))
    }

    fn is_username_taken(&self, username: &Username, except: &ConnectionId) -> bool {
        self.participants
            .values()
            .any(|p| &p.id != except && &p.username == username)
    }
}
