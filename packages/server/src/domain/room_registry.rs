//! Room Registry
//!
//! ルーム名 → Room のマッピングと、Room のライフサイクル（作成・参加・離脱・削除）を管理する。
//!
//! メンバーが 0 人になった瞬間に Room は削除される。放置された Room を掃除する
//! 別の仕組みは持たない。削除後に同じ名前で作成された Room は新しい Room として扱う。

use indexmap::IndexMap;

use super::{
    entity::{Room, RoomDeparture, RoomSnapshot},
    error::RoomError,
    value_object::{ConnectionId, RoomName},
};

#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: IndexMap<RoomName, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 作成者のみをメンバーとする Room を作成する
    pub fn create(
        &mut self,
        room_name: RoomName,
        creator: ConnectionId,
    ) -> Result<Room, RoomError> {
        if self.rooms.contains_key(&room_name) {
            return Err(RoomError::RoomExists(room_name.into_string()));
        }

        let room = Room::new(room_name.clone(), creator);
        self.rooms.insert(room_name, room.clone());
        Ok(room)
    }

    /// 既存の Room に参加する
    pub fn join(
        &mut self,
        room_name: &RoomName,
        connection_id: ConnectionId,
    ) -> Result<Room, RoomError> {
        let Some(room) = self.rooms.get_mut(room_name) else {
            return Err(RoomError::RoomNotFound(room_name.as_str().to_string()));
        };
        if room.is_member(&connection_id) {
            return Err(RoomError::AlreadyMember(room_name.as_str().to_string()));
        }

        room.members.insert(connection_id);
        Ok(room.clone())
    }

    /// Room から離脱する
    ///
    /// メンバーが 0 人になった場合は Room を削除し、`room_deleted = true` を返す。
    pub fn leave(
        &mut self,
        room_name: &RoomName,
        connection_id: &ConnectionId,
    ) -> Result<RoomDeparture, RoomError> {
        let Some(room) = self.rooms.get_mut(room_name) else {
            return Err(RoomError::RoomNotFound(room_name.as_str().to_string()));
        };
        if !room.members.shift_remove(connection_id) {
            return Err(RoomError::NotMember(room_name.as_str().to_string()));
        }

        let room_deleted = room.is_empty();
        if room_deleted {
            self.rooms.shift_remove(room_name);
        }

        Ok(RoomDeparture {
            room_name: room_name.clone(),
            room_deleted,
        })
    }

    /// 接続が所属する全ての Room から離脱する（切断時）
    ///
    /// 所属していない接続に対しては何もせず、空の結果を返す。
    pub fn leave_all(&mut self, connection_id: &ConnectionId) -> Vec<RoomDeparture> {
        self.list_for(connection_id)
            .into_iter()
            .filter_map(|room_name| self.leave(&room_name, connection_id).ok())
            .collect()
    }

    /// 接続が所属する Room 名の一覧
    pub fn list_for(&self, connection_id: &ConnectionId) -> Vec<RoomName> {
        self.rooms
            .values()
            .filter(|room| room.is_member(connection_id))
            .map(|room| room.name.clone())
            .collect()
    }

    /// 接続が所属する Room のスナップショット
    pub fn serialize_for(&self, connection_id: &ConnectionId) -> Vec<RoomSnapshot> {
        self.rooms
            .values()
            .filter(|room| room.is_member(connection_id))
            .map(Room::snapshot)
            .collect()
    }

    /// 全 Room のスナップショット
    pub fn serialize(&self) -> Vec<RoomSnapshot> {
        self.rooms.values().map(Room::snapshot).collect()
    }

    pub fn get(&self, room_name: &RoomName) -> Option<&Room> {
        self.rooms.get(room_name)
    }

    /// Room のメンバー一覧
    pub fn users(&self, room_name: &RoomName) -> Option<Vec<ConnectionId>> {
        self.rooms
            .get(room_name)
            .map(|room| room.members.iter().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn room(value: &str) -> RoomName {
        RoomName::new(value.to_string()).unwrap()
    }

    fn assert_no_empty_rooms(registry: &RoomRegistry) {
        for snapshot in registry.serialize() {
            assert!(
                !snapshot.users.is_empty(),
                "room '{}' exists without members",
                snapshot.room_name
            );
        }
    }

    #[test]
    fn test_create_room_with_creator_as_member() {
        // テスト項目: 作成者のみをメンバーとする Room が作成される
        // given (前提条件):
        let mut registry = RoomRegistry::new();

        // when (操作):
        let created = registry.create(room("x"), id("c1")).unwrap();

        // then (期待する結果):
        assert_eq!(created.name, room("x"));
        assert_eq!(created.members.len(), 1);
        assert!(created.is_member(&id("c1")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_existing_room_fails() {
        // テスト項目: 既存の名前での作成は RoomExists になり、Room は 1 つのまま
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        registry.create(room("x"), id("c1")).unwrap();

        // when (操作):
        let result = registry.create(room("x"), id("c2"));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::RoomExists("x".to_string())));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.users(&room("x")), Some(vec![id("c1")]));
    }

    #[test]
    fn test_join_room_adds_member() {
        // テスト項目: 参加するとメンバーに追加される
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        registry.create(room("x"), id("c1")).unwrap();

        // when (操作):
        let joined = registry.join(&room("x"), id("c2")).unwrap();

        // then (期待する結果):
        let members: Vec<ConnectionId> = joined.members.into_iter().collect();
        assert_eq!(members, vec![id("c1"), id("c2")]);
    }

    #[test]
    fn test_join_missing_room_fails() {
        // テスト項目: 存在しない Room への参加は RoomNotFound になる
        // given (前提条件):
        let mut registry = RoomRegistry::new();

        // when (操作):
        let result = registry.join(&room("nowhere"), id("c1"));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::RoomNotFound("nowhere".to_string())));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_join_twice_fails() {
        // テスト項目: 既に参加している Room への再参加は AlreadyMember になる
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        registry.create(room("x"), id("c1")).unwrap();

        // when (操作):
        let result = registry.join(&room("x"), id("c1"));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::AlreadyMember("x".to_string())));
        assert_eq!(registry.users(&room("x")).map(|u| u.len()), Some(1));
    }

    #[test]
    fn test_leave_last_member_deletes_room() {
        // テスト項目: 最後のメンバーが離脱すると Room が削除される
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        registry.create(room("x"), id("c1")).unwrap();

        // when (操作):
        let departure = registry.leave(&room("x"), &id("c1")).unwrap();

        // then (期待する結果):
        assert!(departure.room_deleted);
        assert!(registry.get(&room("x")).is_none());
    }

    #[test]
    fn test_leave_keeps_room_with_remaining_members() {
        // テスト項目: メンバーが残っている場合 Room は削除されない
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        registry.create(room("x"), id("c1")).unwrap();
        registry.join(&room("x"), id("c2")).unwrap();

        // when (操作):
        let departure = registry.leave(&room("x"), &id("c1")).unwrap();

        // then (期待する結果):
        assert!(!departure.room_deleted);
        assert_eq!(registry.users(&room("x")), Some(vec![id("c2")]));
    }

    #[test]
    fn test_leave_as_non_member_fails() {
        // テスト項目: メンバーでない Room からの離脱は NotMember になる
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        registry.create(room("x"), id("c1")).unwrap();

        // when (操作):
        let result = registry.leave(&room("x"), &id("c2"));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::NotMember("x".to_string())));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_recreate_after_deletion_is_fresh_room() {
        // テスト項目: 削除後に同じ名前で作成した Room は新しいメンバー集合を持つ
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        registry.create(room("x"), id("c1")).unwrap();
        registry.join(&room("x"), id("c2")).unwrap();
        registry.leave(&room("x"), &id("c1")).unwrap();
        registry.leave(&room("x"), &id("c2")).unwrap();

        // when (操作):
        let recreated = registry.create(room("x"), id("c3")).unwrap();

        // then (期待する結果):
        let members: Vec<ConnectionId> = recreated.members.into_iter().collect();
        assert_eq!(members, vec![id("c3")]);
    }

    #[test]
    fn test_leave_all_reports_vacated_and_deleted_rooms() {
        // テスト項目: leave_all は離脱した Room と削除された Room を報告する
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        registry.create(room("solo"), id("c1")).unwrap();
        registry.create(room("shared"), id("c1")).unwrap();
        registry.join(&room("shared"), id("c2")).unwrap();
        registry.create(room("other"), id("c2")).unwrap();

        // when (操作):
        let departures = registry.leave_all(&id("c1"));

        // then (期待する結果):
        assert_eq!(
            departures,
            vec![
                RoomDeparture {
                    room_name: room("solo"),
                    room_deleted: true,
                },
                RoomDeparture {
                    room_name: room("shared"),
                    room_deleted: false,
                },
            ]
        );
        assert!(registry.list_for(&id("c1")).is_empty());
        assert_eq!(registry.list_for(&id("c2")), vec![room("shared"), room("other")]);
        assert_no_empty_rooms(&registry);
    }

    #[test]
    fn test_leave_all_is_idempotent() {
        // テスト項目: 同じ接続で 2 回 leave_all を呼んでも 2 回目は何も起きない
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        registry.create(room("x"), id("c1")).unwrap();
        registry.join(&room("x"), id("c2")).unwrap();
        registry.leave_all(&id("c1"));
        let before = registry.serialize();

        // when (操作):
        let departures = registry.leave_all(&id("c1"));

        // then (期待する結果):
        assert!(departures.is_empty());
        assert_eq!(registry.serialize(), before);
    }

    #[test]
    fn test_serialize_for_only_includes_member_rooms() {
        // テスト項目: serialize_for は所属する Room のみを返す
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        registry.create(room("a"), id("c1")).unwrap();
        registry.create(room("b"), id("c2")).unwrap();
        registry.join(&room("b"), id("c1")).unwrap();
        registry.create(room("c"), id("c2")).unwrap();

        // when (操作):
        let rooms = registry.serialize_for(&id("c1"));

        // then (期待する結果):
        assert_eq!(
            rooms,
            vec![
                RoomSnapshot {
                    room_name: room("a"),
                    users: vec![id("c1")],
                },
                RoomSnapshot {
                    room_name: room("b"),
                    users: vec![id("c2"), id("c1")],
                },
            ]
        );
    }

    #[test]
    fn test_no_empty_room_survives_mixed_operations() {
        // テスト項目: 作成・参加・離脱を混ぜても メンバー 0 人の Room は存在しない
        // given (前提条件):
        let mut registry = RoomRegistry::new();
        let connections = ["c1", "c2", "c3"];
        let names = ["r1", "r2"];

        // when (操作) / then (期待する結果):
        for step in 0..30usize {
            let conn = id(connections[step % connections.len()]);
            let name = room(names[(step / 3) % names.len()]);
            match step % 4 {
                0 => {
                    let _ = registry.create(name, conn);
                }
                1 => {
                    let _ = registry.join(&name, conn);
                }
                2 => {
                    let _ = registry.leave(&name, &conn);
                }
                _ => {
                    registry.leave_all(&conn);
                }
            }
            assert_no_empty_rooms(&registry);
        }
    }
}
