//! UseCase: Room 一覧取得処理

use std::sync::Arc;

use crate::domain::{ChatRepository, ConnectionId, RoomError, RoomName, RoomSnapshot};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// 作成順の全 Room を取得
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        self.repository.rooms().await
    }

    /// 指定した Room のメンバーを参加順に取得
    pub async fn users(&self, room_name: &RoomName) -> Result<Vec<ConnectionId>, RoomError> {
        self.repository.room_users(room_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryChatRepository;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn room(value: &str) -> RoomName {
        RoomName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_get_rooms_in_creation_order() {
        // テスト項目: 全 Room が作成順にメンバー付きで返される
        // given (前提条件):
        let repository = Arc::new(InMemoryChatRepository::new());
        repository.register_participant(id("c1")).await.unwrap();
        repository.register_participant(id("c2")).await.unwrap();
        repository.create_room(room("b"), id("c1")).await.unwrap();
        repository.create_room(room("a"), id("c2")).await.unwrap();
        repository.join_room(&room("b"), id("c2")).await.unwrap();
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room_name, room("b"));
        assert_eq!(rooms[0].users, vec![id("c1"), id("c2")]);
        assert_eq!(rooms[1].room_name, room("a"));
    }

    #[tokio::test]
    async fn test_get_rooms_empty() {
        // テスト項目: Room がない場合は空のリストが返される
        // given (前提条件):
        let usecase = GetRoomsUseCase::new(Arc::new(InMemoryChatRepository::new()));

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn test_get_room_users_in_join_order() {
        // テスト項目: 指定した Room のメンバーが参加順に返される
        // given (前提条件):
        let repository = Arc::new(InMemoryChatRepository::new());
        repository.register_participant(id("c1")).await.unwrap();
        repository.register_participant(id("c2")).await.unwrap();
        repository.create_room(room("x"), id("c2")).await.unwrap();
        repository.join_room(&room("x"), id("c1")).await.unwrap();
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let users = usecase.users(&room("x")).await;

        // then (期待する結果):
        assert_eq!(users, Ok(vec![id("c2"), id("c1")]));
    }

    #[tokio::test]
    async fn test_get_room_users_of_missing_room() {
        // テスト項目: 存在しない Room は RoomNotFound になる
        // given (前提条件):
        let usecase = GetRoomsUseCase::new(Arc::new(InMemoryChatRepository::new()));

        // when (操作):
        let users = usecase.users(&room("x")).await;

        // then (期待する結果):
        assert_eq!(users, Err(RoomError::RoomNotFound("x".to_string())));
    }
}
