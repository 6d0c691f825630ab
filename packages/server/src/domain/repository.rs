//! Repository trait 定義
//!
//! Presence Registry と Room Registry へのアクセスをまとめたインターフェース。
//! 実装は両方のレジストリを 1 つの排他制御のもとで扱わなければならない
//! （同時に発生する接続・切断・改名・Room 操作が同じマップを更新するため）。

use async_trait::async_trait;

use super::{
    entity::{Disconnection, Participant, Room, RoomDeparture, RoomSnapshot},
    error::{PresenceError, RenameRejection, RoomError},
    value_object::{ConnectionId, RoomName},
};

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// 参加者を登録（既定の身元を割り当てる）
    async fn register_participant(
        &self,
        connection_id: ConnectionId,
    ) -> Result<Participant, PresenceError>;

    /// 参加者の表示名を変更
    async fn rename_participant(
        &self,
        connection_id: &ConnectionId,
        new_username: &str,
    ) -> Result<Participant, RenameRejection>;

    /// 参加者を取得
    async fn find_participant(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// 登録順の参加者リスト
    async fn participants(&self) -> Vec<Participant>;

    /// 接続中の参加者数
    async fn count_participants(&self) -> usize;

    /// 参加者を削除し、所属する全ての Room から離脱させる
    async fn disconnect(&self, connection_id: &ConnectionId) -> Disconnection;

    /// Room を作成
    async fn create_room(
        &self,
        room_name: RoomName,
        creator: ConnectionId,
    ) -> Result<Room, RoomError>;

    /// Room に参加
    async fn join_room(
        &self,
        room_name: &RoomName,
        connection_id: ConnectionId,
    ) -> Result<Room, RoomError>;

    /// Room から離脱
    async fn leave_room(
        &self,
        room_name: &RoomName,
        connection_id: &ConnectionId,
    ) -> Result<RoomDeparture, RoomError>;

    /// 接続が Room のメンバーであることを確認
    async fn ensure_member(
        &self,
        room_name: &RoomName,
        connection_id: &ConnectionId,
    ) -> Result<(), RoomError>;

    /// 接続が所属する Room のスナップショット
    async fn rooms_for(&self, connection_id: &ConnectionId) -> Vec<RoomSnapshot>;

    /// 全 Room のスナップショット
    async fn rooms(&self) -> Vec<RoomSnapshot>;

    /// Room のメンバー一覧（参加順）
    async fn room_users(&self, room_name: &RoomName) -> Result<Vec<ConnectionId>, RoomError>;
}
