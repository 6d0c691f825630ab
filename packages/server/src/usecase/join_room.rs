//! UseCase: Room 参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 参加した本人を含む Room の全メンバーに参加の告知が届くことを保証
//! - 存在しない Room や参加済みの Room への参加が拒否されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存の Room への参加
//! - 異常系：存在しない Room、参加済みの Room

use std::sync::Arc;

use crate::domain::{
    ChatRepository, ConnectionId, MessagePusher, MessageRouter, Notification, PushTarget,
    Recipient, Room, RoomName, system_notice,
};

use super::{
    error::RoomActionError,
    notify::{announce, push_or_log, push_room_listing, reject_room_action},
};

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    router: Arc<MessageRouter>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        router: Arc<MessageRouter>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            router,
        }
    }

    /// Room 参加を実行
    ///
    /// 購読を先に行うため、参加の告知は本人にも届く。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_name: RoomName,
    ) -> Result<Room, RoomActionError> {
        let Some(member) = self.repository.find_participant(&connection_id).await else {
            return Err(RoomActionError::UnknownConnection(
                connection_id.into_string(),
            ));
        };

        let room = match self
            .repository
            .join_room(&room_name, connection_id.clone())
            .await
        {
            Ok(room) => room,
            Err(e) => {
                reject_room_action(self.message_pusher.as_ref(), &connection_id, &e).await;
                return Err(e.into());
            }
        };

        self.message_pusher
            .subscribe(&connection_id, &room_name)
            .await;
        push_room_listing(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            &connection_id,
        )
        .await;

        tracing::info!("'{}' joined room '{}'", member.username, room_name);
        announce(
            &self.router,
            system_notice::room_joined(&member.username, &room_name),
            Recipient::Room(room_name.clone()),
        )
        .await;

        push_or_log(
            self.message_pusher.as_ref(),
            PushTarget::Client(connection_id),
            Notification::RoomJoined(room_name),
        )
        .await;

        Ok(room)
    }
}
