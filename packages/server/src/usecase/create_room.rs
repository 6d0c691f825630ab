//! UseCase: Room 作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 作成者が最初のメンバーとなり、Room グループを購読することを保証
//! - 同名の Room が既に存在する場合、本人にのみ `room-exists` が届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しい Room の作成
//! - 異常系：既存の Room 名での作成、未登録の接続からの作成

use std::sync::Arc;

use crate::domain::{
    ChatRepository, ConnectionId, MessagePusher, MessageRouter, Notification, PushTarget,
    Recipient, Room, RoomName, system_notice,
};

use super::{
    error::RoomActionError,
    notify::{announce, push_or_log, push_room_listing, reject_room_action},
};

/// Room 作成のユースケース
pub struct CreateRoomUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    router: Arc<MessageRouter>,
}

impl CreateRoomUseCase {
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

    /// Room 作成を実行
    ///
    /// 成功時は作成者をグループに購読させ、本人に `rooms` を送り、全体に作成を告知し、
    /// 最後に本人に `room-created` を送る。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_name: RoomName,
    ) -> Result<Room, RoomActionError> {
        let Some(creator) = self.repository.find_participant(&connection_id).await else {
            return Err(RoomActionError::UnknownConnection(
                connection_id.into_string(),
            ));
        };

        let room = match self
            .repository
            .create_room(room_name.clone(), connection_id.clone())
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

        tracing::info!("'{}' created room '{}'", creator.username, room_name);
        announce(
            &self.router,
            system_notice::room_created(&creator.username, &room_name),
            Recipient::Global,
        )
        .await;

        push_or_log(
            self.message_pusher.as_ref(),
            PushTarget::Client(connection_id),
            Notification::RoomCreated(room_name),
        )
        .await;

        Ok(room)
    }
}
