//! UseCase: Room 離脱処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 離脱した接続にそれ以降 Room メッセージが届かないことを保証
//! - 最後のメンバーが離脱すると Room が削除され、全体に告知されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーが残る離脱、最後のメンバーの離脱
//! - 異常系：メンバーでない Room からの離脱

use std::sync::Arc;

use crate::domain::{
    ChatRepository, ConnectionId, MessagePusher, MessageRouter, Notification, PushTarget,
    Recipient, RoomDeparture, RoomName, system_notice,
};

use super::{
    error::RoomActionError,
    notify::{announce, push_or_log, push_room_listing, reject_room_action},
};

/// Room 離脱のユースケース
pub struct LeaveRoomUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    router: Arc<MessageRouter>,
}

impl LeaveRoomUseCase {
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

    /// Room 離脱を実行
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_name: RoomName,
    ) -> Result<RoomDeparture, RoomActionError> {
        let Some(member) = self.repository.find_participant(&connection_id).await else {
            return Err(RoomActionError::UnknownConnection(
                connection_id.into_string(),
            ));
        };

        let departure = match self.repository.leave_room(&room_name, &connection_id).await {
            Ok(departure) => departure,
            Err(e) => {
                reject_room_action(self.message_pusher.as_ref(), &connection_id, &e).await;
                return Err(e.into());
            }
        };

        self.message_pusher
            .unsubscribe(&connection_id, &room_name)
            .await;
        push_room_listing(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            &connection_id,
        )
        .await;
        push_or_log(
            self.message_pusher.as_ref(),
            PushTarget::Client(connection_id),
            Notification::RoomLeft(room_name.clone()),
        )
        .await;

        tracing::info!("'{}' left room '{}'", member.username, room_name);
        announce(
            &self.router,
            system_notice::room_left(&member.username),
            Recipient::Room(room_name.clone()),
        )
        .await;

        if departure.room_deleted {
            tracing::info!("Room '{}' was deleted", room_name);
            announce(
                &self.router,
                system_notice::room_deleted(&room_name),
                Recipient::Global,
            )
            .await;
        }

        Ok(departure)
    }
}
