//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - Presence Registry からの削除、全 Room からの離脱、通知
//!
//! ### なぜこのテストが必要か
//! - 切断した参加者が名簿と Room に残らないことを保証
//! - 残ったメンバーに離脱通知、Room が消えた場合は全体に削除通知が届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：最後のメンバーの切断による Room 削除
//! - 異常系：存在しない（切断済みの）参加者の切断

use std::sync::Arc;

use crate::domain::{
    ChatRepository, ConnectionId, Disconnection, MessagePusher, MessageRouter, Recipient,
    default_username, system_notice,
};

use super::{
    error::DisconnectError,
    notify::{announce, broadcast_roster},
};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// システムメッセージの配送
    router: Arc<MessageRouter>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
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

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Disconnection)` - 削除した参加者と、離脱した Room の一覧
    /// * `Err(DisconnectError)` - 参加者が登録されていなかった（何も変更しない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
    ) -> Result<Disconnection, DisconnectError> {
        // 1. Presence Registry から削除し、全 Room から離脱（不可分）
        let disconnection = self.repository.disconnect(&connection_id).await;

        // 2. MessagePusher から登録解除（全グループからも外れる）
        self.message_pusher.unregister_client(&connection_id).await;

        let Some(participant) = &disconnection.participant else {
            if disconnection.departures.is_empty() {
                return Err(DisconnectError::UnknownConnection(
                    connection_id.into_string(),
                ));
            }
            tracing::warn!(
                "Connection '{}' left rooms without a presence record",
                connection_id
            );
            self.announce_departures(&disconnection, &connection_id).await;
            return Ok(disconnection);
        };

        // 3. 全員に名簿を通知
        broadcast_roster(self.repository.as_ref(), self.message_pusher.as_ref()).await;

        // 4. Room ごとの離脱通知・削除通知
        self.announce_departures(&disconnection, &participant.id).await;

        Ok(disconnection)
    }

    async fn announce_departures(
        &self,
        disconnection: &Disconnection,
        connection_id: &ConnectionId,
    ) {
        let username = disconnection
            .participant
            .as_ref()
            .map(|p| p.username.clone())
            .unwrap_or_else(|| default_username(connection_id));

        for departure in &disconnection.departures {
            announce(
                &self.router,
                system_notice::room_left(&username),
                Recipient::Room(departure.room_name.clone()),
            )
            .await;

            if departure.room_deleted {
                tracing::info!("Room '{}' was deleted", departure.room_name);
                announce(
                    &self.router,
                    system_notice::room_deleted(&departure.room_name),
                    Recipient::Global,
                )
                .await;
            }
        }
    }

    /// 残りの参加者数を取得
    pub async fn count_remaining_participants(&self) -> usize {
        self.repository.count_participants().await
    }
}
