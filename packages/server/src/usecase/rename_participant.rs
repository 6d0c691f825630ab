//! UseCase: 表示名の変更
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RenameParticipantUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 同時に接続している参加者の表示名が重複しないことを保証
//! - 拒否された場合は名簿が更新されず、本人にのみ拒否理由が届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：改名と名簿・システムメッセージの通知
//! - 異常系：長すぎる表示名、使用中の表示名

use std::sync::Arc;

use crate::domain::{
    ChatRepository, ConnectionId, MessagePusher, MessageRouter, Notification, Participant,
    PushTarget, Recipient, RenameRejection, system_notice,
};

use super::notify::{announce, broadcast_roster, push_or_log};

/// 表示名変更のユースケース
pub struct RenameParticipantUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    router: Arc<MessageRouter>,
}

impl RenameParticipantUseCase {
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

    /// 表示名の変更を実行
    ///
    /// 成功時は名簿を全員に、新しい身元を本人に送り、全体にシステムメッセージを流す。
    /// 拒否時は `username-rejected` を本人にのみ送る。`user` / `users` は送らない。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        new_username: &str,
    ) -> Result<Participant, RenameRejection> {
        let previous = self.repository.find_participant(&connection_id).await;

        let renamed = match self
            .repository
            .rename_participant(&connection_id, new_username)
            .await
        {
            Ok(participant) => participant,
            Err(rejection) => {
                tracing::debug!(
                    "Rename of '{}' to '{}' rejected: {}",
                    connection_id,
                    new_username,
                    rejection
                );
                push_or_log(
                    self.message_pusher.as_ref(),
                    PushTarget::Client(connection_id),
                    Notification::UsernameRejected(rejection),
                )
                .await;
                return Err(rejection);
            }
        };

        broadcast_roster(self.repository.as_ref(), self.message_pusher.as_ref()).await;
        push_or_log(
            self.message_pusher.as_ref(),
            PushTarget::Client(connection_id),
            Notification::Identity(renamed.clone()),
        )
        .await;

        if let Some(previous) = previous {
            tracing::info!(
                "'{}' is now known as '{}'",
                previous.username,
                renamed.username
            );
            announce(
                &self.router,
                system_notice::username_changed(&previous.username, &renamed.username),
                Recipient::Global,
            )
            .await;
        }

        Ok(renamed)
    }
}
