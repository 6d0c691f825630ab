//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 全体・ダイレクト・Room の各宛先への配送
//!
//! ### なぜこのテストが必要か
//! - ダイレクトメッセージが宛先と送信者の双方に 1 回ずつ届くことを保証
//! - Room のメンバーでない送信者のメッセージが配送されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：各宛先への送信
//! - エッジケース：宛先が切断済みのダイレクトメッセージ
//! - 異常系：存在しない Room、メンバーでない Room への送信

use std::sync::Arc;

use crate::domain::{
    ChatRepository, ConnectionId, Envelope, MessagePusher, MessageRouter, MessageText,
    Recipient, Sender,
};

use super::{error::SendMessageError, notify::reject_room_action};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（拒否通知の送信）
    message_pusher: Arc<dyn MessagePusher>,
    /// メッセージの配送
    router: Arc<MessageRouter>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
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

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者の接続 ID
    /// * `recipient` - 宛先（全体・ダイレクト・Room）
    /// * `text` - メッセージ本文
    ///
    /// # Returns
    ///
    /// * `Ok(Envelope)` - 配送したエンベロープ
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        from: ConnectionId,
        recipient: Recipient,
        text: MessageText,
    ) -> Result<Envelope, SendMessageError> {
        // 1. 送信者の身元を取得（senderUsername の刻印に使う）
        let Some(sender) = self.repository.find_participant(&from).await else {
            return Err(SendMessageError::UnknownSender(from.into_string()));
        };

        // 2. Room 宛ての場合は送信者がメンバーであることを確認
        if let Recipient::Room(room_name) = &recipient
            && let Err(e) = self.repository.ensure_member(room_name, &from).await
        {
            reject_room_action(self.message_pusher.as_ref(), &from, &e).await;
            return Err(e.into());
        }

        // 3. エンベロープを構築して配送
        let envelope = self
            .router
            .build_envelope(Sender::Participant(sender), text, recipient);
        self.router.route(&envelope).await?;

        tracing::debug!("Routed message from '{}' to {:?}", from, envelope.recipient);

        Ok(envelope)
    }
}
