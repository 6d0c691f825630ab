//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 身元の割り当て、Presence Registry への登録、通知
//!
//! ### なぜこのテストが必要か
//! - 接続した本人にだけ `user` が届き、全員に最新の `users` が届くことを保証
//! - 同じ接続 ID の二重登録を防ぐ
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の接続
//! - 異常系：重複した接続 ID での接続試行

use std::sync::Arc;

use crate::domain::{
    ChatRepository, ConnectionId, MessagePusher, Notification, Participant, PushTarget,
    PusherChannel,
};

use super::{
    error::ConnectError,
    notify::{broadcast_roster, push_or_log},
};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - トランスポートが発行した接続 ID
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 割り当てた身元
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Participant, ConnectError> {
        // 1. 身元を割り当てて Presence Registry に登録
        let participant = self
            .repository
            .register_participant(connection_id.clone())
            .await?;

        // 2. MessagePusher に送信チャンネルを登録
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        // 3. 本人にだけ身元を通知
        push_or_log(
            self.message_pusher.as_ref(),
            PushTarget::Client(connection_id),
            Notification::Identity(participant.clone()),
        )
        .await;

        // 4. 全員に名簿を通知
        broadcast_roster(self.repository.as_ref(), self.message_pusher.as_ref()).await;

        Ok(participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::PresenceError,
        infrastructure::dto::websocket::{ParticipantDto, ServerEvent},
        usecase::test_support::{TestHarness, drain, id},
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_participant_success() {
        // テスト項目: 接続すると本人に user、全員に users が届く
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = ConnectParticipantUseCase::new(
            harness.repository.clone(),
            harness.message_pusher.clone(),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let participant = usecase.execute(id("abcdef0123"), tx).await.unwrap();

        // then (期待する結果):
        assert_eq!(participant.username.as_str(), "abcdef01");
        let me = ParticipantDto {
            id: "abcdef0123".to_string(),
            username: "abcdef01".to_string(),
        };
        assert_eq!(
            drain(&mut rx),
            vec![ServerEvent::User(me.clone()), ServerEvent::Users(vec![me])]
        );
        assert_eq!(harness.repository.count_participants().await, 1);
    }

    #[tokio::test]
    async fn test_connect_broadcasts_roster_to_existing_participants() {
        // テスト項目: 既存の参加者には新しい名簿のみが届き、user は届かない
        // given (前提条件):
        let harness = TestHarness::new();
        let mut rx_first = harness.connect("c1").await;
        drain(&mut rx_first);

        // when (操作):
        let _rx_second = harness.connect("c2").await;

        // then (期待する結果):
        let events = drain(&mut rx_first);
        assert_eq!(events.len(), 1);
        match &events[0] {
            ServerEvent::Users(users) => {
                let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
                assert_eq!(ids, vec!["c1", "c2"]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connect_participant_duplicate_error() {
        // テスト項目: 重複した接続 ID での接続試行がエラーになり、登録数は変わらない
        // given (前提条件):
        let harness = TestHarness::new();
        let _rx = harness.connect("c1").await;
        let usecase = ConnectParticipantUseCase::new(
            harness.repository.clone(),
            harness.message_pusher.clone(),
        );
        let (tx, mut rx_dup) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(id("c1"), tx).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConnectError::Presence(PresenceError::DuplicateConnection(
                "c1".to_string()
            )))
        );
        assert_eq!(harness.repository.count_participants().await, 1);
        assert!(drain(&mut rx_dup).is_empty());
    }
}
