//! UseCase: 参加者一覧取得処理

use std::sync::Arc;

use crate::domain::{ChatRepository, Participant};

/// 参加者一覧取得のユースケース
pub struct GetParticipantsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl GetParticipantsUseCase {
    /// 新しい GetParticipantsUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// 接続順の参加者を取得
    pub async fn execute(&self) -> Vec<Participant> {
        self.repository.participants().await
    }
}
