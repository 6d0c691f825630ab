//! UseCase: サーバー状態取得処理

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use kaiwa_shared::time::{Clock, elapsed_seconds};

/// サーバーの稼働状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    /// 起動時刻
    pub started: DateTime<FixedOffset>,
    /// 起動からの経過秒数
    pub uptime_seconds: u64,
}

/// サーバー状態取得のユースケース
pub struct GetServerStatusUseCase {
    clock: Arc<dyn Clock>,
    started: DateTime<FixedOffset>,
}

impl GetServerStatusUseCase {
    /// 起動時刻を記録して作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let started = clock.now();
        Self { clock, started }
    }

    pub fn execute(&self) -> ServerStatus {
        ServerStatus {
            started: self.started,
            uptime_seconds: elapsed_seconds(&self.started, &self.clock.now()),
        }
    }
}
