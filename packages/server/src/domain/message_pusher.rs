//! MessagePusher trait 定義
//!
//! トランスポートに求める最小限の機能:
//! - 接続ごとの送信チャンネルの登録・解除
//! - ブロードキャストグループ（Room）への購読・購読解除
//! - 1 接続・1 グループ・全接続のいずれかへの送信
//!
//! この契約を満たすトランスポートであれば差し替え可能。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::MessagePushError,
    notification::Notification,
    value_object::{ConnectionId, RoomName},
};

/// クライアントへのメッセージ送信用チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 送信先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushTarget {
    /// 1 接続のみ
    Client(ConnectionId),
    /// グループを購読している全接続
    Group(RoomName),
    /// 全接続
    All,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを解除し、全てのグループから購読解除する
    async fn unregister_client(&self, client_id: &ConnectionId);

    /// 接続をグループに購読させる
    async fn subscribe(&self, client_id: &ConnectionId, group: &RoomName);

    /// 接続のグループ購読を解除する
    async fn unsubscribe(&self, client_id: &ConnectionId, group: &RoomName);

    /// 通知を送信する
    ///
    /// `PushTarget::Client` で接続が見つからない場合は `ClientNotFound` を返す。
    /// グループ・全体への送信は一部の送信失敗を許容する。
    async fn push(
        &self,
        target: &PushTarget,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;
}
