//! UseCase 間で共通の通知処理

use crate::domain::{
    ChatRepository, ConnectionId, MessagePusher, MessageRouter, MessageText, Notification,
    PushTarget, Recipient, RoomError, Sender,
};

/// 通知を送信し、失敗した場合はログに残す
///
/// 付随する通知の送信失敗は、元の操作を失敗させない。
pub(crate) async fn push_or_log(
    message_pusher: &dyn MessagePusher,
    target: PushTarget,
    notification: Notification,
) {
    if let Err(e) = message_pusher.push(&target, &notification).await {
        tracing::warn!("Failed to push notification to {:?}: {}", target, e);
    }
}

/// 現在の名簿を全接続に送信
pub(crate) async fn broadcast_roster(
    repository: &dyn ChatRepository,
    message_pusher: &dyn MessagePusher,
) {
    let roster = repository.participants().await;
    push_or_log(message_pusher, PushTarget::All, Notification::Roster(roster)).await;
}

/// サーバー発のシステムメッセージを配送
pub(crate) async fn announce(router: &MessageRouter, text: MessageText, recipient: Recipient) {
    let envelope = router.build_envelope(Sender::System, text, recipient);
    if let Err(e) = router.route(&envelope).await {
        tracing::warn!("Failed to route system message: {}", e);
    }
}

/// 本人が所属する Room の一覧を本人に送信
pub(crate) async fn push_room_listing(
    repository: &dyn ChatRepository,
    message_pusher: &dyn MessagePusher,
    connection_id: &ConnectionId,
) {
    let rooms = repository.rooms_for(connection_id).await;
    push_or_log(
        message_pusher,
        PushTarget::Client(connection_id.clone()),
        Notification::Rooms(rooms),
    )
    .await;
}

/// Room 操作の失敗を本人に通知
pub(crate) async fn reject_room_action(
    message_pusher: &dyn MessagePusher,
    connection_id: &ConnectionId,
    error: &RoomError,
) {
    let notification = match error {
        RoomError::RoomExists(_) => Notification::RoomExists,
        RoomError::RoomNotFound(_) => Notification::RoomNotFound,
        RoomError::AlreadyMember(_) => Notification::AlreadyInRoom,
        RoomError::NotMember(_) => Notification::NotInRoom,
    };
    tracing::debug!("Room action by '{}' rejected: {}", connection_id, error);
    push_or_log(
        message_pusher,
        PushTarget::Client(connection_id.clone()),
        notification,
    )
    .await;
}
