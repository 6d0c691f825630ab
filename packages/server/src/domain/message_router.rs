//! Message Router
//!
//! エンベロープを構築し、宛先（全体・ダイレクト・Room）に応じて配送する。
//! 状態は持たない。宛先の存在確認は行わない（Room の検証は Room Registry の責務、
//! 切断済みの接続宛てのダイレクトメッセージは黙って破棄される）。

use std::sync::Arc;

use kaiwa_shared::time::{Clock, format_display_date, format_display_time};

use super::{
    entity::{Envelope, Recipient, Sender},
    error::MessagePushError,
    message_pusher::{MessagePusher, PushTarget},
    notification::Notification,
    value_object::{ConnectionId, MessageText, RoomName},
};

pub struct MessageRouter {
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl MessageRouter {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// 現在時刻を刻印したエンベロープを構築
    pub fn build_envelope(
        &self,
        sender: Sender,
        text: MessageText,
        recipient: Recipient,
    ) -> Envelope {
        let now = self.clock.now();
        Envelope {
            sender,
            text,
            recipient,
            date: format_display_date(&now),
            time: format_display_time(&now),
        }
    }

    /// エンベロープの宛先に応じて配送
    pub async fn route(&self, envelope: &Envelope) -> Result<(), MessagePushError> {
        match &envelope.recipient {
            Recipient::Global => self.route_global(envelope).await,
            Recipient::Direct(recipient) => self.route_direct(envelope, recipient).await,
            Recipient::Room(room_name) => self.route_room(envelope, room_name).await,
        }
    }

    /// 全接続へ配送
    pub async fn route_global(&self, envelope: &Envelope) -> Result<(), MessagePushError> {
        self.message_pusher
            .push(&PushTarget::All, &Notification::Message(envelope.clone()))
            .await
    }

    /// 宛先の接続と、送信者自身へ配送
    ///
    /// トランスポートの 1 対 1 送信は送信者を含まないため、送信者にも同じエンベロープを送る。
    /// 自分宛ての場合は 1 回だけ配送する。宛先が切断済みでもエラーにはしない。
    pub async fn route_direct(
        &self,
        envelope: &Envelope,
        recipient: &ConnectionId,
    ) -> Result<(), MessagePushError> {
        let notification = Notification::Message(envelope.clone());

        match self
            .message_pusher
            .push(&PushTarget::Client(recipient.clone()), &notification)
            .await
        {
            Ok(()) => {}
            Err(MessagePushError::ClientNotFound(id)) => {
                tracing::debug!("Direct message recipient '{}' is gone, dropping", id);
            }
            Err(e) => {
                tracing::warn!("Failed to deliver direct message to '{}': {}", recipient, e);
            }
        }

        if let Sender::Participant(sender) = &envelope.sender
            && &sender.id != recipient
        {
            self.message_pusher
                .push(&PushTarget::Client(sender.id.clone()), &notification)
                .await?;
        }

        Ok(())
    }

    /// Room のグループを購読している全接続へ配送（送信者を含む）
    pub async fn route_room(
        &self,
        envelope: &Envelope,
        room_name: &RoomName,
    ) -> Result<(), MessagePushError> {
        self.message_pusher
            .push(
                &PushTarget::Group(room_name.clone()),
                &Notification::Message(envelope.clone()),
            )
            .await
    }
}
