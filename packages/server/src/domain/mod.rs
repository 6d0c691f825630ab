//! Domain layer
//!
//! 参加者・Room・メッセージのモデルと、それらを扱うレジストリ、
//! および外部（データストア・トランスポート）に求めるインターフェースを定義します。

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod message_router;
pub mod notification;
pub mod presence;
pub mod repository;
pub mod room_registry;
pub mod system_notice;
pub mod value_object;

pub use entity::{
    Disconnection, Envelope, Participant, Recipient, Room, RoomDeparture, RoomSnapshot, Sender,
};
pub use error::{MessagePushError, PresenceError, RenameRejection, RoomError, ValueObjectError};
pub use factory::{ConnectionIdFactory, assign_identity, default_username};
pub use message_pusher::{MessagePusher, PushTarget, PusherChannel};
pub use message_router::MessageRouter;
pub use notification::Notification;
pub use presence::PresenceRegistry;
pub use repository::ChatRepository;
pub use room_registry::RoomRegistry;
pub use value_object::{ConnectionId, MessageText, RoomName, Username};
