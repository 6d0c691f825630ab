//! UseCase layer
//!
//! クライアントの操作ごとに 1 つのユースケースを定義します。
//! 各ユースケースは Repository と MessagePusher の trait にのみ依存します。

pub mod connect_participant;
pub mod create_room;
pub mod disconnect_participant;
pub mod error;
pub mod get_participants;
pub mod get_rooms;
pub mod get_server_status;
pub mod join_room;
pub mod leave_room;
mod notify;
pub mod rename_participant;
pub mod send_message;

#[cfg(test)]
mod test_support;

pub use connect_participant::ConnectParticipantUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, DisconnectError, RoomActionError, SendMessageError};
pub use get_participants::GetParticipantsUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use get_server_status::{GetServerStatusUseCase, ServerStatus};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use rename_participant::RenameParticipantUseCase;
pub use send_message::SendMessageUseCase;
