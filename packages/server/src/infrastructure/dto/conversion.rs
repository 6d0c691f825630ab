//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    Envelope, Notification, Participant, Recipient, RenameRejection, RoomSnapshot, Sender,
    ValueObjectError,
};
use crate::infrastructure::dto::websocket::{
    self as dto, SYSTEM_SENDER_ID, SYSTEM_SENDER_NAME,
};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Participant> for dto::ParticipantDto {
    fn from(model: &Participant) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            username: model.username.as_str().to_string(),
        }
    }
}

impl From<&RoomSnapshot> for dto::RoomDto {
    fn from(model: &RoomSnapshot) -> Self {
        Self {
            room_name: model.room_name.as_str().to_string(),
            users: model.users.iter().map(|id| id.as_str().to_string()).collect(),
        }
    }
}

impl From<&Envelope> for dto::EnvelopeDto {
    fn from(model: &Envelope) -> Self {
        let (sender, sender_username) = match &model.sender {
            Sender::Participant(p) => (
                p.id.as_str().to_string(),
                p.username.as_str().to_string(),
            ),
            Sender::System => (SYSTEM_SENDER_ID.to_string(), SYSTEM_SENDER_NAME.to_string()),
        };
        let recipient = match &model.recipient {
            Recipient::Global => None,
            Recipient::Direct(id) => Some(id.as_str().to_string()),
            Recipient::Room(name) => Some(name.as_str().to_string()),
        };

        Self {
            sender,
            sender_username,
            text: model.text.as_str().to_string(),
            recipient,
            date: model.date.clone(),
            time: model.time.clone(),
        }
    }
}

/// Wire representation of a rename rejection reason
pub fn rename_rejection_reason(rejection: RenameRejection) -> &'static str {
    match rejection {
        RenameRejection::Empty => "empty",
        RenameRejection::Unchanged => "unchanged",
        RenameRejection::TooLong => "too-long",
        RenameRejection::Taken => "taken",
        RenameRejection::UnknownConnection => "unknown-connection",
    }
}

/// Wire representation of why a client event could not be turned into a request
pub fn request_rejection_reason(error: &ValueObjectError) -> &'static str {
    match error {
        ValueObjectError::ConnectionIdEmpty => "invalid-recipient",
        ValueObjectError::UsernameEmpty | ValueObjectError::UsernameTooLong { .. } => {
            "invalid-username"
        }
        ValueObjectError::RoomNameEmpty | ValueObjectError::RoomNameTooLong { .. } => {
            "invalid-room-name"
        }
        ValueObjectError::MessageTextEmpty | ValueObjectError::MessageTextTooLong { .. } => {
            "invalid-message"
        }
    }
}

impl From<&Notification> for dto::ServerEvent {
    fn from(model: &Notification) -> Self {
        match model {
            Notification::Identity(p) => Self::User(p.into()),
            Notification::Roster(participants) => {
                Self::Users(participants.iter().map(Into::into).collect())
            }
            Notification::Rooms(rooms) => Self::Rooms(rooms.iter().map(Into::into).collect()),
            Notification::Message(envelope) => {
                let payload = dto::EnvelopeDto::from(envelope);
                match envelope.recipient {
                    Recipient::Global => Self::GlobalMessage(payload),
                    Recipient::Direct(_) => Self::PrivateMessage(payload),
                    Recipient::Room(_) => Self::RoomMessage(payload),
                }
            }
            Notification::RoomExists => Self::RoomExists,
            Notification::RoomNotFound => Self::RoomNotFound,
            Notification::AlreadyInRoom => Self::AlreadyInRoom,
            Notification::NotInRoom => Self::NotInRoom,
            Notification::RoomCreated(name) => Self::RoomCreated(name.as_str().to_string()),
            Notification::RoomJoined(name) => Self::RoomJoined(name.as_str().to_string()),
            Notification::RoomLeft(name) => Self::RoomLeft(name.as_str().to_string()),
            Notification::UsernameRejected(rejection) => Self::UsernameRejected(dto::RejectionDto {
                reason: rename_rejection_reason(*rejection).to_string(),
            }),
            Notification::RequestRejected(reason) => Self::RequestRejected(dto::RejectionDto {
                reason: reason.clone(),
            }),
        }
    }
}
