//! WebSocket event DTOs.
//!
//! Client → server frames are internally tagged: `{"type": "join-room", "roomName": "x"}`.
//! Server → client frames are adjacently tagged: `{"type": "room-joined", "payload": "x"}`.

use serde::{Deserialize, Serialize};

/// Sender id used for messages issued by the server itself
pub const SYSTEM_SENDER_ID: &str = "server";

/// Sender display name used for messages issued by the server itself
pub const SYSTEM_SENDER_NAME: &str = "Server";

/// Rejection reason for frames that are not a known client event
pub const MALFORMED_EVENT_REASON: &str = "malformed-event";

/// Events sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    UsernameUpdate { username: String },
    GlobalMessage { text: String },
    PrivateMessage { recipient_id: String, text: String },
    CreateRoom { room_name: String },
    JoinRoom { room_name: String },
    LeaveRoom { room_name: String },
    RoomMessage { room_name: String, text: String },
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ServerEvent {
    User(ParticipantDto),
    Users(Vec<ParticipantDto>),
    Rooms(Vec<RoomDto>),
    GlobalMessage(EnvelopeDto),
    PrivateMessage(EnvelopeDto),
    RoomMessage(EnvelopeDto),
    RoomExists,
    RoomNotFound,
    AlreadyInRoom,
    NotInRoom,
    RoomCreated(String),
    RoomJoined(String),
    RoomLeft(String),
    UsernameRejected(RejectionDto),
    RequestRejected(RejectionDto),
}

/// Participant information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: String,
    pub username: String,
}

/// Room with its member connection ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub room_name: String,
    pub users: Vec<String>,
}

/// Message envelope
///
/// `recipient` is `null` for global messages, the recipient's connection id
/// for private messages and the room name for room messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDto {
    pub sender: String,
    pub sender_username: String,
    pub text: String,
    pub recipient: Option<String>,
    pub date: String,
    pub time: String,
}

/// Reason a request was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionDto {
    pub reason: String,
}
