//! サーバーが発行するシステムメッセージの本文

use super::value_object::{MessageText, RoomName, Username};

pub fn username_changed(previous: &Username, current: &Username) -> MessageText {
    MessageText::system(format!("{} is now known as {}", previous, current))
}

pub fn room_created(creator: &Username, room_name: &RoomName) -> MessageText {
    MessageText::system(format!("{} created room {}", creator, room_name))
}

pub fn room_joined(member: &Username, room_name: &RoomName) -> MessageText {
    MessageText::system(format!("{} joined room {}", member, room_name))
}

pub fn room_left(member: &Username) -> MessageText {
    MessageText::system(format!("{} left the room", member))
}

pub fn room_deleted(room_name: &RoomName) -> MessageText {
    MessageText::system(format!("Room {} was deleted", room_name))
}
