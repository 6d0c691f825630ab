//! サーバーからクライアントへ送る通知
//!
//! ワイヤ形式（JSON）への変換は Infrastructure 層の DTO が担当する。

use super::{
    entity::{Envelope, Participant, RoomSnapshot},
    error::RenameRejection,
    value_object::RoomName,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// 受信者自身の身元 (`user`)
    Identity(Participant),
    /// 接続中の参加者の名簿 (`users`)
    Roster(Vec<Participant>),
    /// 受信者が所属する Room の一覧 (`rooms`)
    Rooms(Vec<RoomSnapshot>),
    /// メッセージ。イベント名は宛先から決まる
    /// (`global-message` / `private-message` / `room-message`)
    Message(Envelope),
    RoomExists,
    RoomNotFound,
    AlreadyInRoom,
    NotInRoom,
    RoomCreated(RoomName),
    RoomJoined(RoomName),
    RoomLeft(RoomName),
    UsernameRejected(RenameRejection),
    /// 形式が不正なリクエスト
    RequestRejected(String),
}
