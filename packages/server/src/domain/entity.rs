//! Entities

use indexmap::IndexSet;

use super::value_object::{ConnectionId, MessageText, RoomName, Username};

/// 接続中クライアントの身元（ID と表示名）
///
/// Presence Registry が唯一の所有者。Room Registry は ID のみを参照する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ConnectionId,
    pub username: Username,
}

impl Participant {
    pub fn new(id: ConnectionId, username: Username) -> Self {
        Self { id, username }
    }
}

/// 名前付きのメンバー集合
///
/// メンバーが 0 人の Room は存在しない（Room Registry が即座に削除する）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub members: IndexSet<ConnectionId>,
}

impl Room {
    /// 作成者 1 人をメンバーとして Room を作成
    pub fn new(name: RoomName, creator: ConnectionId) -> Self {
        let mut members = IndexSet::new();
        members.insert(creator);
        Self { name, members }
    }

    pub fn is_member(&self, connection_id: &ConnectionId) -> bool {
        self.members.contains(connection_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_name: self.name.clone(),
            users: self.members.iter().cloned().collect(),
        }
    }
}

/// 送信用の Room のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_name: RoomName,
    pub users: Vec<ConnectionId>,
}

/// `leave_all` で離脱した Room ごとの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDeparture {
    pub room_name: RoomName,
    /// 離脱によってメンバーが 0 人になり Room が削除されたか
    pub room_deleted: bool,
}

/// 送信者
///
/// 参加者本人か、サーバー自身が発行するシステムメッセージか。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    Participant(Participant),
    System,
}

/// メッセージの宛先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// 全接続へのブロードキャスト
    Global,
    /// 特定の接続へのダイレクトメッセージ
    Direct(ConnectionId),
    /// Room のメンバー全員
    Room(RoomName),
}

/// タイムスタンプ付きのメッセージ
///
/// 構築後は不変。`date` と `time` は表示専用の文字列で、パース可能な時刻ではない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub sender: Sender,
    pub text: MessageText,
    pub recipient: Recipient,
    pub date: String,
    pub time: String,
}

/// 切断処理の結果
///
/// 同じ接続に対して 2 回目以降の切断処理を行った場合は、
/// `participant` が `None` で `departures` が空になる。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Disconnection {
    pub participant: Option<Participant>,
    pub departures: Vec<RoomDeparture>,
}
