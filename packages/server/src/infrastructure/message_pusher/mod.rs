//! MessagePusher 実装
//!
//! 接続ごとの送信チャンネルと、Room 単位のブロードキャストグループを管理する。

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
