//! WebSocket connection handlers.
//!
//! 1 接続につき、受信ループ（クライアントイベントをユースケースへ振り分け）と
//! 送信ループ（MessagePusher が積んだ JSON を WebSocket へ書き出し）の 2 タスクを動かす。
//! クライアントイベントはイベントシーケンサーを保持したまま 1 件ずつ処理する。
//! 送信ループが先に終わっても、受け取ったイベントは最後まで処理してから切断する。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{Stream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, ConnectionIdFactory, MessageText, Notification, PusherChannel, Recipient,
        RoomName, ValueObjectError,
    },
    infrastructure::dto::{
        conversion::request_rejection_reason,
        websocket::{ClientEvent, MALFORMED_EVENT_REASON, ServerEvent},
    },
    ui::state::AppState,
};

/// クライアントイベントを値オブジェクトに変換したリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClientRequest {
    /// 表示名の検証は Presence Registry が行い、拒否理由を返す
    Rename(String),
    SendMessage {
        recipient: Recipient,
        text: MessageText,
    },
    CreateRoom(RoomName),
    JoinRoom(RoomName),
    LeaveRoom(RoomName),
}

impl TryFrom<ClientEvent> for ClientRequest {
    type Error = ValueObjectError;

    fn try_from(event: ClientEvent) -> Result<Self, Self::Error> {
        let request = match event {
            ClientEvent::UsernameUpdate { username } => Self::Rename(username),
            ClientEvent::GlobalMessage { text } => Self::SendMessage {
                recipient: Recipient::Global,
                text: text.try_into()?,
            },
            ClientEvent::PrivateMessage { recipient_id, text } => Self::SendMessage {
                recipient: Recipient::Direct(recipient_id.try_into()?),
                text: text.try_into()?,
            },
            ClientEvent::RoomMessage { room_name, text } => Self::SendMessage {
                recipient: Recipient::Room(room_name.try_into()?),
                text: text.try_into()?,
            },
            ClientEvent::CreateRoom { room_name } => Self::CreateRoom(room_name.try_into()?),
            ClientEvent::JoinRoom { room_name } => Self::JoinRoom(room_name.try_into()?),
            ClientEvent::LeaveRoom { room_name } => Self::LeaveRoom(room_name.try_into()?),
        };
        Ok(request)
    }
}

/// テキストフレームをリクエストに変換し、失敗した場合は拒否理由を返す
fn parse_request(text: &str) -> Result<ClientRequest, &'static str> {
    let event = serde_json::from_str::<ClientEvent>(text).map_err(|e| {
        tracing::debug!("Failed to parse client event: {}", e);
        MALFORMED_EVENT_REASON
    })?;
    ClientRequest::try_from(event).map_err(|e| {
        tracing::debug!("Invalid client event: {}", e);
        request_rejection_reason(&e)
    })
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, StatusCode> {
    // トランスポートが接続 ID を発行する
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to generate connection id: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver filled by the MessagePusher
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (tx, rx) = mpsc::unbounded_channel();

    // 身元の割り当てと `user` / `users` の送信
    let connected = {
        let _sequencer = state.sequencer.lock().await;
        state
            .connect_participant_usecase
            .execute(connection_id.clone(), tx.clone())
            .await
    };
    let participant = match connected {
        Ok(participant) => participant,
        Err(e) => {
            tracing::warn!("Failed to connect '{}': {}", connection_id, e);
            return;
        }
    };
    tracing::info!(
        "Client '{}' connected as '{}'",
        connection_id,
        participant.username
    );

    let (sender, receiver) = socket.split();

    // Spawn a task to write pushed notifications to this client
    let mut send_task = pusher_loop(rx, sender);

    // 送信タスクが先に終わった場合も、処理中のイベントは最後まで実行してから抜ける
    let writer_closed = async {
        let _ = (&mut send_task).await;
    };
    receive_loop(&state, &connection_id, &tx, receiver, writer_closed).await;
    send_task.abort();

    let (disconnected, remaining) = {
        let _sequencer = state.sequencer.lock().await;
        let disconnected = state
            .disconnect_participant_usecase
            .execute(connection_id.clone())
            .await;
        let remaining = state
            .disconnect_participant_usecase
            .count_remaining_participants()
            .await;
        (disconnected, remaining)
    };

    match disconnected {
        Ok(disconnection) => tracing::info!(
            "Client '{}' disconnected, left {} room(s), {} participant(s) remain",
            connection_id,
            disconnection.departures.len(),
            remaining
        ),
        Err(e) => tracing::warn!("Failed to disconnect '{}': {}", connection_id, e),
    }
}

/// クライアントからのフレームを順に処理する
///
/// `writer_closed` は次のフレームを待っている間だけ監視する。
/// 受け取ったフレームの処理は中断されない。
async fn receive_loop<S, W>(
    state: &AppState,
    connection_id: &ConnectionId,
    tx: &PusherChannel,
    mut receiver: S,
    writer_closed: W,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
    W: Future<Output = ()>,
{
    tokio::pin!(writer_closed);

    loop {
        let next = tokio::select! {
            biased;
            next = receiver.next() => next,
            _ = &mut writer_closed => {
                tracing::debug!("Writer for '{}' closed", connection_id);
                break;
            }
        };

        let msg = match next {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received from '{}': {}", connection_id, text.as_str());
                handle_text(state, connection_id, tx, text.as_str()).await;
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", connection_id);
                break;
            }
            _ => {}
        }
    }
}

/// 1 件のテキストフレームを処理
async fn handle_text(
    state: &AppState,
    connection_id: &ConnectionId,
    tx: &PusherChannel,
    text: &str,
) {
    let request = match parse_request(text) {
        Ok(request) => request,
        Err(reason) => {
            reject_request(connection_id, tx, reason);
            return;
        }
    };

    let _sequencer = state.sequencer.lock().await;
    dispatch(state, connection_id.clone(), request).await;
}

/// 変換できなかったイベントを本人に拒否として返す
fn reject_request(connection_id: &ConnectionId, tx: &PusherChannel, reason: &str) {
    let event = ServerEvent::from(&Notification::RequestRejected(reason.to_string()));
    match serde_json::to_string(&event) {
        Ok(json) => {
            if let Err(e) = tx.send(json) {
                tracing::warn!("Failed to reject request from '{}': {}", connection_id, e);
            }
        }
        Err(e) => tracing::warn!("Failed to encode rejection: {}", e),
    }
}

/// リクエストを対応するユースケースに振り分ける
///
/// 状態の競合による拒否はユースケースが本人に通知済みのため、ここではログのみ残す。
async fn dispatch(state: &AppState, connection_id: ConnectionId, request: ClientRequest) {
    match request {
        ClientRequest::Rename(username) => {
            if let Err(rejection) = state
                .rename_participant_usecase
                .execute(connection_id, &username)
                .await
            {
                tracing::debug!("Rename rejected: {}", rejection);
            }
        }
        ClientRequest::SendMessage { recipient, text } => {
            if let Err(e) = state
                .send_message_usecase
                .execute(connection_id, recipient, text)
                .await
            {
                tracing::debug!("Message not sent: {}", e);
            }
        }
        ClientRequest::CreateRoom(room_name) => {
            if let Err(e) = state
                .create_room_usecase
                .execute(connection_id, room_name)
                .await
            {
                tracing::debug!("Room not created: {}", e);
            }
        }
        ClientRequest::JoinRoom(room_name) => {
            if let Err(e) = state.join_room_usecase.execute(connection_id, room_name).await {
                tracing::debug!("Room not joined: {}", e);
            }
        }
        ClientRequest::LeaveRoom(room_name) => {
            if let Err(e) = state
                .leave_room_usecase
                .execute(connection_id, room_name)
                .await
            {
                tracing::debug!("Room not left: {}", e);
            }
        }
    }
}
