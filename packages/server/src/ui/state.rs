//! Server state shared by every handler.

use std::sync::Arc;

use kaiwa_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    domain::{ChatRepository, MessagePusher, MessageRouter},
    usecase::{
        ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase,
        GetParticipantsUseCase, GetRoomsUseCase, GetServerStatusUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, RenameParticipantUseCase, SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// RenameParticipantUseCase（表示名変更のユースケース）
    pub rename_participant_usecase: Arc<RenameParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// CreateRoomUseCase（Room 作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（Room 参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（Room 離脱のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetParticipantsUseCase（参加者一覧取得のユースケース）
    pub get_participants_usecase: Arc<GetParticipantsUseCase>,
    /// GetServerStatusUseCase（サーバー状態取得のユースケース）
    pub get_server_status_usecase: Arc<GetServerStatusUseCase>,
    /// イベントシーケンサー
    ///
    /// クライアントイベントは 1 件ずつ、状態更新と通知が完了するまでこのロックを保持して処理する。
    pub sequencer: Mutex<()>,
}

impl AppState {
    /// Repository と MessagePusher から全ユースケースを組み立てる
    ///
    /// 起動時刻は `clock` の現在時刻として記録される。
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let router = Arc::new(MessageRouter::new(message_pusher.clone(), clock.clone()));

        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                router.clone(),
            )),
            rename_participant_usecase: Arc::new(RenameParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                router.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                router.clone(),
            )),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                router.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                router.clone(),
            )),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
                repository.clone(),
                message_pusher,
                router,
            )),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(repository.clone())),
            get_participants_usecase: Arc::new(GetParticipantsUseCase::new(repository)),
            get_server_status_usecase: Arc::new(GetServerStatusUseCase::new(clock)),
            sequencer: Mutex::new(()),
        }
    }
}
