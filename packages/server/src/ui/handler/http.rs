//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use kaiwa_shared::time::to_rfc3339;

use crate::{
    domain::{RoomError, RoomName},
    infrastructure::dto::{
        http::StatusDto,
        websocket::{ParticipantDto, RoomDto},
    },
    ui::state::AppState,
};

/// Server status endpoint
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    let status = state.get_server_status_usecase.execute();

    Json(StatusDto {
        status: "server is running".to_string(),
        started: to_rfc3339(&status.started),
        uptime: status.uptime_seconds,
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms with their members
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomDto::from).collect())
}

/// Get the members of one room
pub async fn get_room_users(
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<RoomDto>, StatusCode> {
    // Room 名として不正な値に一致する Room は存在しない
    let room_name = RoomName::try_from(room_name).map_err(|_| StatusCode::NOT_FOUND)?;

    match state.get_rooms_usecase.users(&room_name).await {
        Ok(users) => Ok(Json(RoomDto {
            room_name: room_name.as_str().to_string(),
            users: users.iter().map(|id| id.as_str().to_string()).collect(),
        })),
        Err(RoomError::RoomNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!("Failed to get users of room '{}': {}", room_name, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get list of connected participants
pub async fn get_users(State(state): State<Arc<AppState>>) -> Json<Vec<ParticipantDto>> {
    let participants = state.get_participants_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(participants.iter().map(ParticipantDto::from).collect())
}
