//! Room lifecycle handlers - create, access, fetch, leave.

use crate::auth::{RoomSession, SessionStore};
use crate::db;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tandem_engine::Item;

/// Request body for room creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    pub password: String,
}

/// Request body for accessing an existing room.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRoomRequest {
    pub password: String,
}

/// A room's client-visible state. Never includes the password.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomState {
    pub name: String,
    pub todos: Vec<Item>,
    pub revision: i64,
}

impl RoomState {
    fn from_stored(room: &db::StoredRoom) -> Result<Self> {
        Ok(Self {
            name: room.name.clone(),
            todos: room.todos()?,
            revision: room.revision,
        })
    }
}

/// Response for create and access: room state plus a session token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSessionResponse {
    pub room: RoomState,
    pub token: String,
}

/// Response for leaving a room.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveResponse {
    pub left: bool,
}

/// Create a room with an empty to-do list and open a session for it.
pub async fn handle_create_room(
    pool: &PgPool,
    sessions: &SessionStore,
    request: CreateRoomRequest,
) -> Result<RoomSessionResponse> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Room name is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::BadRequest("Room password is required".to_string()));
    }

    let room = match db::create_room(pool, name, &request.password).await {
        Ok(room) => room,
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::BadRequest(
                "A room with this name already exists".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(room = %room.name, "Room created");

    let token = sessions.issue(room.id);
    Ok(RoomSessionResponse {
        room: RoomState::from_stored(&room)?,
        token,
    })
}

/// Check name+password and open a session for the room.
pub async fn handle_access_room(
    pool: &PgPool,
    sessions: &SessionStore,
    name: &str,
    request: AccessRoomRequest,
) -> Result<RoomSessionResponse> {
    let room = db::find_room(pool, name).await?;

    // One generic message for both unknown room and wrong password.
    let room = match room {
        Some(room) if room.password == request.password => room,
        _ => {
            return Err(AppError::BadRequest(
                "Invalid room information".to_string(),
            ));
        }
    };

    let token = sessions.issue(room.id);
    Ok(RoomSessionResponse {
        room: RoomState::from_stored(&room)?,
        token,
    })
}

/// Current room state for an authenticated session.
pub async fn handle_get_room(
    pool: &PgPool,
    session: &RoomSession,
    name: &str,
) -> Result<RoomState> {
    let room = db::find_room(pool, name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {name} not found")))?;

    if !session.grants(room.id) {
        return Err(AppError::Unauthorized);
    }

    RoomState::from_stored(&room)
}

/// Revoke the caller's session token.
pub fn handle_leave_room(sessions: &SessionStore, session: &RoomSession) -> LeaveResponse {
    sessions.revoke(&session.token);
    LeaveResponse { left: true }
}
