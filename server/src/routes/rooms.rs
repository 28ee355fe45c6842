//! Room and sync endpoint routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tandem_engine::ChangeSet;

use crate::auth::RoomSession;
use crate::error::Result;
use crate::handlers::{
    handle_access_room, handle_create_room, handle_get_room, handle_leave_room, handle_sync,
    AccessRoomRequest, CreateRoomRequest, LeaveResponse, RoomSessionResponse, RoomState,
    SyncResponse,
};
use crate::AppState;

/// Create room routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", post(create_room))
        .route("/rooms/{name}", get(get_room))
        .route("/rooms/{name}/access", post(access_room))
        .route("/rooms/{name}/leave", post(leave_room))
        .route("/rooms/{name}/sync", post(sync))
}

/// POST /rooms - Create a room and open a session.
async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<RoomSessionResponse>> {
    let response = handle_create_room(&state.pool, &state.sessions, request).await?;
    Ok(Json(response))
}

/// GET /rooms/{name} - Current room state.
async fn get_room(
    State(state): State<AppState>,
    session: RoomSession,
    Path(name): Path<String>,
) -> Result<Json<RoomState>> {
    let response = handle_get_room(&state.pool, &session, &name).await?;
    Ok(Json(response))
}

/// POST /rooms/{name}/access - Name+password check, opens a session.
async fn access_room(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<AccessRoomRequest>,
) -> Result<Json<RoomSessionResponse>> {
    let response = handle_access_room(&state.pool, &state.sessions, &name, request).await?;
    Ok(Json(response))
}

/// POST /rooms/{name}/leave - Revoke the session token.
async fn leave_room(
    State(state): State<AppState>,
    session: RoomSession,
    Path(_name): Path<String>,
) -> Json<LeaveResponse> {
    Json(handle_leave_room(&state.sessions, &session))
}

/// POST /rooms/{name}/sync - Reconcile a change set into the room.
async fn sync(
    State(state): State<AppState>,
    session: RoomSession,
    Path(name): Path<String>,
    Json(changes): Json<ChangeSet>,
) -> Result<Json<SyncResponse>> {
    let response = handle_sync(&state.pool, &session, &name, changes).await?;
    Ok(Json(response))
}
