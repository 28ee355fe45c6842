//! Session extraction middleware.
//!
//! Room-scoped endpoints require a Bearer token previously issued by the
//! create or access endpoints. The extractor resolves the token to a room
//! id; handlers still check the token grants the room being addressed.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use uuid::Uuid;

use crate::AppState;

/// A live room session extracted from the request.
#[derive(Debug, Clone)]
pub struct RoomSession {
    /// The bearer token itself (needed to revoke on leave)
    pub token: String,
    /// The room this session grants access to
    pub room_id: Uuid,
}

impl RoomSession {
    /// Whether this session grants access to `room_id`.
    pub fn grants(&self, room_id: Uuid) -> bool {
        self.room_id == room_id
    }
}

impl FromRequestParts<AppState> for RoomSession {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        match auth_header {
            Some(header) if header.starts_with("Bearer ") => {
                let token = header.trim_start_matches("Bearer ").to_string();

                match state.sessions.room_for(&token) {
                    Some(room_id) => Ok(RoomSession { token, room_id }),
                    None => Err((StatusCode::UNAUTHORIZED, "Unknown or expired session")),
                }
            }
            Some(_) => Err((
                StatusCode::UNAUTHORIZED,
                "Invalid authorization header format",
            )),
            None => Err((StatusCode::UNAUTHORIZED, "Missing authorization header")),
        }
    }
}
