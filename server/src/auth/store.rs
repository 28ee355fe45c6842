//! In-process session token store.
//!
//! Rooms are anonymous: a session is just a bearer token granting access to
//! one room, minted on create/access and revoked on leave. Tokens live in
//! process memory; restarting the server signs everyone out, which is
//! acceptable for this service.
//!
//! Clients that close the tab never call leave, so every token carries an
//! issue time: expired tokens stop resolving, and abandoned entries are
//! swept whenever a new session is issued.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long a session token stays valid.
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy)]
struct Session {
    room_id: Uuid,
    issued_at: Instant,
}

/// Maps bearer tokens to the room they grant access to.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    max_age: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_max_age(DEFAULT_MAX_AGE)
    }
}

impl SessionStore {
    /// Create a new shared session store with the default token lifetime.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a store whose tokens expire after `max_age`.
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            max_age,
        }
    }

    /// Mint a token granting access to `room_id`.
    ///
    /// Also sweeps expired entries, so the map stays bounded by the number
    /// of sessions issued within one lifetime window.
    pub fn issue(&self, room_id: Uuid) -> String {
        self.sessions
            .retain(|_, session| session.issued_at.elapsed() <= self.max_age);

        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                room_id,
                issued_at: Instant::now(),
            },
        );
        token
    }

    /// The room a token grants access to, if the token is live and unexpired.
    pub fn room_for(&self, token: &str) -> Option<Uuid> {
        let session = *self.sessions.get(token)?.value();
        if session.issued_at.elapsed() > self.max_age {
            return None;
        }
        Some(session.room_id)
    }

    /// Revoke a token. Revoking an unknown token is a no-op.
    pub fn revoke(&self, token: &str) {
        self.sessions.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_resolve() {
        let store = SessionStore::default();
        let room_id = Uuid::new_v4();

        let token = store.issue(room_id);
        assert_eq!(store.room_for(&token), Some(room_id));
    }

    #[test]
    fn tokens_are_unique() {
        let store = SessionStore::default();
        let room_id = Uuid::new_v4();

        let a = store.issue(room_id);
        let b = store.issue(room_id);
        assert_ne!(a, b);
    }

    #[test]
    fn revoke_removes_token() {
        let store = SessionStore::default();
        let token = store.issue(Uuid::new_v4());

        store.revoke(&token);
        assert_eq!(store.room_for(&token), None);

        // Revoking again is fine.
        store.revoke(&token);
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        let store = SessionStore::default();
        assert_eq!(store.room_for("nope"), None);
    }

    #[test]
    fn expired_token_stops_resolving() {
        let store = SessionStore::with_max_age(Duration::from_millis(1));
        let token = store.issue(Uuid::new_v4());

        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.room_for(&token), None);
    }

    #[test]
    fn abandoned_sessions_are_swept_on_issue() {
        let store = SessionStore::with_max_age(Duration::from_millis(1));
        let abandoned = store.issue(Uuid::new_v4());

        std::thread::sleep(Duration::from_millis(5));
        let _fresh = store.issue(Uuid::new_v4());

        // The stale entry is gone from the map, not just masked.
        assert!(!store.sessions.contains_key(&abandoned));
        assert_eq!(store.sessions.len(), 1);
    }

    #[test]
    fn unexpired_sessions_survive_the_sweep() {
        let store = SessionStore::default();
        let first = store.issue(Uuid::new_v4());
        let _second = store.issue(Uuid::new_v4());

        assert!(store.room_for(&first).is_some());
        assert_eq!(store.sessions.len(), 2);
    }
}
