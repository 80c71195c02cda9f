//! `WordWallService`: the public operation surface of the core.
//!
//! This is the piece a transport or UI layer talks to. It ties together
//! code allocation, session actors, and the scheduled expiry closer, and
//! exposes exactly the operations of the session/submission/tally
//! subsystem: create, join, submit, close, restore, snapshot.

use std::sync::Arc;

use tokio::sync::Mutex;
use wordwall_protocol::{
    CreatedSession, HostResume, PlayerId, PlayerResume, PlayerTicket,
    SessionId, SessionSnapshot,
};
use wordwall_session::{
    SessionConfig, SessionError, SessionHandle, SessionManager,
};

use crate::WordWallError;

/// The session service.
///
/// Cheap to clone and share: all state lives behind an `Arc`. The inner
/// mutex guards only the session index — it is taken to look a handle
/// up and released before any actor is awaited, so sessions never
/// serialize against each other.
#[derive(Clone)]
pub struct WordWallService {
    sessions: Arc<Mutex<SessionManager>>,
}

impl WordWallService {
    /// Creates a service with the given configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(SessionManager::new(config))),
        }
    }

    /// Opens a new session and schedules its best-effort closer.
    ///
    /// The closer fires once, `ttl` after creation, and is only a
    /// secondary guarantee — every operation re-checks expiry on access,
    /// so a skipped or delayed closer never extends a session's life.
    ///
    /// # Errors
    /// [`SessionError::AllocationExhausted`] when no free code was found
    /// within the attempt bound.
    pub async fn create_session(&self) -> Result<CreatedSession, WordWallError> {
        let (created, handle, ttl) = {
            let mut sessions = self.sessions.lock().await;
            let created = sessions.create()?;
            let handle = sessions
                .get(&created.session_id)
                .cloned()
                .expect("just created this session");
            (created, handle, sessions.config().ttl)
        };

        tracing::debug!(
            session_id = %created.session_id,
            ttl_ms = ttl.as_millis() as u64,
            "expiry closer scheduled"
        );
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            // The session may already be closed or even removed; the
            // expiry signal is an idempotent no-op in both cases.
            let _ = handle.expire().await;
        });

        Ok(created)
    }

    /// Joins a player to the session with the typed code.
    ///
    /// # Errors
    /// - [`SessionError::Unavailable`] — unknown code, or the session is
    ///   closed/expired
    /// - [`SessionError::NameRequired`] / [`SessionError::NameTaken`]
    pub async fn join_session(
        &self,
        code: &str,
        name: &str,
    ) -> Result<PlayerTicket, WordWallError> {
        let handle = self
            .handle_by_code(code)
            .await
            .ok_or(SessionError::Unavailable)?;
        Ok(handle.join(name).await?)
    }

    /// Submits one word. All effects (audit record, tally increment,
    /// rate-limit stamp) apply atomically, or none do.
    ///
    /// # Errors
    /// - [`SessionError::Closed`] — unknown, closed, or expired session
    /// - [`SessionError::PlayerNotFound`] / [`SessionError::InvalidToken`]
    /// - [`SessionError::RateLimited`] — retry after the interval
    /// - [`WordError::Empty`](wordwall_tally::WordError::Empty) /
    ///   [`WordError::Blocked`](wordwall_tally::WordError::Blocked)
    pub async fn submit_word(
        &self,
        session_id: SessionId,
        player_id: PlayerId,
        player_token: &str,
        word: &str,
    ) -> Result<(), WordWallError> {
        let handle = self
            .handle_by_id(session_id)
            .await
            .ok_or(SessionError::Closed)?;
        Ok(handle.submit(player_id, player_token, word).await?)
    }

    /// Closes a session on the host's behalf. Idempotent once closed.
    ///
    /// # Errors
    /// - [`SessionError::NotFound`] — unknown session id
    /// - [`SessionError::Unauthorized`] — host token mismatch
    pub async fn close_session(
        &self,
        session_id: SessionId,
        host_token: &str,
    ) -> Result<(), WordWallError> {
        let handle = self
            .handle_by_id(session_id)
            .await
            .ok_or(SessionError::NotFound(session_id))?;
        Ok(handle.close(host_token).await?)
    }

    /// Resumes a host's view of their session.
    ///
    /// Returns `None` — never an error — when the session is gone,
    /// closed, expired, or the token doesn't match.
    pub async fn restore_host(
        &self,
        session_id: SessionId,
        host_token: &str,
    ) -> Option<HostResume> {
        self.handle_by_id(session_id)
            .await?
            .restore_host(host_token)
            .await
    }

    /// Resumes a player's view of their session.
    ///
    /// Returns `None` — never an error — when the session is gone,
    /// closed, expired, or the credentials don't check out.
    pub async fn restore_player(
        &self,
        session_id: SessionId,
        player_id: PlayerId,
        player_token: &str,
    ) -> Option<PlayerResume> {
        self.handle_by_id(session_id)
            .await?
            .restore_player(player_id, player_token)
            .await
    }

    /// Reads a consistent snapshot of the session with the typed code:
    /// status, player count, full ranking, top word.
    ///
    /// Returns `None` when the code is unknown. Snapshots of closed
    /// sessions still answer (the display keeps rendering the final
    /// tally).
    pub async fn snapshot(&self, code: &str) -> Option<SessionSnapshot> {
        self.handle_by_code(code).await?.snapshot().await.ok()
    }

    /// Retires a session entirely: stops its actor and frees its code
    /// for reuse. Not part of the player/host flows — this is the
    /// operator-side cleanup hook.
    ///
    /// # Errors
    /// [`SessionError::NotFound`] if no such session exists.
    pub async fn retire_session(
        &self,
        session_id: SessionId,
    ) -> Result<(), WordWallError> {
        let mut sessions = self.sessions.lock().await;
        Ok(sessions.remove(session_id).await?)
    }

    /// Number of currently-known sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    async fn handle_by_id(&self, session_id: SessionId) -> Option<SessionHandle> {
        self.sessions.lock().await.get(&session_id).cloned()
    }

    async fn handle_by_code(&self, code: &str) -> Option<SessionHandle> {
        self.sessions.lock().await.get_by_code(code).cloned()
    }
}

impl Default for WordWallService {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
