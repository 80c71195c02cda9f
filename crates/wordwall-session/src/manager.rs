//! The session manager: allocates codes and tracks every live session.
//!
//! This is the entry point for session operations from the service
//! layer. It's responsible for:
//! - Allocating unique display codes (bounded retry)
//! - Spawning one actor per session
//! - Routing lookups by id or by typed code
//! - Retiring sessions and freeing their codes
//!
//! # Concurrency note
//!
//! `SessionManager` is NOT thread-safe by itself — it uses plain
//! `HashMap`s, not concurrent ones. The service layer wraps it in a
//! mutex held only for lookups and inserts; all per-session work goes
//! through the cloned [`SessionHandle`]s, so no submission ever waits on
//! another session's traffic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use wordwall_protocol::{CreatedSession, SessionId};

use crate::actor::spawn_session;
use crate::codegen::{generate_code, generate_token};
use crate::{Session, SessionConfig, SessionError, SessionHandle};

/// Counter for process-unique session ids.
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Manages all currently-known sessions.
///
/// ## Lifecycle
///
/// ```text
/// create() ──→ [actor running, code reserved]
///                  │
///                  │ host close / TTL expiry (actor-internal)
///                  ▼
///              [closed, still answering snapshots]
///                  │
///                  ▼ remove()
///              [actor stopped, code free for reuse]
/// ```
pub struct SessionManager {
    /// All live sessions, keyed by session id.
    sessions: HashMap<SessionId, SessionHandle>,

    /// Index from display code to session id, kept in sync with
    /// `sessions`. A code maps to at most one session, so lookups never
    /// disambiguate; a code frees up only on `remove`.
    codes: HashMap<String, SessionId>,

    /// Configuration shared with every spawned actor.
    config: SessionConfig,
}

impl SessionManager {
    /// Creates a new, empty session manager with the given config.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            codes: HashMap::new(),
            config,
        }
    }

    /// Opens a new session: draws codes until one is free (bounded by
    /// `config.code_attempts`), mints the host token, and spawns the
    /// session actor.
    ///
    /// Must run inside a Tokio runtime (it spawns the actor task).
    ///
    /// # Errors
    /// Returns [`SessionError::AllocationExhausted`] if every attempt
    /// collided — with a 32^6 code space this signals something is very
    /// wrong, and the caller should surface it, not retry.
    pub fn create(&mut self) -> Result<CreatedSession, SessionError> {
        for _ in 0..self.config.code_attempts {
            let code = generate_code();
            if self.codes.contains_key(&code) {
                continue;
            }

            let session_id =
                SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed));
            let host_token = generate_token();
            let session = Session::new(
                session_id,
                code.clone(),
                host_token.clone(),
                Instant::now(),
                self.config.ttl,
            );

            let handle = spawn_session(session, self.config.clone());

            // Insert into both maps to keep them in sync.
            self.codes.insert(code.clone(), session_id);
            self.sessions.insert(session_id, handle);

            tracing::info!(%session_id, code, "session created");

            return Ok(CreatedSession { session_id, code, host_token });
        }

        tracing::error!(
            attempts = self.config.code_attempts,
            "session code allocation exhausted"
        );
        Err(SessionError::AllocationExhausted)
    }

    /// Looks up a session by id.
    pub fn get(&self, session_id: &SessionId) -> Option<&SessionHandle> {
        self.sessions.get(session_id)
    }

    /// Looks up a session by typed code.
    ///
    /// Codes arrive as typed by humans; the lookup canonicalizes
    /// (trim + uppercase) so `" abc234 "` finds `ABC234`.
    pub fn get_by_code(&self, code: &str) -> Option<&SessionHandle> {
        let code = code.trim().to_uppercase();
        let session_id = self.codes.get(&code)?;
        self.sessions.get(session_id)
    }

    /// Retires a session: stops its actor and frees its code.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if no such session exists.
    pub async fn remove(
        &mut self,
        session_id: SessionId,
    ) -> Result<(), SessionError> {
        let handle = self
            .sessions
            .remove(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        self.codes.remove(handle.code());
        let _ = handle.shutdown().await;

        tracing::info!(%session_id, "session removed");
        Ok(())
    }

    /// The configuration sessions are spawned with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of currently-known sessions (active or closed).
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if there are no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Lists all currently-known session ids.
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }
}
