//! Session records: the data structures that represent one voting round.
//!
//! A session tracks:
//! - HOW players find it (the 6-character `code`)
//! - WHO controls it (the `host_token` bearer secret)
//! - WHAT state it's in (`Active` or `Closed`)
//! - WHEN it stops accepting input (`expires_at = created_at + TTL`)

use std::time::{Duration, Instant};

use wordwall_protocol::{PlayerId, SessionId, SessionStatus};

/// One hosted voting round.
///
/// Created by the session manager; owned by the session's actor for the
/// rest of its life. The status transition is one-way: once `Closed`,
/// nothing reopens the session.
#[derive(Debug, Clone)]
pub struct Session {
    /// This session's id.
    pub id: SessionId,

    /// The display code players type to join. Canonical form is
    /// uppercase; uniqueness among live sessions is the manager's job.
    pub code: String,

    /// The host's bearer secret. Returned exactly once at creation;
    /// required to close or resume the session.
    pub host_token: String,

    /// Current lifecycle status.
    pub status: SessionStatus,

    /// When the session was created.
    pub created_at: Instant,

    /// When the session stops accepting input. Fixed at creation
    /// (`created_at + ttl`); never extended.
    pub expires_at: Instant,
}

impl Session {
    /// Creates a new active session expiring `ttl` after `now`.
    pub fn new(
        id: SessionId,
        code: String,
        host_token: String,
        now: Instant,
        ttl: Duration,
    ) -> Self {
        Self {
            id,
            code,
            host_token,
            status: SessionStatus::Active,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// The lazy expiry predicate: returns the session's effective status
    /// at `now`, transitioning to `Closed` if the TTL has passed.
    ///
    /// This runs at the top of every operation that reads or mutates
    /// live state. The scheduled closer is only a secondary guarantee —
    /// no code path may assume it has already fired.
    pub fn close_if_expired(&mut self, now: Instant) -> SessionStatus {
        if self.status == SessionStatus::Closed {
            return SessionStatus::Closed;
        }

        if now >= self.expires_at {
            self.status = SessionStatus::Closed;
            tracing::info!(session_id = %self.id, code = %self.code, "session expired");
            return SessionStatus::Closed;
        }

        SessionStatus::Active
    }

    /// Transitions to `Closed`. No-op when already closed.
    pub fn close(&mut self) {
        self.status = SessionStatus::Closed;
    }
}

/// An append-only audit record of one accepted submission.
///
/// Retained by the owning session's actor for the session's lifetime;
/// the ranking path never reads it.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Who submitted.
    pub player_id: PlayerId,
    /// The raw text as typed (trimmed).
    pub raw: String,
    /// The normalized word that was tallied.
    pub word: String,
    /// When the submission was accepted.
    pub submitted_at: Instant,
}

// =========================================================================
// Tests
// =========================================================================
