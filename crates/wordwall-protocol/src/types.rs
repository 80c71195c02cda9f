//! Core value types for Word Wall's public surface.
//!
//! Everything a caller sends into or receives from the session service is
//! defined here: identities, session status, tally entries, and the
//! result shapes of the public operations. Field names serialize in
//! camelCase because the downstream consumers (the word-cloud renderer
//! and the join/host pages) speak that convention.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a voting session.
///
/// Newtype over `u64` so a session id can't be confused with a player id.
/// `#[serde(transparent)]` keeps the JSON representation a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// A unique identifier for a player within the process.
///
/// Players belong to exactly one session; the id alone is not a
/// credential — operations on a player also require their bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Session status
// ---------------------------------------------------------------------------

/// The lifecycle status of a session.
///
/// One-way state machine — a closed session never reopens:
///
/// ```text
/// Active ──(host close | TTL expiry)──→ Closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Accepting joins and submissions.
    Active,
    /// Terminal. Snapshots still answer, writes are rejected.
    Closed,
}

impl SessionStatus {
    /// Returns `true` if the session accepts joins and submissions.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tally entries
// ---------------------------------------------------------------------------

/// One ranked entry of a session's tally: a normalized word and how many
/// accepted submissions it has received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// The normalized word (lowercase, punctuation-stripped, ≤ 24 chars).
    pub word: String,
    /// Number of accepted submissions of this word in the session.
    pub count: u64,
}

// ---------------------------------------------------------------------------
// Operation results
// ---------------------------------------------------------------------------

/// Returned by `create_session`: everything the host needs to run and
/// later resume a session. The host token is shown exactly once — the
/// core never returns it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSession {
    /// The new session's id.
    pub session_id: SessionId,
    /// The 6-character display code players type to join.
    pub code: String,
    /// The host's bearer secret, required to close or resume the session.
    pub host_token: String,
}

/// Returned by `join_session`: the new player's identity and credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTicket {
    /// The session the player joined.
    pub session_id: SessionId,
    /// The player's id within that session.
    pub player_id: PlayerId,
    /// The player's bearer secret, required on every submission.
    pub player_token: String,
    /// The session code, echoed back in its canonical (uppercased) form.
    pub code: String,
}

/// Returned by `restore_host` when the token matches an active session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostResume {
    /// The session's display code.
    pub code: String,
}

/// Returned by `restore_player` when the credentials check out against an
/// active session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResume {
    /// The session's display code.
    pub code: String,
    /// The player's stored display name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A point-in-time read of one session: status, player count, and the
/// full ranking. This is the entire contract with the visualization
/// layer — it renders `words` in the given order and `top_word` as the
/// headline, performing no ranking of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// The session's id.
    pub id: SessionId,
    /// The session's display code.
    pub code: String,
    /// Current lifecycle status (lazy expiry already applied).
    pub status: SessionStatus,
    /// Number of players who have joined.
    pub player_count: usize,
    /// Full ranking: count descending, ties by ascending word.
    pub words: Vec<WordCount>,
    /// First entry of `words`, or `None` while the tally is empty.
    pub top_word: Option<WordCount>,
}

// =========================================================================
// Tests
// =========================================================================
