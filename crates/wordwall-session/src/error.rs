//! Error types for the session layer.

use wordwall_protocol::{PlayerId, SessionId};
use wordwall_tally::WordError;

/// Errors that can occur during session operations.
///
/// These cover the full lifecycle: code allocation, joining, submitting,
/// closing, and talking to a session's actor. Authorization failures stay
/// deliberately vague — the message never says which check failed.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session a player tried to join doesn't exist or is no longer
    /// active. Joins don't distinguish the two cases.
    #[error("session not available")]
    Unavailable,

    /// The player name was empty after trimming.
    #[error("player name required")]
    NameRequired,

    /// Another player in the same session already holds this exact name.
    #[error("player name already taken")]
    NameTaken,

    /// The session is closed (explicitly or by TTL expiry); submissions
    /// are rejected.
    #[error("session closed")]
    Closed,

    /// The session does not exist.
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// The host token doesn't authorize this operation.
    #[error("unauthorized")]
    Unauthorized,

    /// No player with this id belongs to the session.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// The player token doesn't match what was issued at join.
    #[error("invalid player token")]
    InvalidToken,

    /// The player submitted again before their interval elapsed.
    /// Transient — the caller may retry after the interval.
    #[error("submitting too fast, try again shortly")]
    RateLimited,

    /// No free session code was found within the retry bound. Indicates
    /// collision-space exhaustion; surfaced as a hard failure.
    #[error("could not allocate a session code")]
    AllocationExhausted,

    /// The session's actor is gone (shut down or crashed); its mailbox
    /// no longer accepts commands.
    #[error("session {0} is unavailable")]
    Disconnected(SessionId),

    /// The submitted word failed normalization or blocklist screening.
    #[error(transparent)]
    Word(#[from] WordError),
}
