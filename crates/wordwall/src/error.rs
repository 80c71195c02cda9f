//! Unified error type for the Word Wall core.

use wordwall_protocol::ProtocolError;
use wordwall_session::SessionError;
use wordwall_tally::WordError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `wordwall` meta-crate, callers deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attributes auto-generate `From` impls, so `?` converts
/// sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum WordWallError {
    /// A session-level error (availability, credentials, rate limit,
    /// code allocation).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A word-level error (empty after normalization, blocked).
    #[error(transparent)]
    Word(#[from] WordError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
