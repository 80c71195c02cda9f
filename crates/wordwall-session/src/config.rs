//! Session configuration.

use std::time::Duration;

use wordwall_tally::Blocklist;

/// Configuration shared by the session manager and every session actor
/// it spawns. Built once at startup; cloned into each actor.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a session stays active after creation. Expiry is checked
    /// lazily on every access, with a best-effort scheduled closer as a
    /// secondary guarantee.
    ///
    /// Default: 30 minutes.
    pub ttl: Duration,

    /// Minimum time between two accepted submissions from the same
    /// player (a per-player leaky-bucket-of-one, not a global limit).
    ///
    /// Default: 800 milliseconds.
    pub min_submit_interval: Duration,

    /// Player names are trimmed and truncated to this many characters
    /// before the uniqueness check.
    ///
    /// Default: 24.
    pub max_name_len: usize,

    /// How many candidate codes `SessionManager::create` draws before
    /// giving up with `AllocationExhausted`.
    ///
    /// Default: 8.
    pub code_attempts: usize,

    /// Command mailbox size per session actor. Controls backpressure —
    /// a full mailbox makes senders wait.
    ///
    /// Default: 64.
    pub mailbox_size: usize,

    /// Words rejected regardless of who submits them.
    pub blocklist: Blocklist,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            min_submit_interval: Duration::from_millis(800),
            max_name_len: 24,
            code_attempts: 8,
            mailbox_size: 64,
            blocklist: Blocklist::default(),
        }
    }
}
