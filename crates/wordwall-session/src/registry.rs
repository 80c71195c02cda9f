//! The player registry: identity and rate limiting within one session.
//!
//! Each session actor owns exactly one registry, so every method here is
//! implicitly session-scoped — a player id from another session is simply
//! unknown to this registry, and cross-session isolation needs no checks.
//!
//! # Concurrency note
//!
//! `PlayerRegistry` is NOT thread-safe by itself — plain `HashMap`s,
//! mutated only by the owning actor task. The rate-limit check and the
//! `last_submit_at` update are two separate calls, which is safe only
//! because the actor runs one command at a time; never call them from
//! concurrent contexts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use wordwall_protocol::PlayerId;

use crate::codegen::{constant_time_eq, generate_token};
use crate::error::SessionError;

/// Counter for process-unique player ids.
static NEXT_PLAYER_ID: AtomicU64 = AtomicU64::new(1);

/// One anonymous participant.
#[derive(Debug, Clone)]
pub struct Player {
    /// The player's id.
    pub id: PlayerId,
    /// Display name, unique within the session (case-sensitive).
    pub name: String,
    /// Bearer secret issued at join; required on every submission.
    pub token: String,
    /// When the player joined.
    pub joined_at: Instant,
    /// When the player's last submission was accepted. `None` until the
    /// first one.
    pub last_submit_at: Option<Instant>,
}

/// Tracks the players of one session.
pub struct PlayerRegistry {
    /// All players, keyed by id.
    players: HashMap<PlayerId, Player>,

    /// Index from name to player id, kept in sync with `players`.
    /// Enforces name uniqueness without scanning.
    names: HashMap<String, PlayerId>,

    /// Names are trimmed and truncated to this many characters before
    /// the uniqueness check.
    max_name_len: usize,

    /// Minimum spacing between a player's accepted submissions.
    min_submit_interval: Duration,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    pub fn new(max_name_len: usize, min_submit_interval: Duration) -> Self {
        Self {
            players: HashMap::new(),
            names: HashMap::new(),
            max_name_len,
            min_submit_interval,
        }
    }

    /// Admits a new player under the given name.
    ///
    /// The name is trimmed and truncated before validation, so two names
    /// that only differ past the cap collide.
    ///
    /// # Errors
    /// - [`SessionError::NameRequired`] — empty after trimming
    /// - [`SessionError::NameTaken`] — exact duplicate in this session
    pub fn join(&mut self, name: &str, now: Instant) -> Result<&Player, SessionError> {
        let name: String = name.trim().chars().take(self.max_name_len).collect();

        if name.is_empty() {
            return Err(SessionError::NameRequired);
        }
        if self.names.contains_key(&name) {
            return Err(SessionError::NameTaken);
        }

        let id = PlayerId(NEXT_PLAYER_ID.fetch_add(1, Ordering::Relaxed));
        let player = Player {
            id,
            name: name.clone(),
            token: generate_token(),
            joined_at: now,
            last_submit_at: None,
        };

        // Insert into both maps to keep them in sync.
        self.names.insert(name, id);
        self.players.insert(id, player);

        tracing::info!(player_id = %id, "player joined");

        Ok(self.players.get(&id).expect("just inserted"))
    }

    /// Verifies a player's bearer token.
    ///
    /// # Errors
    /// - [`SessionError::PlayerNotFound`] — no such player in this
    ///   session (including ids that belong to other sessions)
    /// - [`SessionError::InvalidToken`] — token mismatch (compared in
    ///   constant time)
    pub fn authenticate(
        &self,
        player_id: PlayerId,
        token: &str,
    ) -> Result<&Player, SessionError> {
        let player = self
            .players
            .get(&player_id)
            .ok_or(SessionError::PlayerNotFound(player_id))?;

        if !constant_time_eq(&player.token, token) {
            return Err(SessionError::InvalidToken);
        }

        Ok(player)
    }

    /// Returns `true` if the player may submit at `now`: either they
    /// never submitted, or their interval has fully elapsed.
    ///
    /// Unknown players can't submit. Callers authenticate first, so that
    /// case never decides a request.
    pub fn can_submit(&self, player_id: PlayerId, now: Instant) -> bool {
        match self.players.get(&player_id) {
            Some(player) => match player.last_submit_at {
                None => true,
                Some(last) => now.duration_since(last) >= self.min_submit_interval,
            },
            None => false,
        }
    }

    /// Marks an accepted submission at `now`, starting the player's next
    /// rate-limit window.
    pub fn record_submit(&mut self, player_id: PlayerId, now: Instant) {
        if let Some(player) = self.players.get_mut(&player_id) {
            player.last_submit_at = Some(now);
        }
    }

    /// Looks up a player by id.
    pub fn get(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.get(player_id)
    }

    /// Number of players who have joined.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if nobody has joined yet.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
