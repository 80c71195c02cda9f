//! Session actor: an isolated Tokio task that owns one voting round.
//!
//! Each session runs in its own task, communicating with the outside
//! world through an mpsc channel. All mutations of a session's players,
//! tally, and submission log pass through this single task, which is what
//! makes the rate-limit check, the tally increment, and the audit append
//! one atomic unit per request — concurrent submissions of the same word
//! cannot lose an increment, and a player cannot race two requests
//! through the same rate-limit window. Distinct sessions run in parallel;
//! nothing here is shared between them.

use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use wordwall_protocol::{
    HostResume, PlayerId, PlayerResume, PlayerTicket, SessionId,
    SessionSnapshot,
};
use wordwall_tally::WordTally;

use crate::codegen::constant_time_eq;
use crate::{PlayerRegistry, Session, SessionConfig, SessionError, Submission};

/// Commands sent to a session actor through its mailbox.
///
/// Variants with a `oneshot::Sender` are request/reply; the rest are
/// fire-and-forget.
pub(crate) enum SessionCommand {
    /// Admit a player under the given name.
    Join {
        name: String,
        reply: oneshot::Sender<Result<PlayerTicket, SessionError>>,
    },

    /// Accept one word submission from an authenticated player.
    Submit {
        player_id: PlayerId,
        token: String,
        word: String,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },

    /// Close the session on the host's behalf.
    Close {
        host_token: String,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },

    /// Best-effort TTL expiry, sent by the scheduled closer. Idempotent.
    Expire,

    /// Resume a host page: return the code if the token matches an
    /// active session.
    RestoreHost {
        host_token: String,
        reply: oneshot::Sender<Option<HostResume>>,
    },

    /// Resume a player page: return code and name if the credentials
    /// check out against an active session.
    RestorePlayer {
        player_id: PlayerId,
        token: String,
        reply: oneshot::Sender<Option<PlayerResume>>,
    },

    /// Read a consistent point-in-time snapshot.
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },

    /// Stop the actor (session retirement).
    Shutdown,
}

/// Handle to a running session actor. Cheap to clone — an
/// `mpsc::Sender` wrapper plus the immutable id and code.
///
/// The `SessionManager` holds one of these per session.
#[derive(Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    code: String,
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// The session's id.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The session's display code (canonical uppercase form).
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Admits a player. See [`PlayerRegistry::join`] for name rules.
    pub async fn join(&self, name: &str) -> Result<PlayerTicket, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Join {
                name: name.to_owned(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::Disconnected(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| SessionError::Disconnected(self.session_id))?
    }

    /// Submits one word on behalf of an authenticated player.
    pub async fn submit(
        &self,
        player_id: PlayerId,
        token: &str,
        word: &str,
    ) -> Result<(), SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Submit {
                player_id,
                token: token.to_owned(),
                word: word.to_owned(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::Disconnected(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| SessionError::Disconnected(self.session_id))?
    }

    /// Closes the session with the host's token. Idempotent.
    pub async fn close(&self, host_token: &str) -> Result<(), SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Close {
                host_token: host_token.to_owned(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::Disconnected(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| SessionError::Disconnected(self.session_id))?
    }

    /// Delivers the scheduled expiry signal (fire-and-forget).
    pub async fn expire(&self) -> Result<(), SessionError> {
        self.sender
            .send(SessionCommand::Expire)
            .await
            .map_err(|_| SessionError::Disconnected(self.session_id))
    }

    /// Attempts to resume the host's view. `None` on any failure.
    pub async fn restore_host(&self, host_token: &str) -> Option<HostResume> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::RestoreHost {
                host_token: host_token.to_owned(),
                reply: reply_tx,
            })
            .await
            .ok()?;
        reply_rx.await.ok()?
    }

    /// Attempts to resume a player's view. `None` on any failure.
    pub async fn restore_player(
        &self,
        player_id: PlayerId,
        token: &str,
    ) -> Option<PlayerResume> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::RestorePlayer {
                player_id,
                token: token.to_owned(),
                reply: reply_tx,
            })
            .await
            .ok()?;
        reply_rx.await.ok()?
    }

    /// Reads a consistent snapshot of status, player count, and ranking.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| SessionError::Disconnected(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| SessionError::Disconnected(self.session_id))
    }

    /// Tells the actor to stop.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.sender
            .send(SessionCommand::Shutdown)
            .await
            .map_err(|_| SessionError::Disconnected(self.session_id))
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct SessionActor {
    session: Session,
    players: PlayerRegistry,
    tally: WordTally,
    /// Append-only audit trail; never read by the ranking path.
    submissions: Vec<Submission>,
    config: SessionConfig,
    receiver: mpsc::Receiver<SessionCommand>,
}

impl SessionActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::debug!(session_id = %self.session.id, "session actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                SessionCommand::Join { name, reply } => {
                    let result = self.handle_join(&name);
                    let _ = reply.send(result);
                }
                SessionCommand::Submit {
                    player_id,
                    token,
                    word,
                    reply,
                } => {
                    let result = self.handle_submit(player_id, &token, &word);
                    let _ = reply.send(result);
                }
                SessionCommand::Close { host_token, reply } => {
                    let result = self.handle_close(&host_token);
                    let _ = reply.send(result);
                }
                SessionCommand::Expire => {
                    // The lazy check and this scheduled signal may race;
                    // both tolerate the session already being closed.
                    self.session.close_if_expired(Instant::now());
                }
                SessionCommand::RestoreHost { host_token, reply } => {
                    let _ = reply.send(self.handle_restore_host(&host_token));
                }
                SessionCommand::RestorePlayer {
                    player_id,
                    token,
                    reply,
                } => {
                    let _ =
                        reply.send(self.handle_restore_player(player_id, &token));
                }
                SessionCommand::Snapshot { reply } => {
                    let _ = reply.send(self.snapshot());
                }
                SessionCommand::Shutdown => {
                    tracing::debug!(
                        session_id = %self.session.id,
                        "session actor shutting down"
                    );
                    break;
                }
            }
        }

        tracing::debug!(session_id = %self.session.id, "session actor stopped");
    }

    fn handle_join(&mut self, name: &str) -> Result<PlayerTicket, SessionError> {
        let now = Instant::now();
        if !self.session.close_if_expired(now).is_active() {
            return Err(SessionError::Unavailable);
        }

        let player = self.players.join(name, now)?;

        Ok(PlayerTicket {
            session_id: self.session.id,
            player_id: player.id,
            player_token: player.token.clone(),
            code: self.session.code.clone(),
        })
    }

    /// The one mutating path. Every check runs before the commit point;
    /// after it, all three effects (audit record, tally increment,
    /// rate-limit stamp) apply — never a subset.
    fn handle_submit(
        &mut self,
        player_id: PlayerId,
        token: &str,
        raw: &str,
    ) -> Result<(), SessionError> {
        let now = Instant::now();
        if !self.session.close_if_expired(now).is_active() {
            return Err(SessionError::Closed);
        }

        self.players.authenticate(player_id, token)?;

        if !self.players.can_submit(player_id, now) {
            return Err(SessionError::RateLimited);
        }

        let word = self.config.blocklist.screen(raw)?;

        // Commit point.
        self.submissions.push(Submission {
            player_id,
            raw: raw.trim().to_owned(),
            word: word.clone(),
            submitted_at: now,
        });
        let count = self.tally.record(&word, now);
        self.players.record_submit(player_id, now);

        tracing::debug!(
            session_id = %self.session.id,
            %player_id,
            word,
            count,
            "word recorded"
        );

        Ok(())
    }

    fn handle_close(&mut self, host_token: &str) -> Result<(), SessionError> {
        if !constant_time_eq(&self.session.host_token, host_token) {
            return Err(SessionError::Unauthorized);
        }

        // Idempotent: closing a closed session is a no-op success.
        if self.session.status.is_active() {
            self.session.close();
            tracing::info!(
                session_id = %self.session.id,
                code = %self.session.code,
                players = self.players.len(),
                submissions = self.submissions.len(),
                "session closed by host"
            );
        }

        Ok(())
    }

    fn handle_restore_host(&mut self, host_token: &str) -> Option<HostResume> {
        if !constant_time_eq(&self.session.host_token, host_token) {
            return None;
        }
        if !self.session.close_if_expired(Instant::now()).is_active() {
            return None;
        }

        Some(HostResume { code: self.session.code.clone() })
    }

    fn handle_restore_player(
        &mut self,
        player_id: PlayerId,
        token: &str,
    ) -> Option<PlayerResume> {
        if !self.session.close_if_expired(Instant::now()).is_active() {
            return None;
        }

        let player = self.players.authenticate(player_id, token).ok()?;

        Some(PlayerResume {
            code: self.session.code.clone(),
            name: player.name.clone(),
        })
    }

    fn snapshot(&mut self) -> SessionSnapshot {
        // A snapshot is an access like any other: lazy expiry applies,
        // so a past-TTL session reports closed here even if the
        // scheduled closer never fired.
        let status = self.session.close_if_expired(Instant::now());
        let words = self.tally.rank();

        SessionSnapshot {
            id: self.session.id,
            code: self.session.code.clone(),
            status,
            player_count: self.players.len(),
            top_word: words.first().cloned(),
            words,
        }
    }
}

/// Spawns a new session actor task and returns a handle to it.
pub(crate) fn spawn_session(
    session: Session,
    config: SessionConfig,
) -> SessionHandle {
    let (tx, rx) = mpsc::channel(config.mailbox_size);

    let session_id = session.id;
    let code = session.code.clone();
    let players =
        PlayerRegistry::new(config.max_name_len, config.min_submit_interval);

    let actor = SessionActor {
        session,
        players,
        tally: WordTally::new(),
        submissions: Vec::new(),
        config,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    SessionHandle {
        session_id,
        code,
        sender: tx,
    }
}
