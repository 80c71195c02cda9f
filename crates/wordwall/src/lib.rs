//! # Word Wall
//!
//! Live word-voting sessions: a host opens a round identified by a short
//! code, anonymous players join and submit words, and the host reads a
//! ranked frequency snapshot that a word-cloud view can render directly.
//!
//! This meta-crate re-exports the whole core and adds the
//! [`WordWallService`] facade — the only type most callers need.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use wordwall::{SessionConfig, WordWallService};
//!
//! # async fn run() -> Result<(), wordwall::WordWallError> {
//! let service = WordWallService::new(SessionConfig::default());
//!
//! let created = service.create_session().await?;
//! let ticket = service.join_session(&created.code, "Ann").await?;
//! service
//!     .submit_word(
//!         ticket.session_id,
//!         ticket.player_id,
//!         &ticket.player_token,
//!         "Hello!",
//!     )
//!     .await?;
//!
//! let snapshot = service.snapshot(&created.code).await.unwrap();
//! assert_eq!(snapshot.words[0].word, "hello");
//! # Ok(())
//! # }
//! ```

mod error;
mod service;

pub use error::WordWallError;
pub use service::WordWallService;

pub use wordwall_protocol::{
    Codec, CreatedSession, HostResume, PlayerId, PlayerResume, PlayerTicket,
    ProtocolError, SessionId, SessionSnapshot, SessionStatus, WordCount,
};
#[cfg(feature = "json")]
pub use wordwall_protocol::JsonCodec;
pub use wordwall_session::{SessionConfig, SessionError};
pub use wordwall_tally::{Blocklist, WordError, normalize};
