//! Public value types for Word Wall.
//!
//! This crate defines the shapes that cross the core's boundary:
//!
//! - **Types** ([`SessionSnapshot`], [`CreatedSession`], [`PlayerTicket`],
//!   etc.) — the request/response values of the public operations.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how collaborators that
//!   sit outside the core (a push transport, the word-cloud renderer)
//!   read those values as bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits below everything else and knows nothing about
//! sessions or tallies — it only defines values and how to serialize them.
//!
//! ```text
//! Service (operations) → Session (state) → Protocol (values)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    CreatedSession, HostResume, PlayerId, PlayerResume, PlayerTicket,
    SessionId, SessionSnapshot, SessionStatus, WordCount,
};
