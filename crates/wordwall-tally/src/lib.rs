//! Word normalization and frequency tallies for Word Wall.
//!
//! Two jobs live here:
//!
//! 1. **Normalization** — collapsing raw player input to a canonical
//!    tally key ([`normalize`]) and screening it against the static
//!    [`Blocklist`].
//! 2. **Counting** — the per-session [`WordTally`] that aggregates
//!    accepted submissions and produces a deterministic ranking.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session layer (above)  ← one WordTally per session actor
//!     ↕
//! Tally layer (this crate)  ← pure data, no I/O, no locking
//!     ↕
//! Protocol layer (below)  ← provides the WordCount value type
//! ```
//!
//! Nothing in this crate synchronizes: a tally is owned by exactly one
//! session actor, which serializes all writers.

mod normalize;
mod tally;

pub use normalize::{Blocklist, MAX_WORD_LEN, WordError, normalize};
pub use tally::WordTally;
