//! Session lifecycle for Word Wall.
//!
//! This crate owns everything stateful about a voting round:
//!
//! 1. **Code allocation** — unique human-typeable codes and bearer
//!    tokens ([`codegen`], [`SessionManager`])
//! 2. **Session records** — status, TTL, and the lazy expiry predicate
//!    ([`Session`])
//! 3. **Player identity** — name uniqueness, tokens, per-player rate
//!    limiting ([`PlayerRegistry`])
//! 4. **The session actor** — one task per session serializing all of
//!    its mutations ([`SessionHandle`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Service layer (above)  ← public operations, scheduled expiry
//!     ↕
//! Session layer (this crate)  ← session state, players, actors
//!     ↕
//! Tally + Protocol layers (below)  ← word counting, value types
//! ```

mod actor;
pub mod codegen;
mod config;
mod error;
mod manager;
mod registry;
mod session;

pub use actor::SessionHandle;
pub use config::SessionConfig;
pub use error::SessionError;
pub use manager::SessionManager;
pub use registry::{Player, PlayerRegistry};
pub use session::{Session, Submission};
