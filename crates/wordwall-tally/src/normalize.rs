//! Canonicalization of raw player input into tally keys.
//!
//! Two different players typing `" Hello!"` and `"hello"` mean the same
//! vote, so both must map to the same key. [`normalize`] is the single
//! place that mapping is defined; everything downstream (tally keys,
//! blocklist entries, dedup) relies on it being pure and idempotent.

use std::collections::HashSet;

/// Maximum length of a normalized word, in characters.
///
/// Truncation bounds per-key storage and keeps pathological input (a
/// 10 kB paste) from becoming a tally entry.
pub const MAX_WORD_LEN: usize = 24;

/// Reasons a submitted word is rejected before it reaches the tally.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WordError {
    /// Nothing survived normalization — the input was empty, whitespace,
    /// or consisted entirely of stripped characters.
    #[error("word is empty after normalization")]
    Empty,

    /// The normalized word matches the blocklist.
    #[error("word is not allowed")]
    Blocked,
}

/// Collapses raw input to its canonical tally key.
///
/// Trims whitespace, lowercases, strips every character outside
/// `[a-z0-9\-']`, and truncates to [`MAX_WORD_LEN`] characters. Returns
/// `""` when nothing survives.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)` for all inputs.
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '-' | '\''))
        .take(MAX_WORD_LEN)
        .collect()
}

// ---------------------------------------------------------------------------
// Blocklist
// ---------------------------------------------------------------------------

/// A static set of disallowed words.
///
/// Built once at startup and never mutated — sessions share it as
/// immutable configuration. Entries are normalized on construction, so
/// lookups are exact matches on already-normalized input and therefore
/// case-insensitive by construction.
#[derive(Debug, Clone)]
pub struct Blocklist {
    words: HashSet<String>,
}

impl Blocklist {
    /// Builds a blocklist from raw entries, normalizing each one.
    /// Entries that normalize to `""` are dropped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = entries
            .into_iter()
            .map(|entry| normalize(entry.as_ref()))
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    /// An empty blocklist (everything passes screening).
    pub fn empty() -> Self {
        Self { words: HashSet::new() }
    }

    /// Returns `true` if the given *normalized* word is disallowed.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Normalizes raw input and screens it in one step.
    ///
    /// This is the path every submission takes: the returned string is
    /// guaranteed non-empty, within [`MAX_WORD_LEN`], and not blocked.
    ///
    /// # Errors
    /// - [`WordError::Empty`] — nothing survived normalization
    /// - [`WordError::Blocked`] — the word is on the blocklist
    pub fn screen(&self, raw: &str) -> Result<String, WordError> {
        let word = normalize(raw);
        if word.is_empty() {
            return Err(WordError::Empty);
        }
        if self.contains(&word) {
            return Err(WordError::Blocked);
        }
        Ok(word)
    }

    /// Number of blocked words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if no words are blocked.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Blocklist {
    /// The stock moderation set.
    fn default() -> Self {
        Self::new(["hate", "slur"])
    }
}

// =========================================================================
// Tests
// =========================================================================
