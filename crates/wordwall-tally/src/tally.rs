//! The per-session frequency tally.

use std::collections::HashMap;
use std::time::Instant;

use wordwall_protocol::WordCount;

/// One aggregate per normalized word.
#[derive(Debug, Clone)]
struct CountEntry {
    count: u64,
    updated_at: Instant,
}

/// The count-per-normalized-word structure for one session.
///
/// `record` is the single mutating entry point. A tally is owned by its
/// session actor, so increments are serialized by construction — there is
/// no read-check-then-write window for concurrent writers to race
/// through, and no lock to take.
///
/// Keys are assumed already normalized (see
/// [`Blocklist::screen`](crate::Blocklist::screen)); the tally itself
/// never transforms them.
#[derive(Debug, Default)]
pub struct WordTally {
    counts: HashMap<String, CountEntry>,
}

impl WordTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self { counts: HashMap::new() }
    }

    /// Increments the count for a normalized word, inserting it at 1 on
    /// first occurrence. Returns the new count.
    pub fn record(&mut self, word: &str, now: Instant) -> u64 {
        match self.counts.get_mut(word) {
            Some(entry) => {
                entry.count += 1;
                entry.updated_at = now;
                entry.count
            }
            None => {
                self.counts.insert(
                    word.to_owned(),
                    CountEntry { count: 1, updated_at: now },
                );
                1
            }
        }
    }

    /// Returns the full ranking: count descending, ties broken by
    /// ascending lexicographic word order.
    ///
    /// The ordering is total, so two calls with no intervening `record`
    /// return identical sequences.
    pub fn rank(&self) -> Vec<WordCount> {
        let mut words: Vec<WordCount> = self
            .counts
            .iter()
            .map(|(word, entry)| WordCount {
                word: word.clone(),
                count: entry.count,
            })
            .collect();
        words.sort_by(|a, b| {
            b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word))
        });
        words
    }

    /// Returns the highest-ranked entry, or `None` while the tally is
    /// empty.
    pub fn top(&self) -> Option<WordCount> {
        self.rank().into_iter().next()
    }

    /// Returns the count for one word (0 if never recorded).
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).map_or(0, |entry| entry.count)
    }

    /// When the given word was last incremented.
    pub fn updated_at(&self, word: &str) -> Option<Instant> {
        self.counts.get(word).map(|entry| entry.updated_at)
    }

    /// Number of distinct words recorded.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no words have been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
