//! High score leaderboard
//!
//! Persisted under the `leaderboard` key as a JSON array of
//! `{ "score": .., "name": .. }` records, best first, at most ten long.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;
use crate::types::{DEFAULT_PLAYER_NAME, LEADERBOARD_CAPACITY, MAX_NAME_CHARS};

/// Storage key of the leaderboard record
pub const LEADERBOARD_KEY: &str = "leaderboard";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    pub name: String,
}

/// Trim a player name, cut it to 15 characters and replace a blank name with
/// the placeholder.
///
/// ```
/// use blockfall_core::sanitize_name;
///
/// assert_eq!(sanitize_name("  ada  "), "ada");
/// assert_eq!(sanitize_name("   "), "Anonymous");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_PLAYER_NAME.to_string();
    }
    trimmed.chars().take(MAX_NAME_CHARS).collect()
}

/// Ranked top scores, always sorted descending and capped
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<LeaderboardEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary entries: sorts, caps and sanitizes names
    pub fn from_entries(entries: Vec<LeaderboardEntry>) -> Self {
        let mut scores = Self { entries };
        scores.normalize();
        scores
    }

    /// Restore the ordering and size invariants on data from outside.
    /// The sort is stable so equal scores keep their stored order.
    pub fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_CAPACITY);
        for entry in &mut self.entries {
            entry.name = sanitize_name(&entry.name);
        }
    }

    /// Would `score` make the list? True while the list has free slots, or
    /// if it beats the last place.
    pub fn qualifies(&self, score: u32) -> bool {
        match self.entries.get(LEADERBOARD_CAPACITY - 1) {
            Some(last) => score > last.score,
            None => true,
        }
    }

    /// Insert a score below any equal scores and drop the overflow.
    /// Returns the 1-based rank achieved, `None` if it fell off the list.
    pub fn insert(&mut self, name: &str, score: u32) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        if pos >= LEADERBOARD_CAPACITY {
            return None;
        }

        self.entries.insert(
            pos,
            LeaderboardEntry {
                score,
                name: sanitize_name(name),
            },
        );
        self.entries.truncate(LEADERBOARD_CAPACITY);
        Some(pos + 1)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

/// Leaderboard bound to a persistence backend
#[derive(Debug)]
pub struct Leaderboard<S> {
    store: S,
    scores: HighScores,
}

impl<S: KeyValueStore> Leaderboard<S> {
    /// Load the persisted list. Missing or unreadable data yields an empty
    /// leaderboard.
    pub fn load(store: S) -> Self {
        let scores = read_scores(&store);
        Self { store, scores }
    }

    /// Re-read the persisted list
    pub fn reload(&mut self) {
        self.scores = read_scores(&self.store);
    }

    /// Reload and decide whether `score` earns a name prompt
    pub fn record_score_if_qualifying(&mut self, score: u32) -> bool {
        self.reload();
        self.scores.qualifies(score)
    }

    /// Insert `{name, score}` and persist the list.
    ///
    /// The in-memory list is updated even when the write fails; the error is
    /// returned so the host can report it.
    pub fn commit(&mut self, name: &str, score: u32) -> Result<Option<usize>> {
        self.reload();
        let rank = self.scores.insert(name, score);

        let json = serde_json::to_string(&self.scores).context("encode leaderboard")?;
        self.store
            .set(LEADERBOARD_KEY, &json)
            .context("save leaderboard")?;
        log::info!(
            "leaderboard saved ({} entries, rank {:?})",
            self.scores.len(),
            rank
        );
        Ok(rank)
    }

    pub fn top_entries(&self) -> &[LeaderboardEntry] {
        self.scores.entries()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.scores.top_score()
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

fn read_scores<S: KeyValueStore>(store: &S) -> HighScores {
    let json = match store.get(LEADERBOARD_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return HighScores::new(),
        Err(e) => {
            log::warn!("leaderboard unavailable, starting empty: {:#}", e);
            return HighScores::new();
        }
    };

    match serde_json::from_str::<Vec<LeaderboardEntry>>(&json) {
        Ok(entries) => HighScores::from_entries(entries),
        Err(e) => {
            log::warn!("ignoring corrupt leaderboard record: {}", e);
            HighScores::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn full_board() -> HighScores {
        let mut hs = HighScores::new();
        for i in 1..=10 {
            hs.insert(&format!("p{}", i), i * 100);
        }
        hs
    }

    #[test]
    fn test_sanitize_name_truncates_by_chars() {
        assert_eq!(sanitize_name("abcdefghijklmnopqrst"), "abcdefghijklmno");
        assert_eq!(sanitize_name("ççççççççççççççççç").chars().count(), 15);
        assert_eq!(sanitize_name(""), DEFAULT_PLAYER_NAME);
        assert_eq!(sanitize_name("\t\n"), DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_qualifies_with_free_slots() {
        let hs = HighScores::new();
        assert!(hs.qualifies(0));
        assert!(hs.qualifies(1));
    }

    #[test]
    fn test_qualifies_must_beat_tenth_place() {
        let hs = full_board();
        assert_eq!(hs.len(), 10);
        assert!(!hs.qualifies(100));
        assert!(hs.qualifies(101));
    }

    #[test]
    fn test_insert_ranks_and_caps() {
        let mut hs = full_board();
        assert_eq!(hs.insert("top", 5000), Some(1));
        assert_eq!(hs.len(), 10);
        assert_eq!(hs.top_score(), Some(5000));
        assert_eq!(hs.entries().last().map(|e| e.score), Some(200));
        assert_eq!(hs.insert("low", 50), None);
        assert_eq!(hs.len(), 10);
    }

    #[test]
    fn test_insert_places_ties_after_existing() {
        let mut hs = HighScores::new();
        hs.insert("first", 300);
        assert_eq!(hs.insert("second", 300), Some(2));
        assert_eq!(hs.entries()[0].name, "first");
    }

    #[test]
    fn test_load_normalizes_stored_data() {
        let json = r#"[{"score":5,"name":"a"},{"score":90,"name":"  b  "},{"score":40,"name":""}]"#;
        let board = Leaderboard::load(MemoryStore::new().with_record(LEADERBOARD_KEY, json));
        let scores: Vec<u32> = board.top_entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![90, 40, 5]);
        assert_eq!(board.top_entries()[0].name, "b");
        assert_eq!(board.top_entries()[1].name, DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_corrupt_record_is_treated_as_absent() {
        let store = MemoryStore::new().with_record(LEADERBOARD_KEY, "{not json");
        let mut board = Leaderboard::load(store);
        assert!(board.top_entries().is_empty());
        assert!(board.record_score_if_qualifying(0));
    }

    #[test]
    fn test_commit_persists_json_array() {
        let mut board = Leaderboard::load(MemoryStore::new());
        assert_eq!(board.commit("  zoe ", 700).unwrap(), Some(1));
        let saved = board.store().get(LEADERBOARD_KEY).unwrap().unwrap();
        assert_eq!(saved, r#"[{"score":700,"name":"zoe"}]"#);

        let reloaded = Leaderboard::load(board.store().clone());
        assert_eq!(reloaded.top_score(), Some(700));
    }
}
