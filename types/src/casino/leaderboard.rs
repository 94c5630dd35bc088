use serde::{Deserialize, Serialize};

use super::{Chips, LEADERBOARD_CAPACITY};

/// A single leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    pub score: Chips,
    #[serde(default)]
    pub ts: u64,
}

/// Weekly top-ten board, sorted by score descending with ties broken by
/// the more recent timestamp.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry (weekly rotation).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Insert an entry, keeping the board sorted and capped.
    pub fn add(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(b.ts.cmp(&a.ts)));
        self.entries.truncate(LEADERBOARD_CAPACITY);
    }
}
