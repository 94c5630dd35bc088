use serde::{Deserialize, Serialize};

use super::MAX_NAME_LENGTH;

/// Player identity shown beside leaderboard scores.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emoji: String,
}

impl Identity {
    /// Build an identity, truncating over-long names.
    pub fn new(name: &str, emoji: &str) -> Self {
        Self {
            name: name.chars().take(MAX_NAME_LENGTH).collect(),
            emoji: emoji.to_string(),
        }
    }
}
