use serde::{Deserialize, Deserializer, Serialize};

use super::{Leaderboard, STARTING_BANKROLL};

/// On-disk shape of the ledger, stored under
/// [`STORAGE_KEY`](super::STORAGE_KEY). Field names are part of the
/// record format and must not change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Spendable balance. Lenient on read: anything that is not a JSON
    /// number deserializes as `None`, letting the loader decide between
    /// the default (unseeded) and a clamp (seeded).
    #[serde(default, deserialize_with = "lenient_number")]
    pub bankroll: Option<f64>,
    #[serde(default)]
    pub seeded: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub leaderboard: Leaderboard,
    #[serde(default, rename = "leaderboardWeekId")]
    pub leaderboard_week_id: String,
}

impl Default for LedgerRecord {
    fn default() -> Self {
        Self {
            bankroll: Some(STARTING_BANKROLL.to_f64()),
            seeded: false,
            username: String::new(),
            emoji: String::new(),
            leaderboard: Leaderboard::default(),
            leaderboard_week_id: String::new(),
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}
