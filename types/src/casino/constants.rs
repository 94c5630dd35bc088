use super::Chips;

/// Fixed key the ledger record is persisted under.
pub const STORAGE_KEY: &str = "casino_state_v1";

/// Bankroll granted to a fresh ledger.
pub const STARTING_BANKROLL: Chips = Chips::from_whole(1_000);

/// Maximum number of leaderboard entries retained.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Maximum name length for player identity
pub const MAX_NAME_LENGTH: usize = 32;
