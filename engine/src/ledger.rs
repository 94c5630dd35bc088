//! The shared bankroll ledger.
//!
//! One ledger instance lives for the whole session. Every game debits
//! stakes and credits payouts against it; each mutation is a single
//! synchronous critical section that persists write-through and then
//! broadcasts the new balance to subscribed display collaborators.
//! Persistence is best-effort: a failed read falls back to defaults and
//! a failed write is logged, never raised.

use std::cell::RefCell;
use std::rc::Rc;

use greenfelt_types::casino::{
    week_id, Chips, Identity, Leaderboard, LeaderboardEntry, LedgerRecord, STARTING_BANKROLL,
    STORAGE_KEY,
};
use thiserror::Error;
use tracing::warn;

use crate::clock::Clock;
use crate::storage::Storage;

/// Ledger handle shared across game machines. Play is single-threaded
/// and cooperative, so a `Rc<RefCell<_>>` models the session exactly.
pub type SharedLedger = Rc<RefCell<BankrollLedger>>;

/// Errors surfaced to game machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The stake exceeds the current balance. Nothing was debited.
    #[error("insufficient bankroll")]
    InsufficientBankroll,
}

type Listener = Box<dyn FnMut(Chips)>;

/// Process-wide bankroll, identity, and weekly leaderboard.
pub struct BankrollLedger {
    balance: Chips,
    identity: Identity,
    leaderboard: Leaderboard,
    week: String,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    listeners: Vec<Listener>,
}

impl BankrollLedger {
    /// Load the persisted record (or defaults), normalize it, rotate the
    /// weekly leaderboard if the week changed, mark it seeded, and write
    /// it back.
    pub fn load(storage: Box<dyn Storage>, clock: Box<dyn Clock>) -> Self {
        let record = storage
            .read()
            .and_then(|payload| match serde_json::from_str::<LedgerRecord>(&payload) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(key = STORAGE_KEY, %err, "corrupt ledger record, using defaults");
                    None
                }
            })
            .unwrap_or_default();

        // A corrupt balance resets to the default only before the first
        // seed; afterwards it clamps, so a legitimately low balance is
        // never erased.
        let seeded = record.seeded;
        let mut balance = match record.bankroll.and_then(Chips::from_f64) {
            Some(balance) => balance,
            None if seeded => Chips::ZERO,
            None => STARTING_BANKROLL,
        };
        if !seeded && balance.is_zero() {
            balance = STARTING_BANKROLL;
        }

        let mut leaderboard = record.leaderboard;
        let week = week_id(clock.now());
        if record.leaderboard_week_id != week {
            leaderboard.clear();
        }

        let mut ledger = Self {
            balance,
            identity: Identity {
                name: record.username,
                emoji: record.emoji,
            },
            leaderboard,
            week,
            storage,
            clock,
            listeners: Vec::new(),
        };
        ledger.persist();
        ledger
    }

    /// Load into the shared handle game machines take.
    pub fn shared(storage: Box<dyn Storage>, clock: Box<dyn Clock>) -> SharedLedger {
        Rc::new(RefCell::new(Self::load(storage, clock)))
    }

    pub fn balance(&self) -> Chips {
        self.balance
    }

    /// Overwrite the balance (already quantized and non-negative by
    /// construction), persist, and notify.
    pub fn set_balance(&mut self, amount: Chips) {
        self.balance = amount;
        self.persist();
        self.notify();
    }

    /// Debit a stake. Fails without mutation when the balance is short.
    pub fn try_stake(&mut self, amount: Chips) -> Result<(), LedgerError> {
        let remaining = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBankroll)?;
        self.set_balance(remaining);
        Ok(())
    }

    /// Credit a payout or a returned wager.
    pub fn credit(&mut self, amount: Chips) {
        self.set_balance(self.balance.saturating_add(amount));
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn set_identity(&mut self, name: &str, emoji: &str) {
        self.identity = Identity::new(name, emoji);
        self.persist();
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Record a score under the current identity, stamped with the
    /// current time.
    pub fn add_leaderboard_entry(&mut self, score: Chips) {
        self.leaderboard.add(LeaderboardEntry {
            name: self.identity.name.clone(),
            emoji: self.identity.emoji.clone(),
            score,
            ts: self.clock.now(),
        });
        self.persist();
    }

    /// The week id the current leaderboard belongs to.
    pub fn week(&self) -> &str {
        &self.week
    }

    /// Register a bankroll-changed listener (the display seam). The
    /// listener receives the new balance after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(Chips) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn record(&self) -> LedgerRecord {
        LedgerRecord {
            bankroll: Some(self.balance.to_f64()),
            seeded: true,
            username: self.identity.name.clone(),
            emoji: self.identity.emoji.clone(),
            leaderboard: self.leaderboard.clone(),
            leaderboard_week_id: self.week.clone(),
        }
    }

    /// Best-effort write-through; on failure the in-memory ledger stays
    /// authoritative for the rest of the session.
    fn persist(&mut self) {
        match serde_json::to_string(&self.record()) {
            Ok(payload) => {
                if !self.storage.write(&payload) {
                    warn!(key = STORAGE_KEY, "ledger record not persisted");
                }
            }
            Err(err) => warn!(key = STORAGE_KEY, %err, "ledger record not serializable"),
        }
    }

    fn notify(&mut self) {
        let balance = self.balance;
        for listener in &mut self.listeners {
            listener(balance);
        }
    }
}
