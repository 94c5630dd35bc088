//! Game state machines.
//!
//! Each machine composes the shared ledger with its own deck, table, or
//! reels plus the settlement calculator, and follows one betting
//! contract: chips are debited at stake time, any later credit is an
//! explicit addition, and a control invoked outside its valid phase set
//! is a silent no-op that mutates nothing.

pub mod blackjack;
pub mod hilo;
#[cfg(test)]
mod integration_tests;
pub mod roulette;
pub mod slots;
pub mod video_poker;

use greenfelt_types::casino::Chips;

use crate::ledger::{LedgerError, SharedLedger};

/// Status line shown while bets may be placed before a deal.
pub const PLACE_BETS_DEAL: &str = "PLACE BETS THEN DEAL";
/// Status line shown while bets may be placed before a spin.
pub const PLACE_BETS_SPIN: &str = "PLACE BETS THEN SPIN";
/// Status line for a rejected stake.
pub const INSUFFICIENT_BANKROLL: &str = "INSUFFICIENT BANKROLL";
/// Status line while a spin is in flight.
pub const SPINNING: &str = "SPINNING...";

/// Debit a stake from the ledger.
pub(crate) fn stake(ledger: &SharedLedger, amount: Chips) -> Result<(), LedgerError> {
    ledger.borrow_mut().try_stake(amount)
}

/// Credit a payout or returned wager. Zero credits are skipped so they
/// neither persist nor notify.
pub(crate) fn credit(ledger: &SharedLedger, amount: Chips) {
    if amount > Chips::ZERO {
        ledger.borrow_mut().credit(amount);
    }
}

/// `ROUND OVER :: <message> :: <place-bets prompt>`.
pub(crate) fn round_over(message: &str, prompt: &str) -> String {
    format!("ROUND OVER :: {message} :: {prompt}")
}
