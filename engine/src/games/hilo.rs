//! Hi-lo streak game.
//!
//! One card is revealed; each correct higher/lower call grows the streak
//! and the cash-out multiplier (x1 + streak). A tie pushes the wager
//! back, a wrong call loses everything.

use greenfelt_types::casino::{Chips, Multiplier};

use super::{credit, round_over, stake, INSUFFICIENT_BANKROLL, PLACE_BETS_DEAL};
use crate::cards::{Card, Deck};
use crate::ledger::SharedLedger;
use crate::rng::GameRng;
use crate::settlement::{self, Outcome};

/// Round phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dealt,
    RoundOver,
}

/// Player call on the next card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guess {
    High,
    Low,
}

pub struct HiLo {
    ledger: SharedLedger,
    rng: GameRng,
    deck: Deck,
    current: Option<Card>,
    wager: Chips,
    streak: u32,
    phase: Phase,
    status: String,
}

impl HiLo {
    pub fn new(ledger: SharedLedger, mut rng: GameRng) -> Self {
        let deck = Deck::shuffled(&mut rng);
        Self {
            ledger,
            rng,
            deck,
            current: None,
            wager: Chips::ZERO,
            streak: 0,
            phase: Phase::Idle,
            status: PLACE_BETS_DEAL.to_string(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn wager(&self) -> Chips {
        self.wager
    }

    pub fn current_card(&self) -> Option<Card> {
        self.current
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// The multiplier a cash-out would settle at.
    pub fn multiplier(&self) -> Multiplier {
        Multiplier::from_whole(1 + self.streak)
    }

    fn can_adjust_bet(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::RoundOver)
    }

    /// Add chips to the wager. Valid between rounds only.
    pub fn add_to_bet(&mut self, amount: Chips) {
        if !self.can_adjust_bet() || amount.is_zero() {
            return;
        }
        if stake(&self.ledger, amount).is_err() {
            self.status = INSUFFICIENT_BANKROLL.to_string();
            return;
        }
        self.wager = self.wager.saturating_add(amount);
        self.status = format!("BET LOCKED ${} :: PRESS DEAL", self.wager);
    }

    /// Return the staked wager. Valid between rounds only.
    pub fn clear_bet(&mut self) {
        if !self.can_adjust_bet() {
            return;
        }
        credit(&self.ledger, self.wager);
        self.wager = Chips::ZERO;
        self.status = PLACE_BETS_DEAL.to_string();
    }

    /// Start a run: shuffle and reveal the first card.
    pub fn deal(&mut self) {
        if !self.can_adjust_bet() {
            return;
        }
        if self.wager.is_zero() {
            self.status = PLACE_BETS_DEAL.to_string();
            return;
        }
        self.deck = Deck::shuffled(&mut self.rng);
        self.current = Some(self.deck.draw(&mut self.rng));
        self.streak = 0;
        self.phase = Phase::Dealt;
        self.status = "GUESS HIGH OR LOW".to_string();
    }

    /// Resolve a call against the next card. A tie pushes; a correct
    /// call extends the run with the revealed card as the new current.
    pub fn guess(&mut self, guess: Guess) {
        if self.phase != Phase::Dealt {
            return;
        }
        let Some(current) = self.current else {
            return;
        };
        let next = self.deck.draw(&mut self.rng);
        let current_value = current.rank.high_value();
        let next_value = next.rank.high_value();
        self.current = Some(next);

        if next_value == current_value {
            self.settle(Outcome::Push, Multiplier::from_whole(1));
            return;
        }

        let correct = match guess {
            Guess::High => next_value > current_value,
            Guess::Low => next_value < current_value,
        };
        if correct {
            self.streak += 1;
            self.status = format!(
                "CORRECT :: STREAK {} :: CASH OUT OR GUESS AGAIN",
                self.streak
            );
        } else {
            self.settle(Outcome::Loss, Multiplier::ZERO);
        }
    }

    /// Bank the run at x(1 + streak). Valid mid-run with a live streak
    /// only.
    pub fn cash_out(&mut self) {
        if self.phase != Phase::Dealt || self.streak == 0 {
            return;
        }
        let multiplier = self.multiplier();
        self.settle(Outcome::CashOut, multiplier);
    }

    fn settle(&mut self, outcome: Outcome, multiplier: Multiplier) {
        let result = settlement::compute(self.wager, multiplier);
        credit(&self.ledger, result.payout);
        let message = settlement::format_message(outcome.label(), &result);
        self.wager = Chips::ZERO;
        self.streak = 0;
        self.phase = Phase::RoundOver;
        self.status = round_over(&message, PLACE_BETS_DEAL);
    }
}
