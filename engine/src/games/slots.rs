//! Slot machine with weighted reels.
//!
//! Three reels draw independently from a five-symbol weighted strip.
//! The spin is a plan of staggered, decaying tick delays; the final line
//! is drawn and settled once, at resolve.

use greenfelt_types::casino::{Chips, Multiplier};

use super::{credit, round_over, stake, INSUFFICIENT_BANKROLL, PLACE_BETS_SPIN, SPINNING};
use crate::ledger::SharedLedger;
use crate::rng::GameRng;
use crate::sched::{reel_delays, SpinPlan, SpinToken, Spinner};
use crate::settlement::{self, Outcome};

/// Reel symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Seven,
    Bar,
    Cross,
    Star,
    Cash,
}

/// Symbols with their draw weights (total 14); cash is the filler, the
/// seven the rarity.
const WEIGHTED_SYMBOLS: [(Symbol, u32); 5] = [
    (Symbol::Seven, 1),
    (Symbol::Bar, 2),
    (Symbol::Cross, 3),
    (Symbol::Star, 2),
    (Symbol::Cash, 6),
];

impl Symbol {
    /// Glyph shown on the reel.
    pub fn glyph(self) -> char {
        match self {
            Symbol::Seven => '7',
            Symbol::Bar => 'B',
            Symbol::Cross => 'X',
            Symbol::Star => '*',
            Symbol::Cash => '$',
        }
    }

    /// Draw one symbol by cumulative-weight sampling.
    pub fn draw(rng: &mut GameRng) -> Symbol {
        let total: u32 = WEIGHTED_SYMBOLS.iter().map(|(_, weight)| weight).sum();
        let mut roll = rng.weighted_roll(total);
        for (symbol, weight) in WEIGHTED_SYMBOLS {
            if roll < weight {
                return symbol;
            }
            roll -= weight;
        }
        WEIGHTED_SYMBOLS[0].0
    }
}

/// Payline multiplier: three of a kind x5, any pair x2, else nothing.
pub fn line_multiplier(line: [Symbol; 3]) -> Multiplier {
    let [a, b, c] = line;
    if a == b && b == c {
        Multiplier::from_whole(5)
    } else if a == b || a == c || b == c {
        Multiplier::from_whole(2)
    } else {
        Multiplier::ZERO
    }
}

/// Reel stop offsets in milliseconds, staggered left to right.
const REEL_STOPS_MS: [u32; 3] = [650, 1_050, 1_500];

/// Round phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Spinning,
}

pub struct Slots {
    ledger: SharedLedger,
    rng: GameRng,
    spinner: Spinner,
    line: Option<[Symbol; 3]>,
    wager: Chips,
    phase: Phase,
    status: String,
}

impl Slots {
    pub fn new(ledger: SharedLedger, rng: GameRng) -> Self {
        Self {
            ledger,
            rng,
            spinner: Spinner::new(),
            line: None,
            wager: Chips::ZERO,
            phase: Phase::Idle,
            status: PLACE_BETS_SPIN.to_string(),
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

    /// The final line of the last resolved spin.
    pub fn line(&self) -> Option<[Symbol; 3]> {
        self.line
    }

    /// Add chips to the wager. Valid while the reels are at rest.
    pub fn add_to_bet(&mut self, amount: Chips) {
        if self.phase != Phase::Idle || amount.is_zero() {
            return;
        }
        if stake(&self.ledger, amount).is_err() {
            self.status = INSUFFICIENT_BANKROLL.to_string();
            return;
        }
        self.wager = self.wager.saturating_add(amount);
        self.status = format!("BET LOCKED ${} :: PRESS SPIN", self.wager);
    }

    /// Return the staked wager. Valid while at rest.
    pub fn clear_bet(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        credit(&self.ledger, self.wager);
        self.wager = Chips::ZERO;
        self.status = PLACE_BETS_SPIN.to_string();
    }

    /// Lock the wager and start the reels. Returns the three-reel spin
    /// plan, or `None` when there is nothing to spin.
    pub fn spin(&mut self) -> Option<SpinPlan> {
        if self.phase != Phase::Idle {
            return None;
        }
        if self.wager.is_zero() {
            self.status = PLACE_BETS_SPIN.to_string();
            return None;
        }
        let token = self.spinner.begin()?;
        self.phase = Phase::Spinning;
        self.status = SPINNING.to_string();
        Some(SpinPlan {
            token,
            reels: REEL_STOPS_MS.iter().map(|&stop| reel_delays(stop)).collect(),
        })
    }

    /// Cosmetic reel frame for an in-flight spin; stale tokens yield
    /// nothing.
    pub fn tick(&mut self, token: SpinToken) -> Option<[Symbol; 3]> {
        if !self.spinner.accepts(token) {
            return None;
        }
        Some([
            Symbol::draw(&mut self.rng),
            Symbol::draw(&mut self.rng),
            Symbol::draw(&mut self.rng),
        ])
    }

    /// Stop the reels on their final symbols and settle exactly once.
    pub fn resolve(&mut self, token: SpinToken) {
        if self.phase != Phase::Spinning || !self.spinner.finish(token) {
            return;
        }
        let line = [
            Symbol::draw(&mut self.rng),
            Symbol::draw(&mut self.rng),
            Symbol::draw(&mut self.rng),
        ];
        self.line = Some(line);

        let multiplier = line_multiplier(line);
        let result = settlement::compute(self.wager, multiplier);
        credit(&self.ledger, result.payout);

        let outcome = if multiplier.is_zero() {
            Outcome::Loss
        } else {
            Outcome::Win
        };
        let message = settlement::format_message(outcome.label(), &result);
        self.wager = Chips::ZERO;
        self.phase = Phase::Idle;
        self.status = round_over(&message, PLACE_BETS_SPIN);
    }
}
