//! Roulette table and state machine.
//!
//! Bets accumulate in a book keyed by tagged bet kinds until the wheel
//! spins; the spin locks the book, and resolution pays every winning key
//! at its total-return multiplier in one credit.

use std::collections::BTreeMap;

use greenfelt_types::casino::{Chips, Multiplier};

use super::{credit, round_over, stake, INSUFFICIENT_BANKROLL, PLACE_BETS_SPIN, SPINNING};
use crate::ledger::SharedLedger;
use crate::rng::GameRng;
use crate::sched::{wheel_delays, SpinPlan, SpinToken, Spinner};
use crate::settlement::{self, Outcome};

/// Red numbers on the wheel; the rest of 1-36 are black, 0 is green.
const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Check if a number is red.
pub fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

/// Thirds of the layout for dozen bets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dozen {
    First,
    Second,
    Third,
}

impl Dozen {
    fn contains(self, number: u8) -> bool {
        match self {
            Dozen::First => (1..=12).contains(&number),
            Dozen::Second => (13..=24).contains(&number),
            Dozen::Third => (25..=36).contains(&number),
        }
    }
}

/// One stakeable position on the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BetKind {
    /// Exact number, 0 included.
    Straight(u8),
    Red,
    Black,
    Odd,
    Even,
    /// 1-18.
    Low,
    /// 19-36.
    High,
    Dozen(Dozen),
}

impl BetKind {
    /// Total-return payout multiplier for a winning stake.
    pub fn payout_multiplier(self) -> Multiplier {
        Multiplier::from_whole(match self {
            BetKind::Straight(_) => 36,
            BetKind::Dozen(_) => 3,
            _ => 2,
        })
    }

    /// Whether a winning number satisfies this bet. Zero pays only the
    /// matching straight bet.
    pub fn wins(self, number: u8) -> bool {
        match self {
            BetKind::Straight(staked) => staked == number,
            _ if number == 0 => false,
            BetKind::Red => is_red(number),
            BetKind::Black => !is_red(number),
            BetKind::Odd => number % 2 == 1,
            BetKind::Even => number % 2 == 0,
            BetKind::Low => (1..=18).contains(&number),
            BetKind::High => (19..=36).contains(&number),
            BetKind::Dozen(dozen) => dozen.contains(number),
        }
    }
}

/// Stakes by bet kind; staking the same key accumulates.
pub type BetBook = BTreeMap<BetKind, Chips>;

/// Total payout for a book of stakes against a winning number.
pub fn evaluate_book(bets: &BetBook, number: u8) -> Chips {
    bets.iter()
        .filter(|(kind, _)| kind.wins(number))
        .map(|(kind, staked)| *staked * kind.payout_multiplier())
        .fold(Chips::ZERO, Chips::saturating_add)
}

/// Round phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Spinning,
}

pub struct Roulette {
    ledger: SharedLedger,
    rng: GameRng,
    bets: BetBook,
    spinner: Spinner,
    phase: Phase,
    status: String,
    last_result: Option<u8>,
}

impl Roulette {
    pub fn new(ledger: SharedLedger, rng: GameRng) -> Self {
        Self {
            ledger,
            rng,
            bets: BetBook::new(),
            spinner: Spinner::new(),
            phase: Phase::Idle,
            status: PLACE_BETS_SPIN.to_string(),
            last_result: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn bets(&self) -> &BetBook {
        &self.bets
    }

    /// The number the wheel last landed on.
    pub fn last_result(&self) -> Option<u8> {
        self.last_result
    }

    pub fn total_staked(&self) -> Chips {
        self.bets
            .values()
            .copied()
            .fold(Chips::ZERO, Chips::saturating_add)
    }

    /// Stake chips on a position; repeat stakes on the same key
    /// accumulate. Valid while the wheel is at rest.
    pub fn place_bet(&mut self, kind: BetKind, amount: Chips) {
        if self.phase != Phase::Idle || amount.is_zero() {
            return;
        }
        if let BetKind::Straight(number) = kind {
            if number > 36 {
                return;
            }
        }
        if stake(&self.ledger, amount).is_err() {
            self.status = INSUFFICIENT_BANKROLL.to_string();
            return;
        }
        let slot = self.bets.entry(kind).or_insert(Chips::ZERO);
        *slot = slot.saturating_add(amount);
        self.status = format!("BET ADDED ${amount} :: PRESS SPIN");
    }

    /// Return every stake and empty the book. Valid while at rest.
    pub fn clear_bets(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        credit(&self.ledger, self.total_staked());
        self.bets.clear();
        self.status = PLACE_BETS_SPIN.to_string();
    }

    /// Lock the book and start the wheel. Returns the spin plan, or
    /// `None` when there is nothing to spin (or a spin is in flight).
    pub fn spin(&mut self) -> Option<SpinPlan> {
        if self.phase != Phase::Idle {
            return None;
        }
        if self.bets.is_empty() {
            self.status = PLACE_BETS_SPIN.to_string();
            return None;
        }
        let token = self.spinner.begin()?;
        self.phase = Phase::Spinning;
        self.status = SPINNING.to_string();
        Some(SpinPlan {
            token,
            reels: vec![wheel_delays(&mut self.rng)],
        })
    }

    /// Cosmetic wheel frame for an in-flight spin; stale tokens yield
    /// nothing.
    pub fn tick(&mut self, token: SpinToken) -> Option<u8> {
        if !self.spinner.accepts(token) {
            return None;
        }
        Some(self.rng.spin_wheel())
    }

    /// Land the wheel and settle the book exactly once.
    pub fn resolve(&mut self, token: SpinToken) {
        if self.phase != Phase::Spinning || !self.spinner.finish(token) {
            return;
        }
        let number = self.rng.spin_wheel();
        self.last_result = Some(number);

        let wagered = self.total_staked();
        let payout = evaluate_book(&self.bets, number);
        credit(&self.ledger, payout);

        let result = settlement::from_totals(wagered, payout);
        let outcome = if result.net > 0 {
            Outcome::Win
        } else if result.net < 0 {
            Outcome::Loss
        } else {
            Outcome::Push
        };
        let message = settlement::format_message(outcome.label(), &result);
        self.bets.clear();
        self.phase = Phase::Idle;
        self.status = round_over(&message, PLACE_BETS_SPIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ledger::BankrollLedger;
    use crate::storage::MemoryStorage;

    fn test_game() -> (Roulette, SharedLedger) {
        let ledger = BankrollLedger::shared(
            Box::new(MemoryStorage::new()),
            Box::new(FixedClock::new(1_785_974_400)),
        );
        (Roulette::new(ledger.clone(), GameRng::from_seed(3)), ledger)
    }

    #[test]
    fn test_is_red() {
        assert!(is_red(1));
        assert!(is_red(21));
        assert!(is_red(36));
        assert!(!is_red(2));
        assert!(!is_red(0));
    }

    #[test]
    fn test_straight_bet_wins_exact_number_only() {
        assert!(BetKind::Straight(7).wins(7));
        assert!(!BetKind::Straight(7).wins(8));
        assert!(BetKind::Straight(0).wins(0));
        assert!(!BetKind::Straight(1).wins(0));
    }

    #[test]
    fn test_zero_loses_every_outside_bet() {
        for kind in [
            BetKind::Red,
            BetKind::Black,
            BetKind::Odd,
            BetKind::Even,
            BetKind::Low,
            BetKind::High,
            BetKind::Dozen(Dozen::First),
        ] {
            assert!(!kind.wins(0), "{kind:?} must lose on zero");
        }
    }

    #[test]
    fn test_outside_bets() {
        assert!(BetKind::Red.wins(21));
        assert!(BetKind::Black.wins(22));
        assert!(BetKind::Odd.wins(35));
        assert!(BetKind::Even.wins(36));
        assert!(BetKind::Low.wins(18));
        assert!(!BetKind::Low.wins(19));
        assert!(BetKind::High.wins(19));
        assert!(!BetKind::High.wins(18));
    }

    #[test]
    fn test_dozens() {
        assert!(BetKind::Dozen(Dozen::First).wins(1));
        assert!(BetKind::Dozen(Dozen::First).wins(12));
        assert!(!BetKind::Dozen(Dozen::First).wins(13));
        assert!(BetKind::Dozen(Dozen::Second).wins(24));
        assert!(BetKind::Dozen(Dozen::Third).wins(25));
        assert!(BetKind::Dozen(Dozen::Third).wins(36));
    }

    #[test]
    fn test_payout_multipliers() {
        assert_eq!(
            BetKind::Straight(7).payout_multiplier(),
            Multiplier::from_whole(36)
        );
        assert_eq!(BetKind::Red.payout_multiplier(), Multiplier::from_whole(2));
        assert_eq!(
            BetKind::Dozen(Dozen::Second).payout_multiplier(),
            Multiplier::from_whole(3)
        );
    }

    #[test]
    fn test_evaluate_book_red_winner() {
        // Stake 10 on red; 21 is red: payout 20, net +10.
        let mut book = BetBook::new();
        book.insert(BetKind::Red, Chips::from_whole(10));
        assert_eq!(evaluate_book(&book, 21), Chips::from_whole(20));
    }

    #[test]
    fn test_evaluate_book_straight_winner() {
        // Stake 10 on straight 7: payout 360, net +350.
        let mut book = BetBook::new();
        book.insert(BetKind::Straight(7), Chips::from_whole(10));
        assert_eq!(evaluate_book(&book, 7), Chips::from_whole(360));
    }

    #[test]
    fn test_evaluate_book_zero_kills_outside_bets() {
        let mut book = BetBook::new();
        book.insert(BetKind::Red, Chips::from_whole(10));
        book.insert(BetKind::Even, Chips::from_whole(10));
        book.insert(BetKind::Dozen(Dozen::First), Chips::from_whole(10));
        book.insert(BetKind::Low, Chips::from_whole(10));
        assert_eq!(evaluate_book(&book, 0), Chips::ZERO);

        // A straight bet on zero still pays.
        book.insert(BetKind::Straight(0), Chips::from_whole(1));
        assert_eq!(evaluate_book(&book, 0), Chips::from_whole(36));
    }

    #[test]
    fn test_evaluate_book_sums_winners() {
        let mut book = BetBook::new();
        book.insert(BetKind::Red, Chips::from_whole(10));
        book.insert(BetKind::Odd, Chips::from_whole(5));
        book.insert(BetKind::Straight(21), Chips::from_whole(1));
        // 21 is red and odd: 20 + 10 + 36.
        assert_eq!(evaluate_book(&book, 21), Chips::from_whole(66));
    }

    #[test]
    fn test_place_bet_accumulates_same_key() {
        let (mut game, ledger) = test_game();
        game.place_bet(BetKind::Red, Chips::from_whole(5));
        game.place_bet(BetKind::Red, Chips::from_whole(5));
        assert_eq!(game.bets().len(), 1);
        assert_eq!(game.total_staked(), Chips::from_whole(10));
        assert_eq!(ledger.borrow().balance(), Chips::from_whole(990));
    }

    #[test]
    fn test_place_bet_rejects_bad_straight_number() {
        let (mut game, ledger) = test_game();
        game.place_bet(BetKind::Straight(37), Chips::from_whole(5));
        assert!(game.bets().is_empty());
        assert_eq!(ledger.borrow().balance(), Chips::from_whole(1_000));
    }

    #[test]
    fn test_clear_bets_refunds_everything() {
        let (mut game, ledger) = test_game();
        game.place_bet(BetKind::Red, Chips::from_whole(5));
        game.place_bet(BetKind::Straight(17), Chips::from_whole(2));
        game.clear_bets();
        assert!(game.bets().is_empty());
        assert_eq!(ledger.borrow().balance(), Chips::from_whole(1_000));
    }

    #[test]
    fn test_spin_requires_bets() {
        let (mut game, _ledger) = test_game();
        assert!(game.spin().is_none());
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.status(), PLACE_BETS_SPIN);
    }

    #[test]
    fn test_spin_locks_bet_mutation() {
        let (mut game, ledger) = test_game();
        game.place_bet(BetKind::Red, Chips::from_whole(10));
        let plan = game.spin().expect("spin starts");
        assert_eq!(game.phase(), Phase::Spinning);
        assert_eq!(game.status(), SPINNING);

        // Mutation is locked while the wheel turns.
        let balance = ledger.borrow().balance();
        game.place_bet(BetKind::Black, Chips::from_whole(10));
        game.clear_bets();
        assert_eq!(game.total_staked(), Chips::from_whole(10));
        assert_eq!(ledger.borrow().balance(), balance);

        // A second spin is rejected while one is in flight.
        assert!(game.spin().is_none());

        game.resolve(plan.token);
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn test_resolve_settles_book_once() {
        let (mut game, ledger) = test_game();
        game.place_bet(BetKind::Red, Chips::from_whole(10));
        let book = game.bets().clone();
        let staked_balance = ledger.borrow().balance();

        let plan = game.spin().expect("spin starts");
        let frame = game.tick(plan.token);
        assert!(frame.is_some());
        game.resolve(plan.token);

        let number = game.last_result().expect("wheel landed");
        let expected = staked_balance.saturating_add(evaluate_book(&book, number));
        assert_eq!(ledger.borrow().balance(), expected);
        assert!(game.bets().is_empty());

        // Replaying the token does nothing.
        game.resolve(plan.token);
        assert!(game.tick(plan.token).is_none());
        assert_eq!(ledger.borrow().balance(), expected);
    }

    #[test]
    fn test_stale_token_cannot_settle_new_round() {
        let (mut game, ledger) = test_game();
        game.place_bet(BetKind::Red, Chips::from_whole(10));
        let first = game.spin().expect("first spin");
        game.resolve(first.token);

        game.place_bet(BetKind::Black, Chips::from_whole(10));
        let second = game.spin().expect("second spin");
        let balance = ledger.borrow().balance();

        // The superseded token must not resolve the new spin.
        game.resolve(first.token);
        assert_eq!(game.phase(), Phase::Spinning);
        assert_eq!(ledger.borrow().balance(), balance);

        game.resolve(second.token);
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn test_spin_plan_has_wheel_frames() {
        let (mut game, _ledger) = test_game();
        game.place_bet(BetKind::Red, Chips::from_whole(1));
        let plan = game.spin().expect("spin starts");
        assert_eq!(plan.reels.len(), 1);
        assert!(!plan.reels[0].is_empty());
        game.resolve(plan.token);
    }
}
