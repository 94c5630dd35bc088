//! Video poker (jacks or better).
//!
//! Five cards are dealt, holds are toggled, and the draw replaces every
//! non-held card before the hand settles against the fixed paytable.

use greenfelt_types::casino::{Chips, Multiplier};

use super::{credit, round_over, stake, INSUFFICIENT_BANKROLL, PLACE_BETS_DEAL};
use crate::cards::{Card, Deck};
use crate::ledger::SharedLedger;
use crate::rng::GameRng;
use crate::settlement::{self, Outcome};

/// Poker hand categories, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandRank {
    HighCard,
    JacksOrBetter,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandRank {
    /// Display label, e.g. `FULL HOUSE`.
    pub fn label(self) -> &'static str {
        match self {
            HandRank::HighCard => "NO WIN",
            HandRank::JacksOrBetter => "JACKS OR BETTER",
            HandRank::TwoPair => "TWO PAIR",
            HandRank::ThreeOfAKind => "THREE OF A KIND",
            HandRank::Straight => "STRAIGHT",
            HandRank::Flush => "FLUSH",
            HandRank::FullHouse => "FULL HOUSE",
            HandRank::FourOfAKind => "FOUR OF A KIND",
            HandRank::StraightFlush => "STRAIGHT FLUSH",
            HandRank::RoyalFlush => "ROYAL FLUSH",
        }
    }
}

/// Fixed paytable multiplier for a hand category.
pub fn payout_multiplier(rank: HandRank) -> Multiplier {
    Multiplier::from_whole(match rank {
        HandRank::HighCard => 0,
        HandRank::JacksOrBetter => 1,
        HandRank::TwoPair => 2,
        HandRank::ThreeOfAKind => 3,
        HandRank::Straight => 4,
        HandRank::Flush => 6,
        HandRank::FullHouse => 9,
        HandRank::FourOfAKind => 25,
        HandRank::StraightFlush => 50,
        HandRank::RoyalFlush => 250,
    })
}

/// Classify a 5-card hand.
pub fn evaluate_hand(cards: &[Card; 5]) -> HandRank {
    let mut values = [0u8; 5];
    for (slot, card) in values.iter_mut().zip(cards) {
        *slot = card.rank.high_value();
    }
    values.sort_unstable();

    let is_flush = cards.iter().all(|card| card.suit == cards[0].suit);
    let distinct = values.windows(2).all(|pair| pair[0] != pair[1]);
    // The wheel (A-2-3-4-5) plays as a straight with a low ace.
    let wheel = values == [2, 3, 4, 5, 14];
    let is_straight = distinct && (values[4] - values[0] == 4 || wheel);
    let is_royal = values == [10, 11, 12, 13, 14];

    // Rank multiplicities, indexed by ace-high value.
    let mut counts = [0u8; 15];
    for &value in &values {
        counts[value as usize] += 1;
    }
    let mut pairs = 0u8;
    let mut high_pair = false;
    let mut three_kind = false;
    let mut four_kind = false;
    for (value, &count) in counts.iter().enumerate() {
        match count {
            2 => {
                pairs += 1;
                if value >= 11 {
                    // J, Q, K, A
                    high_pair = true;
                }
            }
            3 => three_kind = true,
            4 => four_kind = true,
            _ => {}
        }
    }

    if is_flush && is_royal {
        HandRank::RoyalFlush
    } else if is_flush && is_straight {
        HandRank::StraightFlush
    } else if four_kind {
        HandRank::FourOfAKind
    } else if three_kind && pairs == 1 {
        HandRank::FullHouse
    } else if is_flush {
        HandRank::Flush
    } else if is_straight {
        HandRank::Straight
    } else if three_kind {
        HandRank::ThreeOfAKind
    } else if pairs == 2 {
        HandRank::TwoPair
    } else if pairs == 1 && high_pair {
        HandRank::JacksOrBetter
    } else {
        HandRank::HighCard
    }
}

/// Round phases. The draw resolves synchronously, so the machine is back
/// to `Idle` as soon as the hand settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dealt,
}

pub struct VideoPoker {
    ledger: SharedLedger,
    rng: GameRng,
    deck: Deck,
    hand: Vec<Card>,
    holds: [bool; 5],
    wager: Chips,
    phase: Phase,
    status: String,
}

impl VideoPoker {
    pub fn new(ledger: SharedLedger, mut rng: GameRng) -> Self {
        let deck = Deck::shuffled(&mut rng);
        Self {
            ledger,
            rng,
            deck,
            hand: Vec::new(),
            holds: [false; 5],
            wager: Chips::ZERO,
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

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn holds(&self) -> [bool; 5] {
        self.holds
    }

    /// Add chips to the wager. Valid before the deal only.
    pub fn add_to_bet(&mut self, amount: Chips) {
        if self.phase != Phase::Idle || amount.is_zero() {
            return;
        }
        if stake(&self.ledger, amount).is_err() {
            self.status = INSUFFICIENT_BANKROLL.to_string();
            return;
        }
        self.wager = self.wager.saturating_add(amount);
        self.status = format!("BET LOCKED ${} :: PRESS DEAL", self.wager);
    }

    /// Return the staked wager. Valid before the deal only.
    pub fn clear_bet(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        credit(&self.ledger, self.wager);
        self.wager = Chips::ZERO;
        self.status = PLACE_BETS_DEAL.to_string();
    }

    /// Deal five cards. A zero wager re-asserts the betting prompt.
    pub fn deal(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        if self.wager.is_zero() {
            self.status = PLACE_BETS_DEAL.to_string();
            return;
        }
        self.deck = Deck::shuffled(&mut self.rng);
        self.hand = (0..5).map(|_| self.deck.draw(&mut self.rng)).collect();
        self.holds = [false; 5];
        self.phase = Phase::Dealt;
        self.status = "SELECT HOLDS THEN DRAW".to_string();
    }

    /// Toggle a hold. Valid while a hand is dealt only.
    pub fn toggle_hold(&mut self, index: usize) {
        if self.phase != Phase::Dealt || index >= self.holds.len() {
            return;
        }
        self.holds[index] = !self.holds[index];
    }

    /// Replace every non-held card and settle the hand.
    pub fn draw(&mut self) {
        if self.phase != Phase::Dealt {
            return;
        }
        for (card, held) in self.hand.iter_mut().zip(self.holds) {
            if !held {
                *card = self.deck.draw(&mut self.rng);
            }
        }

        let cards = [
            self.hand[0],
            self.hand[1],
            self.hand[2],
            self.hand[3],
            self.hand[4],
        ];
        let rank = evaluate_hand(&cards);
        let multiplier = payout_multiplier(rank);
        let result = settlement::compute(self.wager, multiplier);
        credit(&self.ledger, result.payout);

        let label = if multiplier.is_zero() {
            Outcome::Loss.label()
        } else {
            rank.label()
        };
        let message = settlement::format_message(label, &result);
        self.wager = Chips::ZERO;
        self.phase = Phase::Idle;
        self.status = round_over(&message, PLACE_BETS_DEAL);
    }
}
