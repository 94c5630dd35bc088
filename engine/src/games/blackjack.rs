//! Blackjack state machine.
//!
//! Naturals pay 3:2 and resolve on the deal; the dealer draws to 17 and
//! stands on all 17s. A bust ends the round immediately.

use greenfelt_types::casino::{Chips, Multiplier};

use super::{credit, round_over, stake, INSUFFICIENT_BANKROLL, PLACE_BETS_DEAL};
use crate::cards::{Card, Deck, Rank};
use crate::ledger::SharedLedger;
use crate::rng::GameRng;
use crate::settlement::{self, Outcome};

/// Round phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PlayerTurn,
    DealerTurn,
    RoundOver,
}

/// Best total for a blackjack hand: aces count 11, dropping to 1 one at
/// a time while the hand would bust.
pub fn hand_value(cards: &[Card]) -> u8 {
    let mut total: u16 = 0;
    let mut aces: u8 = 0;
    for card in cards {
        match card.rank {
            Rank::Ace => {
                aces += 1;
                total += 11;
            }
            Rank::Jack | Rank::Queen | Rank::King => total += 10,
            rank => total += rank.high_value() as u16,
        }
    }
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    total.min(u8::MAX as u16) as u8
}

/// A natural: exactly two cards totaling 21.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == 21
}

pub struct Blackjack {
    ledger: SharedLedger,
    rng: GameRng,
    deck: Deck,
    dealer: Vec<Card>,
    player: Vec<Card>,
    wager: Chips,
    phase: Phase,
    status: String,
}

impl Blackjack {
    pub fn new(ledger: SharedLedger, mut rng: GameRng) -> Self {
        let deck = Deck::shuffled(&mut rng);
        Self {
            ledger,
            rng,
            deck,
            dealer: Vec::new(),
            player: Vec::new(),
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

    pub fn player_hand(&self) -> &[Card] {
        &self.player
    }

    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer
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

    /// Return any staked wager and clear the table. Valid between rounds
    /// only.
    pub fn reset_table(&mut self) {
        if !self.can_adjust_bet() {
            return;
        }
        credit(&self.ledger, self.wager);
        self.wager = Chips::ZERO;
        self.dealer.clear();
        self.player.clear();
        self.phase = Phase::Idle;
        self.status = PLACE_BETS_DEAL.to_string();
    }

    /// Deal a fresh round. A zero wager re-asserts the betting prompt.
    pub fn deal(&mut self) {
        if !self.can_adjust_bet() {
            return;
        }
        if self.wager.is_zero() {
            self.status = PLACE_BETS_DEAL.to_string();
            return;
        }
        self.deck = Deck::shuffled(&mut self.rng);
        self.dealer = vec![self.deck.draw(&mut self.rng), self.deck.draw(&mut self.rng)];
        self.player = vec![self.deck.draw(&mut self.rng), self.deck.draw(&mut self.rng)];
        self.phase = Phase::PlayerTurn;
        self.status = "PLAYER TURN :: HIT OR STAND".to_string();
        self.check_naturals();
    }

    /// Resolve immediately when either side was dealt a natural.
    fn check_naturals(&mut self) {
        let player_natural = is_natural(&self.player);
        let dealer_natural = is_natural(&self.dealer);
        if player_natural && dealer_natural {
            self.settle(Outcome::Push, Multiplier::from_whole(1));
        } else if player_natural {
            self.settle(Outcome::Blackjack, Multiplier::from_tenths(25));
        } else if dealer_natural {
            self.settle(Outcome::Loss, Multiplier::ZERO);
        }
    }

    /// Draw one card; busting ends the round as a loss.
    pub fn hit(&mut self) {
        if self.phase != Phase::PlayerTurn {
            return;
        }
        let card = self.deck.draw(&mut self.rng);
        self.player.push(card);
        if hand_value(&self.player) > 21 {
            self.settle(Outcome::Loss, Multiplier::ZERO);
        }
    }

    /// Stand: the dealer draws to 17, then the round resolves.
    pub fn stand(&mut self) {
        if self.phase != Phase::PlayerTurn {
            return;
        }
        self.phase = Phase::DealerTurn;
        self.status = "DEALER TURN".to_string();
        while hand_value(&self.dealer) < 17 {
            let card = self.deck.draw(&mut self.rng);
            self.dealer.push(card);
        }

        let dealer = hand_value(&self.dealer);
        let player = hand_value(&self.player);
        if dealer > 21 || player > dealer {
            self.settle(Outcome::Win, Multiplier::from_whole(2));
        } else if dealer == player {
            self.settle(Outcome::Push, Multiplier::from_whole(1));
        } else {
            self.settle(Outcome::Loss, Multiplier::ZERO);
        }
    }

    fn settle(&mut self, outcome: Outcome, multiplier: Multiplier) {
        let result = settlement::compute(self.wager, multiplier);
        credit(&self.ledger, result.payout);
        let message = settlement::format_message(outcome.label(), &result);
        self.wager = Chips::ZERO;
        self.phase = Phase::RoundOver;
        self.status = round_over(&message, PLACE_BETS_DEAL);
    }
}
