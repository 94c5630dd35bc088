//! Headless driver for the greenfelt engine.
//!
//! Stands in for the display collaborators: it wires the shared ledger
//! to every game machine, drives their programmatic action surfaces
//! with simple policies, and logs the bankroll-changed notifications a
//! UI would render.

use std::fmt;

use clap::ValueEnum;
use tracing::info;

use greenfelt_engine::cards::Card;
use greenfelt_engine::clock::SystemClock;
use greenfelt_engine::games::blackjack::{self, Blackjack};
use greenfelt_engine::games::hilo::{self, Guess, HiLo};
use greenfelt_engine::games::roulette::{BetKind, Roulette};
use greenfelt_engine::games::slots::Slots;
use greenfelt_engine::games::video_poker::VideoPoker;
use greenfelt_engine::storage::Storage;
use greenfelt_engine::{BankrollLedger, GameRng, SharedLedger};
use greenfelt_types::casino::Chips;

/// Game selector for a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Game {
    Blackjack,
    VideoPoker,
    Roulette,
    Hilo,
    Slots,
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Game::Blackjack => "blackjack",
            Game::VideoPoker => "video-poker",
            Game::Roulette => "roulette",
            Game::Hilo => "hilo",
            Game::Slots => "slots",
        })
    }
}

/// One ledger wired to all five game machines.
pub struct Simulator {
    ledger: SharedLedger,
    blackjack: Blackjack,
    video_poker: VideoPoker,
    roulette: Roulette,
    hilo: HiLo,
    slots: Slots,
}

impl Simulator {
    /// Load the ledger from the given storage and construct the games.
    /// A seed makes the whole run reproducible.
    pub fn new(storage: Box<dyn Storage>, seed: Option<u64>) -> Self {
        let ledger = BankrollLedger::shared(storage, Box::new(SystemClock));
        ledger
            .borrow_mut()
            .subscribe(|balance| info!(%balance, "bankroll changed"));

        let rng = |offset: u64| match seed {
            Some(seed) => GameRng::from_seed(seed.wrapping_add(offset)),
            None => GameRng::from_entropy(),
        };
        Self {
            blackjack: Blackjack::new(ledger.clone(), rng(0)),
            video_poker: VideoPoker::new(ledger.clone(), rng(1)),
            roulette: Roulette::new(ledger.clone(), rng(2)),
            hilo: HiLo::new(ledger.clone(), rng(3)),
            slots: Slots::new(ledger.clone(), rng(4)),
            ledger,
        }
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    pub fn set_identity(&self, name: &str, emoji: &str) {
        self.ledger.borrow_mut().set_identity(name, emoji);
    }

    /// Play one round of the chosen game at the given stake.
    pub fn play_round(&mut self, game: Game, bet: Chips) {
        match game {
            Game::Blackjack => self.play_blackjack(bet),
            Game::VideoPoker => self.play_video_poker(bet),
            Game::Roulette => self.play_roulette(bet),
            Game::Hilo => self.play_hilo(bet),
            Game::Slots => self.play_slots(bet),
        }
    }

    /// Record the final bankroll on the weekly leaderboard.
    pub fn record_score(&self) {
        let mut ledger = self.ledger.borrow_mut();
        let balance = ledger.balance();
        ledger.add_leaderboard_entry(balance);
    }

    /// Hit below 17, then stand.
    fn play_blackjack(&mut self, bet: Chips) {
        let game = &mut self.blackjack;
        game.reset_table();
        game.add_to_bet(bet);
        game.deal();
        while game.phase() == blackjack::Phase::PlayerTurn {
            if blackjack::hand_value(game.player_hand()) < 17 {
                game.hit();
            } else {
                game.stand();
            }
        }
        info!(status = game.status(), "blackjack");
    }

    /// Hold every card that pairs another, then draw.
    fn play_video_poker(&mut self, bet: Chips) {
        let game = &mut self.video_poker;
        game.add_to_bet(bet);
        game.deal();
        let hand: Vec<Card> = game.hand().to_vec();
        for (index, card) in hand.iter().enumerate() {
            let paired = hand
                .iter()
                .enumerate()
                .any(|(other, candidate)| other != index && candidate.rank == card.rank);
            if paired {
                game.toggle_hold(index);
            }
        }
        game.draw();
        info!(status = game.status(), "video poker");
    }

    /// An even-money bet on red, spun to resolution.
    fn play_roulette(&mut self, bet: Chips) {
        let game = &mut self.roulette;
        game.place_bet(BetKind::Red, bet);
        if let Some(plan) = game.spin() {
            // Walk the cosmetic frames the way a display would.
            for _ in &plan.reels[0] {
                let _ = game.tick(plan.token);
            }
            game.resolve(plan.token);
        }
        info!(result = ?game.last_result(), status = game.status(), "roulette");
    }

    /// Guess toward the wider side; bank the run at three in a row.
    fn play_hilo(&mut self, bet: Chips) {
        let game = &mut self.hilo;
        game.add_to_bet(bet);
        game.deal();
        while game.phase() == hilo::Phase::Dealt {
            if game.streak() >= 3 {
                game.cash_out();
                break;
            }
            let Some(card) = game.current_card() else {
                break;
            };
            let guess = if card.rank.high_value() <= 8 {
                Guess::High
            } else {
                Guess::Low
            };
            game.guess(guess);
        }
        info!(status = game.status(), "hi-lo");
    }

    fn play_slots(&mut self, bet: Chips) {
        let game = &mut self.slots;
        game.add_to_bet(bet);
        if let Some(plan) = game.spin() {
            for _ in &plan.reels[2] {
                let _ = game.tick(plan.token);
            }
            game.resolve(plan.token);
        }
        let line: Option<String> = game
            .line()
            .map(|line| line.iter().map(|symbol| symbol.glyph()).collect());
        info!(line = ?line, status = game.status(), "slots");
    }
}
