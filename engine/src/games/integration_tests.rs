//! Cross-game invariants over one shared ledger.

use greenfelt_types::casino::Chips;

use super::blackjack::{self, Blackjack};
use super::hilo::{Guess, HiLo};
use super::roulette::{BetKind, Roulette};
use super::slots::Slots;
use super::video_poker::VideoPoker;
use crate::clock::FixedClock;
use crate::ledger::{BankrollLedger, SharedLedger};
use crate::rng::GameRng;
use crate::storage::MemoryStorage;

// A timestamp inside 2026-W32.
const NOW: u64 = 1_785_974_400;

fn shared_ledger() -> SharedLedger {
    BankrollLedger::shared(
        Box::new(MemoryStorage::new()),
        Box::new(FixedClock::new(NOW)),
    )
}

#[test]
fn test_games_share_one_bankroll() {
    let ledger = shared_ledger();
    let mut blackjack = Blackjack::new(ledger.clone(), GameRng::from_seed(1));
    let mut roulette = Roulette::new(ledger.clone(), GameRng::from_seed(2));
    let mut slots = Slots::new(ledger.clone(), GameRng::from_seed(3));

    blackjack.add_to_bet(Chips::from_whole(100));
    roulette.place_bet(BetKind::Red, Chips::from_whole(200));
    slots.add_to_bet(Chips::from_whole(300));
    assert_eq!(ledger.borrow().balance(), Chips::from_whole(400));

    // Returning every stake restores the full bankroll.
    blackjack.reset_table();
    roulette.clear_bets();
    slots.clear_bet();
    assert_eq!(ledger.borrow().balance(), Chips::from_whole(1_000));
}

#[test]
fn test_stakes_beyond_balance_rejected_across_games() {
    let ledger = shared_ledger();
    let mut blackjack = Blackjack::new(ledger.clone(), GameRng::from_seed(1));
    let mut hilo = HiLo::new(ledger.clone(), GameRng::from_seed(2));

    blackjack.add_to_bet(Chips::from_whole(900));
    // Only 100 remains; the second game cannot overdraw it.
    hilo.add_to_bet(Chips::from_whole(200));
    assert_eq!(hilo.wager(), Chips::ZERO);
    assert_eq!(ledger.borrow().balance(), Chips::from_whole(100));
}

#[test]
fn test_balance_never_negative_through_mixed_play() {
    let ledger = shared_ledger();
    let mut blackjack = Blackjack::new(ledger.clone(), GameRng::from_seed(11));
    let mut roulette = Roulette::new(ledger.clone(), GameRng::from_seed(12));
    let mut hilo = HiLo::new(ledger.clone(), GameRng::from_seed(13));
    let mut slots = Slots::new(ledger.clone(), GameRng::from_seed(14));

    for round in 0..50 {
        blackjack.reset_table();
        blackjack.add_to_bet(Chips::from_whole(20));
        blackjack.deal();
        while blackjack.phase() == blackjack::Phase::PlayerTurn {
            if blackjack::hand_value(blackjack.player_hand()) < 17 {
                blackjack.hit();
            } else {
                blackjack.stand();
            }
        }

        roulette.place_bet(BetKind::Red, Chips::from_whole(10));
        roulette.place_bet(BetKind::Straight(17), Chips::from_whole(5));
        if let Some(plan) = roulette.spin() {
            roulette.resolve(plan.token);
        }

        hilo.clear_bet();
        hilo.add_to_bet(Chips::from_whole(10));
        hilo.deal();
        hilo.guess(Guess::High);
        hilo.cash_out();

        slots.add_to_bet(Chips::from_whole(5));
        if let Some(plan) = slots.spin() {
            slots.resolve(plan.token);
        }

        let balance = ledger.borrow().balance();
        assert!(balance >= Chips::ZERO, "negative balance at round {round}");
        if balance < Chips::from_whole(50) {
            break;
        }
    }
}

#[test]
fn test_out_of_phase_controls_leave_state_unchanged() {
    let ledger = shared_ledger();
    let mut blackjack = Blackjack::new(ledger.clone(), GameRng::from_seed(21));
    let mut poker = VideoPoker::new(ledger.clone(), GameRng::from_seed(22));
    let mut hilo = HiLo::new(ledger.clone(), GameRng::from_seed(23));

    // No round in progress anywhere: every mid-round control is inert.
    blackjack.hit();
    blackjack.stand();
    poker.toggle_hold(0);
    poker.draw();
    hilo.guess(Guess::High);
    hilo.cash_out();

    assert_eq!(ledger.borrow().balance(), Chips::from_whole(1_000));
    assert_eq!(blackjack.phase(), blackjack::Phase::Idle);
    assert!(blackjack.player_hand().is_empty());
    assert!(poker.hand().is_empty());
    assert!(hilo.current_card().is_none());
}

#[test]
fn test_round_scores_roll_up_to_weekly_leaderboard() {
    let ledger = shared_ledger();
    ledger.borrow_mut().set_identity("dana", "🦀");

    for score in [100u64, 900, 400] {
        ledger
            .borrow_mut()
            .add_leaderboard_entry(Chips::from_whole(score));
    }

    let ledger_ref = ledger.borrow();
    let board = ledger_ref.leaderboard();
    assert_eq!(board.len(), 3);
    assert_eq!(board.entries()[0].score, Chips::from_whole(900));
    assert_eq!(board.entries()[0].name, "dana");
}
