//! Settlement math and the uniform outcome message.

use std::fmt;

use greenfelt_types::casino::{Chips, Multiplier};

/// Result of settling a wager against a payout multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub wager: Chips,
    pub payout: Chips,
    /// Net result in tenths of a chip; negative on a losing round.
    pub net: i64,
    pub multiplier: Multiplier,
}

/// Compute payout and net for a settled round.
pub fn compute(wager: Chips, multiplier: Multiplier) -> Settlement {
    let payout = wager * multiplier;
    Settlement {
        wager,
        payout,
        net: payout.signed_diff(wager),
        multiplier,
    }
}

/// Settlement from explicit wager and payout totals (multi-bet games).
/// The multiplier is the effective payout/wager ratio, in tenths.
pub fn from_totals(wager: Chips, payout: Chips) -> Settlement {
    let multiplier = if wager.is_zero() {
        Multiplier::ZERO
    } else {
        let ratio = payout.tenths() as u128 * 10 / wager.tenths() as u128;
        Multiplier::from_tenths(ratio.min(u32::MAX as u128) as u32)
    };
    Settlement {
        wager,
        payout,
        net: payout.signed_diff(wager),
        multiplier,
    }
}

/// Outcome label attached to a settlement message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Push,
    Blackjack,
    CashOut,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Loss => "LOSS",
            Outcome::Push => "PUSH",
            Outcome::Blackjack => "BLACKJACK",
            Outcome::CashOut => "CASH OUT",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compose the game-agnostic outcome line.
///
/// A push (payout returned, zero net) carries an explicit BET RETURNED
/// marker; a losing round reports only the wager.
pub fn format_message(label: &str, settlement: &Settlement) -> String {
    let wager = settlement.wager;
    let payout = settlement.payout;
    if payout > Chips::ZERO && settlement.net == 0 {
        format!("{label} :: BET RETURNED :: WAGER ${wager} :: PAYOUT ${payout}")
    } else if payout > Chips::ZERO {
        let net = format_net(settlement.net);
        format!("{label} :: WAGER ${wager} :: PAYOUT ${payout} :: NET {net}")
    } else {
        format!("{label} :: WAGER ${wager}")
    }
}

/// Signed dollar rendering of a net amount in tenths.
fn format_net(net: i64) -> String {
    let sign = if net < 0 { "-" } else { "+" };
    let magnitude = Chips::from_tenths(net.unsigned_abs());
    format!("{sign}${magnitude}")
}
