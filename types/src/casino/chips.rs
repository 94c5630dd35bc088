//! Fixed-point chip amounts.
//!
//! All money in the suite is quantized to one decimal place. Amounts are
//! stored as a raw count of tenths in a `u64`, so a balance can never go
//! negative and settlement arithmetic stays exact.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Mul;

/// Raw units per whole chip.
pub const CHIP_SCALE: u64 = 10;

/// A non-negative chip amount with one decimal place of precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(u64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    /// Create from a whole number of chips.
    pub const fn from_whole(value: u64) -> Self {
        Chips(value * CHIP_SCALE)
    }

    /// Create from a raw count of tenths.
    pub const fn from_tenths(tenths: u64) -> Self {
        Chips(tenths)
    }

    /// Quantize an arbitrary number to 0.1 chips, clamping at zero.
    /// Non-finite input is rejected.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let tenths = (value * CHIP_SCALE as f64).round();
        if tenths <= 0.0 {
            Some(Chips(0))
        } else if tenths >= u64::MAX as f64 {
            Some(Chips(u64::MAX))
        } else {
            Some(Chips(tenths as u64))
        }
    }

    /// Raw count of tenths.
    pub const fn tenths(self) -> u64 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / CHIP_SCALE as f64
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_add(self, other: Chips) -> Chips {
        Chips(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Chips) -> Chips {
        Chips(self.0.saturating_sub(other.0))
    }

    /// Subtraction that fails instead of going negative.
    pub fn checked_sub(self, other: Chips) -> Option<Chips> {
        self.0.checked_sub(other.0).map(Chips)
    }

    /// Difference as signed tenths, for net results that may be negative.
    pub fn signed_diff(self, other: Chips) -> i64 {
        self.0 as i64 - other.0 as i64
    }
}

impl Mul<Multiplier> for Chips {
    type Output = Chips;

    fn mul(self, rhs: Multiplier) -> Chips {
        let product = self.0 as u128 * rhs.tenths() as u128 / CHIP_SCALE as u128;
        Chips(product.min(u64::MAX as u128) as u64)
    }
}

/// Whole amounts render bare, fractional amounts with one decimal.
impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % CHIP_SCALE == 0 {
            write!(f, "{}", self.0 / CHIP_SCALE)
        } else {
            write!(f, "{}.{}", self.0 / CHIP_SCALE, self.0 % CHIP_SCALE)
        }
    }
}

impl Serialize for Chips {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Chips {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Chips::from_f64(value)
            .ok_or_else(|| serde::de::Error::custom("chip amount must be a finite number"))
    }
}

/// A payout multiplier with one decimal place of precision.
///
/// `Chips * Multiplier` is exact for tenth-quantized values, so a 3:2
/// blackjack (x2.5) never loses a fraction of a chip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Multiplier(u32);

impl Multiplier {
    pub const ZERO: Multiplier = Multiplier(0);

    pub const fn from_whole(value: u32) -> Self {
        Multiplier(value * CHIP_SCALE as u32)
    }

    pub const fn from_tenths(tenths: u32) -> Self {
        Multiplier(tenths)
    }

    pub const fn tenths(self) -> u32 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = CHIP_SCALE as u32;
        if self.0 % scale == 0 {
            write!(f, "{}", self.0 / scale)
        } else {
            write!(f, "{}.{}", self.0 / scale, self.0 % scale)
        }
    }
}
