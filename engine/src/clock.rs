//! Time capability.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current unix time in seconds. Injected into the ledger
/// so week rotation and timestamps are testable without real time.
pub trait Clock {
    fn now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    }
}

/// Settable time source for tests and replays. Clones share the same
/// instant, so a handle kept by the test moves the clock a ledger owns.
#[derive(Clone, Debug, Default)]
pub struct FixedClock {
    now: Rc<Cell<u64>>,
}

impl FixedClock {
    pub fn new(now: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: u64) {
        self.now.set(now);
    }

    pub fn advance(&self, secs: u64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}
