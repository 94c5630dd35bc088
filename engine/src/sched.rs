//! Spin scheduling.
//!
//! Reel and wheel animations are data, not timers. Starting a spin hands
//! back a token plus the cosmetic tick delays a display collaborator may
//! pace itself with. The token is invalidated as soon as the spin
//! finishes or another begins, so a stale callback can never write into
//! a superseded round. Settlement never depends on the ticks: it is
//! computed once, at resolve.

use crate::rng::GameRng;

/// Handle identifying one in-flight spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinToken {
    generation: u64,
}

/// A started spin: its token plus per-reel cosmetic tick delays in
/// milliseconds. A wheel is a single reel.
#[derive(Clone, Debug)]
pub struct SpinPlan {
    pub token: SpinToken,
    pub reels: Vec<Vec<u32>>,
}

/// Issues and validates spin tokens. One spin may be in flight at a time.
#[derive(Clone, Debug, Default)]
pub struct Spinner {
    generation: u64,
    in_flight: bool,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a spin. Rejected while another spin is in flight.
    pub fn begin(&mut self) -> Option<SpinToken> {
        if self.in_flight {
            return None;
        }
        self.generation += 1;
        self.in_flight = true;
        Some(SpinToken {
            generation: self.generation,
        })
    }

    /// Whether a token belongs to the current in-flight spin.
    pub fn accepts(&self, token: SpinToken) -> bool {
        self.in_flight && token.generation == self.generation
    }

    /// Finish the spin the token belongs to. Stale tokens are ignored.
    pub fn finish(&mut self, token: SpinToken) -> bool {
        if !self.accepts(token) {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Abandon any in-flight spin, invalidating its token.
    pub fn cancel(&mut self) {
        self.in_flight = false;
    }

    pub fn is_spinning(&self) -> bool {
        self.in_flight
    }
}

/// Cosmetic tick delays for a wheel spin: a 1.2-1.8s run of 60-90ms
/// frames.
pub fn wheel_delays(rng: &mut GameRng) -> Vec<u32> {
    let duration = 1_200 + rng.next_bounded(600);
    let tick = 60 + rng.next_bounded(30);
    let frames = (duration / tick).max(1);
    vec![tick; frames as usize]
}

/// Cosmetic tick delays for one slot reel: quadratic ease from fast to
/// slow frames until the reel's stop time.
pub fn reel_delays(stop_ms: u32) -> Vec<u32> {
    const MIN_DELAY: f32 = 40.0;
    const MAX_DELAY: f32 = 140.0;
    let stop = stop_ms as f32;
    let mut delays = Vec::new();
    let mut elapsed = 0.0f32;
    while elapsed < stop {
        let progress = (elapsed / stop).min(1.0);
        let eased = progress * progress;
        let delay = MIN_DELAY + (MAX_DELAY - MIN_DELAY) * eased;
        delays.push(delay as u32);
        elapsed += delay;
    }
    delays
}
