//! Monotonic frame clock and polled deadlines.
//!
//! Stuns, cooldowns and vulnerability windows are [`Deadline`]s compared
//! against [`FrameClock::now`] each tick. Arming a deadline that is already
//! armed replaces it; nothing stacks and nothing fires on its own.

use serde::{Deserialize, Serialize};

/// Fixed-step simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    /// Frames stepped so far.
    frame: u64,

    /// Seconds elapsed so far.
    time: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step the clock forward one frame of `delta_time` seconds.
    pub fn advance(&mut self, delta_time: f32) {
        self.frame += 1;
        self.time += f64::from(delta_time.max(0.0));
    }

    /// Frames stepped so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds elapsed so far.
    #[inline]
    pub fn now(&self) -> f64 {
        self.time
    }
}

/// A point in clock time after which something ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    at: Option<f64>,
}

impl Deadline {
    /// A deadline that is not armed.
    pub const NONE: Self = Self { at: None };

    /// Arm to expire `duration` seconds after `now`, replacing any pending deadline.
    pub fn arm(&mut self, now: f64, duration: f32) {
        self.at = Some(now + f64::from(duration.max(0.0)));
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// Armed and not yet reached.
    #[inline]
    pub fn is_pending(&self, now: f64) -> bool {
        matches!(self.at, Some(at) if now < at)
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline,
    /// and disarms it.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }

    /// Seconds left, zero when reached or not armed.
    pub fn remaining(&self, now: f64) -> f64 {
        self.at.map_or(0.0, |at| (at - now).max(0.0))
    }
}
