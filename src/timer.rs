//! The countdown timers of the chip and the scheduling of fixed rate work.
use std::time::Duration;

use crate::ConfigError;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Represents a timer inside of the chip
/// infrastruture, it will count down to
/// zero from what ever number given, one step
/// per tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// will store the value of the timer
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    /// Will count the timer down by one, if it hasn't reached zero yet.
    /// Returns if the timer is still running afterwards.
    pub fn tick(&mut self) -> bool {
        if self.value > 0 {
            self.value -= 1;
        }
        self.value > 0
    }
}

/// Turns elapsed time into the amount of ticks due for a fixed frequency.
///
/// The remainder of every call is kept, so the ticks add up correctly
/// no matter how the time is split up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// the length of a single tick
    period: Duration,
    /// time passed that didn't make up a full tick yet
    pending: Duration,
}

impl Interval {
    /// The fastest frequency that still has a period of at least one nanosecond.
    pub const MAX_HERTZ: u64 = NANOS_PER_SECOND;

    /// Will create a new interval running at the given frequency.
    pub fn from_hertz(hertz: u64, name: &'static str) -> Result<Self, ConfigError> {
        if hertz == 0 {
            return Err(ConfigError::ZeroRate(name));
        }
        if hertz > Self::MAX_HERTZ {
            return Err(ConfigError::RateTooHigh {
                name,
                hertz,
                max: Self::MAX_HERTZ,
            });
        }
        Ok(Self {
            period: Duration::from_nanos(NANOS_PER_SECOND / hertz),
            pending: Duration::from_secs(0),
        })
    }

    /// The length of a single tick.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Will add the elapsed time and return how many ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        self.pending += elapsed;
        let period = self.period.as_nanos();
        let pending = self.pending.as_nanos();

        // the period is never zero, see `from_hertz`
        let ticks = pending / period;
        self.pending = Duration::from_nanos((pending % period) as u64);

        ticks as u64
    }
}
