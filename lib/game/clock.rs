use crate::chess::Color;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

/// Configuration for the match clocks.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields)]
#[display("{}", ron::ser::to_string(self).unwrap())]
pub struct TimeControl {
    /// The initial time budget per side.
    #[serde(with = "humantime_serde")]
    pub initial: Duration,

    /// The time credited after every committed move.
    #[serde(with = "humantime_serde", default = "no_increment")]
    pub increment: Duration,
}

fn no_increment() -> Duration {
    Duration::ZERO
}

impl Default for TimeControl {
    #[inline(always)]
    fn default() -> Self {
        TimeControl {
            initial: Duration::from_secs(300),
            increment: Duration::ZERO,
        }
    }
}

/// The reason why parsing [`TimeControl`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display("failed to parse time control")]
pub struct ParseTimeControlError(ron::de::SpannedError);

impl FromStr for TimeControl {
    type Err = ParseTimeControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

/// The pair of match clocks.
///
/// Only the clock of the side to move runs; it is charged once per tick with
/// the wall time elapsed since the previous tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Clock {
    remaining: [Duration; 2],
    increment: Duration,
}

impl Clock {
    /// Initializes both clocks from a [`TimeControl`].
    #[inline(always)]
    pub fn new(tc: TimeControl) -> Self {
        Clock {
            remaining: [tc.initial; 2],
            increment: tc.increment,
        }
    }

    /// The time left on a side's clock.
    #[inline(always)]
    pub fn remaining(&self, side: Color) -> Duration {
        self.remaining[side.index()]
    }

    /// Charges elapsed time to a side's clock.
    ///
    /// Returns whether the flag fell, i.e. the clock ran out of time.
    pub fn tick(&mut self, side: Color, elapsed: Duration) -> bool {
        let remaining = &mut self.remaining[side.index()];
        *remaining = remaining.saturating_sub(elapsed);
        remaining.is_zero()
    }

    /// Credits a side's clock with the increment.
    pub fn reward(&mut self, side: Color) {
        self.remaining[side.index()] = self.remaining[side.index()].saturating_add(self.increment);
    }
}

impl Default for Clock {
    #[inline(always)]
    fn default() -> Self {
        Clock::new(TimeControl::default())
    }
}
