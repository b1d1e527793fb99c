//! Time-change detection.
//!
//! The main loop polls the RTC far faster than the RTC ticks. The poller
//! turns that stream of samples into one "time advanced" edge per distinct
//! second, and never moves its notion of "now" backwards when the clock
//! glitches.

use log::debug;

use super::ClockReading;
use crate::app::ports::ClockSource;

/// Remembers the latest reading seen and reports strict advances.
#[derive(Debug, Clone)]
pub struct TimeChangePoller {
    last_observed: ClockReading,
}

impl TimeChangePoller {
    /// Seed the poller with the reading taken at boot.
    pub fn new(initial: ClockReading) -> Self {
        Self {
            last_observed: initial,
        }
    }

    /// Sample `clock` and return `true` if it moved strictly past the last
    /// observed reading.
    ///
    /// Equal or earlier samples leave the state untouched. A failed read is
    /// reported as "no change".
    pub fn check_time(&mut self, clock: &mut impl ClockSource) -> bool {
        match clock.now() {
            Ok(reading) => self.observe(reading),
            Err(e) => {
                debug!("clock read failed ({}), treating as no change", e);
                false
            }
        }
    }

    /// Compare an already-sampled reading against the last observed one.
    pub fn observe(&mut self, reading: ClockReading) -> bool {
        if reading > self.last_observed {
            self.last_observed = reading;
            true
        } else {
            false
        }
    }

    /// The most recent reading that counted as an advance (or the boot reading).
    pub fn last_observed(&self) -> ClockReading {
        self.last_observed
    }
}
