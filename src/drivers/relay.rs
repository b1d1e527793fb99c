//! Mains relay driver with its status LED.
//!
//! The relay bridges the coffee machine's power switch; the green LED
//! mirrors it. Both lines are written on every call, relay first, so the
//! LED never claims a state the relay has not been commanded into.
//!
//! ## Safety contract
//!
//! Constructing a [`RelayController`] switches the relay off before
//! returning. Build it before any slow peripheral init (LCD, RTC) so the
//! relay line spends as little time as possible floating.

use embedded_hal::digital::OutputPin;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Which logic level on the control line energises the relay coil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayPolarity {
    /// HIGH = relay on.
    ActiveHigh,
    /// LOW = relay on (typical opto-isolated relay boards).
    ActiveLow,
}

impl RelayPolarity {
    /// Control line level (`true` = HIGH) for the requested relay state.
    pub const fn line_level(self, on: bool) -> bool {
        match self {
            Self::ActiveHigh => on,
            Self::ActiveLow => !on,
        }
    }
}

pub struct RelayController<R, L> {
    relay: R,
    indicator: L,
    polarity: RelayPolarity,
    on: bool,
}

impl<R: OutputPin, L: OutputPin> RelayController<R, L> {
    /// Take ownership of the relay and indicator pins and switch the relay off.
    pub fn new(relay: R, indicator: L, polarity: RelayPolarity) -> Result<Self, RelayError> {
        let mut ctl = Self {
            relay,
            indicator,
            polarity,
            on: false,
        };
        ctl.set_relay(false)?;
        info!("relay: safe default applied ({:?})", polarity);
        Ok(ctl)
    }

    /// Switch the relay and its indicator LED together.
    ///
    /// If the relay line write fails the LED is not touched and the
    /// recorded state is unchanged. If only the LED write fails the relay
    /// has already moved, so the new state is recorded before the error is
    /// returned.
    pub fn set_relay(&mut self, turn_on: bool) -> Result<(), RelayError> {
        self.apply(self.polarity, turn_on)
    }

    /// Last state the relay line was successfully driven to.
    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn polarity(&self) -> RelayPolarity {
        self.polarity
    }

    /// Switch to a different line convention and re-drive the current
    /// state with it.
    pub fn set_polarity(&mut self, polarity: RelayPolarity) -> Result<(), RelayError> {
        if polarity == self.polarity {
            return Ok(());
        }
        info!("relay: polarity {:?} -> {:?}", self.polarity, polarity);
        self.apply(polarity, self.on)
    }

    /// Drive the relay line for `turn_on` under `polarity`, then the LED.
    /// State and polarity are recorded only once the relay line accepted
    /// the write.
    fn apply(&mut self, polarity: RelayPolarity, turn_on: bool) -> Result<(), RelayError> {
        drive(&mut self.relay, polarity.line_level(turn_on)).map_err(|()| RelayError::RelayPin)?;
        self.polarity = polarity;
        self.on = turn_on;
        drive(&mut self.indicator, turn_on).map_err(|()| RelayError::IndicatorPin)
    }
}

fn drive(pin: &mut impl OutputPin, high: bool) -> Result<(), ()> {
    let res = if high { pin.set_high() } else { pin.set_low() };
    res.map_err(|_| ())
}
