//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them.

use crate::clock::ClockReading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Boot finished; carries the clock reading the poller was seeded with.
    Booted { at: ClockReading },

    /// The clock moved past the last observed reading.
    TimeAdvanced(ClockReading),

    /// The relay was switched.
    RelayChanged { on: bool },

    /// The RTC reported that it stopped at some point since it was last set.
    ClockLostPower,

    /// The RTC was overwritten with the firmware build time.
    ClockSetToBuildTime(ClockReading),
}
