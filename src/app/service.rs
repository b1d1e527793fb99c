//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the relay controller and the time-change poller, the
//! only mutable state the firmware has. The main loop owns the service and
//! passes the clock and event sink in on every call.
//!
//! ```text
//!  ClockSource ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                  │      AppService       │
//!   relay pins  ◀──│  Relay · TimePoller   │
//!                  └──────────────────────┘
//! ```

use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use crate::clock::ClockReading;
use crate::clock::poller::TimeChangePoller;
use crate::drivers::relay::RelayController;
use crate::error::RelayError;

use super::events::AppEvent;
use super::ports::{ClockSource, EventSink};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService<R, L> {
    relay: RelayController<R, L>,
    poller: TimeChangePoller,
    tick_count: u64,
}

impl<R: OutputPin, L: OutputPin> AppService<R, L> {
    /// `seed` is the clock reading taken at the end of boot.
    pub fn new(relay: RelayController<R, L>, seed: ClockReading) -> Self {
        info!("AppService started at {}", seed);
        Self {
            relay,
            poller: TimeChangePoller::new(seed),
            tick_count: 0,
        }
    }

    // ── Per-iteration polling ─────────────────────────────────

    /// Poll the clock once. Returns `true` when the time advanced since
    /// the previous poll.
    pub fn tick(&mut self, clock: &mut impl ClockSource, sink: &mut impl EventSink) -> bool {
        self.tick_count += 1;
        if !self.poller.check_time(clock) {
            return false;
        }
        let now = self.poller.last_observed();
        debug!("time advanced to {}", now);
        sink.emit(&AppEvent::TimeAdvanced(now));
        true
    }

    // ── Relay ─────────────────────────────────────────────────

    /// Switch the relay and its indicator LED.
    pub fn set_relay(&mut self, on: bool, sink: &mut impl EventSink) -> Result<(), RelayError> {
        match self.relay.set_relay(on) {
            Ok(()) => {
                sink.emit(&AppEvent::RelayChanged { on });
                Ok(())
            }
            Err(e) => {
                warn!("relay switch to {} failed: {}", on, e);
                Err(e)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn relay_on(&self) -> bool {
        self.relay.is_on()
    }

    /// Most recent clock reading that counted as an advance.
    pub fn last_observed(&self) -> ClockReading {
        self.poller.last_observed()
    }

    /// Total polls since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
