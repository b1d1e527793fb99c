//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Booted { at } => {
                info!("BOOT  | ready at {}", at);
            }
            AppEvent::TimeAdvanced(now) => {
                info!("TIME  | {}", now);
            }
            AppEvent::RelayChanged { on } => {
                info!("RELAY | {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::ClockLostPower => {
                info!("CLOCK | lost power, time untrusted");
            }
            AppEvent::ClockSetToBuildTime(t) => {
                info!("CLOCK | set to build time {}", t);
            }
        }
    }
}
