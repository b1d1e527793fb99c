//! System configuration parameters
//!
//! All tunable parameters for the Aromatron timer.
//! Values are loaded from NVS at boot; defaults apply on first boot.

use serde::{Deserialize, Serialize};

use crate::drivers::relay::RelayPolarity;
use crate::pins;

/// Settings slot this firmware image reads and writes. Raise it to move the
/// persisted settings to a fresh NVS key, e.g. after a layout change.
pub const STORAGE_OFFSET: u16 = 0;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Relay ---
    /// Logic level convention of the relay module's control input.
    pub relay_polarity: RelayPolarity,

    // --- Clock ---
    /// Overwrite the RTC with the firmware build time on every boot.
    pub sync_clock_to_build_time: bool,

    // --- Display ---
    /// How long the boot screen stays up (milliseconds).
    pub boot_screen_ms: u32,
    /// 7-bit I2C address of the LCD backpack.
    pub lcd_address: u8,
    pub lcd_columns: u8,
    pub lcd_rows: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Relay
            relay_polarity: pins::RELAY_POLARITY,

            // Clock
            sync_clock_to_build_time: true,

            // Display
            boot_screen_ms: 500,
            lcd_address: 0x27, // PCF8574 with A0-A2 high
            lcd_columns: 16,
            lcd_rows: 2,
        }
    }
}
