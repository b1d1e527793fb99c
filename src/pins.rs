//! GPIO / peripheral pin assignments for the Aromatron controller board.
//!
//! Single source of truth: the firmware entry point claims pins by these
//! numbers and nothing else hard-codes them.

use crate::drivers::relay::RelayPolarity;

// ---------------------------------------------------------------------------
// Relay (bridges the coffee machine's mains switch)
// ---------------------------------------------------------------------------

/// Digital output to the relay module's IN pin.
pub const RELAY_GPIO: i32 = 12;
/// The relay module energises its coil when IN is pulled LOW.
pub const RELAY_POLARITY: RelayPolarity = RelayPolarity::ActiveLow;

// ---------------------------------------------------------------------------
// Indicator LEDs (active HIGH)
// ---------------------------------------------------------------------------

/// Green LED: lit while the relay is on.
pub const RELAY_LED_GPIO: i32 = 8;
/// Red LED: armed indicator, held off until alarms exist.
pub const ARMED_LED_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Piezo buzzer
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// User input (active-low with pull-ups)
// ---------------------------------------------------------------------------

/// Rotary encoder quadrature channel A.
pub const ENCODER_A_GPIO: i32 = 2;
/// Rotary encoder quadrature channel B.
pub const ENCODER_B_GPIO: i32 = 3;
/// Rotary encoder push-button.
pub const ENCODER_BUTTON_GPIO: i32 = 4;
/// Arm/disarm push-button.
pub const ARM_BUTTON_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// I²C buses
// ---------------------------------------------------------------------------

/// I2C0: DS3231 real-time clock.
pub const RTC_SDA_GPIO: i32 = 14;
pub const RTC_SCL_GPIO: i32 = 15;

/// I2C1: 16x2 LCD behind a PCF8574 backpack.
pub const LCD_SDA_GPIO: i32 = 17;
pub const LCD_SCL_GPIO: i32 = 18;

/// Bus clock for both I2C peripherals (standard mode).
pub const I2C_FREQ_HZ: u32 = 100_000;
