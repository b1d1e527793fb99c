//! Device drivers: relay outputs, DS3231 real-time clock, HD44780 LCD on a
//! PCF8574 I2C backpack.

pub mod ds3231;
pub mod lcd;
pub mod relay;
