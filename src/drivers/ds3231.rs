//! DS3231 real-time clock.
//!
//! Thin [`ClockSource`] adapter over the `ds323x` driver. Register access,
//! BCD coding and 12h/24h handling live in the driver; this file maps its
//! calendar types onto [`ClockReading`] and its errors onto [`ClockError`].
//! Alarms, square-wave output and the temperature sensor are left alone.

use ds323x::interface::I2cInterface;
use ds323x::{DateTimeAccess, Datelike, Ds323x, NaiveDate, NaiveDateTime, Rtcc, Timelike, ic};
use embedded_hal::i2c::I2c;
use log::{debug, info};

use crate::app::ports::ClockSource;
use crate::clock::ClockReading;
use crate::error::ClockError;

/// Fixed 7-bit bus address of the chip.
pub const ADDRESS: u8 = 0x68;

pub struct Ds3231<I2C> {
    rtc: Ds323x<I2cInterface<I2C>, ic::DS3231>,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            rtc: Ds323x::new_ds3231(i2c),
        }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.rtc.destroy_ds3231()
    }
}

fn map_err<E>(what: &str, e: ds323x::Error<E>) -> ClockError {
    match e {
        ds323x::Error::Comm(_) => {
            debug!("ds3231: {} failed on the bus", what);
            ClockError::Bus
        }
        _ => {
            debug!("ds3231: {} rejected by the driver", what);
            ClockError::InvalidReading
        }
    }
}

impl<I2C: I2c> ClockSource for Ds3231<I2C> {
    fn now(&mut self) -> Result<ClockReading, ClockError> {
        let dt = self.rtc.datetime().map_err(|e| map_err("read", e))?;
        to_reading(&dt)
    }

    fn lost_power(&mut self) -> Result<bool, ClockError> {
        self.rtc
            .has_been_stopped()
            .map_err(|e| map_err("status read", e))
    }

    fn adjust(&mut self, reading: &ClockReading) -> Result<(), ClockError> {
        let dt = to_datetime(reading)?;
        self.rtc
            .set_datetime(&dt)
            .map_err(|e| map_err("set time", e))?;
        self.rtc
            .set_weekday(dow_register(reading))
            .map_err(|e| map_err("set weekday", e))?;
        // Time is valid again.
        self.rtc
            .clear_has_been_stopped_flag()
            .map_err(|e| map_err("clear OSF", e))?;

        info!("ds3231: clock set to {}", reading);
        Ok(())
    }
}

// ── Calendar conversion ───────────────────────────────────────

fn to_reading(dt: &NaiveDateTime) -> Result<ClockReading, ClockError> {
    let year = u16::try_from(dt.year()).map_err(|_| ClockError::InvalidReading)?;
    ClockReading::new(
        year,
        dt.month() as u8,
        dt.day() as u8,
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
    )
    .map_err(|_| ClockError::InvalidReading)
}

fn to_datetime(t: &ClockReading) -> Result<NaiveDateTime, ClockError> {
    // The chip only stores two year digits.
    if !(2000..=2099).contains(&t.year()) {
        return Err(ClockError::OutOfRange);
    }
    NaiveDate::from_ymd_opt(i32::from(t.year()), u32::from(t.month()), u32::from(t.day()))
        .and_then(|d| {
            d.and_hms_opt(
                u32::from(t.hour()),
                u32::from(t.minute()),
                u32::from(t.second()),
            )
        })
        .ok_or(ClockError::OutOfRange)
}

/// Weekday register value: 1–7, Monday = 1, Sunday = 7.
fn dow_register(t: &ClockReading) -> u8 {
    match t.weekday() {
        0 => 7,
        d => d,
    }
}
