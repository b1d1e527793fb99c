//! HD44780 character LCD behind a PCF8574 I²C backpack.
//!
//! Thin [`DisplaySink`] adapter over the `lcd-lcm1602-i2c` driver, which
//! owns the 4-bit protocol and init sequence. This side keeps the grid
//! bounds, the glyph slot range and the character filtering.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::String;
use lcd_lcm1602_i2c::Backlight;
use lcd_lcm1602_i2c::sync_lcd::Lcd;
use log::{debug, info};

use crate::app::ports::DisplaySink;
use crate::display::glyphs::Glyph;
use crate::error::DisplayError;

/// Widest supported display.
const MAX_COLUMNS: usize = 40;
/// HD44780 CGRAM holds eight 5x8 characters.
const GLYPH_SLOTS: u8 = 8;

pub struct I2cLcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    lcd: Lcd<'a, I, D>,
    columns: u8,
    rows: u8,
}

fn bus_error(what: &str) -> DisplayError {
    debug!("lcd: {} failed on the bus", what);
    DisplayError::Bus
}

impl<'a, I, D> I2cLcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    /// Run the power-on init sequence and return a cleared display.
    pub fn new(
        i2c: &'a mut I,
        delay: &'a mut D,
        address: u8,
        columns: u8,
        rows: u8,
    ) -> Result<Self, DisplayError> {
        let columns = columns.clamp(1, MAX_COLUMNS as u8);
        let rows = rows.clamp(1, 4);
        let lcd = Lcd::new(i2c, delay)
            .with_address(address)
            .with_rows(rows)
            .with_cursor_on(false)
            .init()
            .map_err(|_| bus_error("init"))?;
        info!("lcd: {}x{} ready at 0x{:02x}", columns, rows, address);
        Ok(Self { lcd, columns, rows })
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= self.rows || col >= self.columns {
            return Err(DisplayError::OutOfBounds);
        }
        self.lcd
            .set_cursor(row, col)
            .map_err(|_| bus_error("set cursor"))
    }
}

/// The part of `text` that fits in `room` cells, with anything the
/// character ROM cannot show replaced by `?`.
fn printable(text: &str, room: usize) -> String<MAX_COLUMNS> {
    text.chars()
        .take(room.min(MAX_COLUMNS))
        .map(|ch| {
            if ch.is_ascii() && !ch.is_ascii_control() {
                ch
            } else {
                '?'
            }
        })
        .collect()
}

fn check_slot(slot: u8) -> Result<(), DisplayError> {
    if slot >= GLYPH_SLOTS {
        return Err(DisplayError::InvalidSlot);
    }
    Ok(())
}

impl<I, D> DisplaySink for I2cLcd<'_, I, D>
where
    I: I2c,
    D: DelayNs,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.lcd.clear().map_err(|_| bus_error("clear"))
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        let level = if on { Backlight::On } else { Backlight::Off };
        self.lcd.backlight(level).map_err(|_| bus_error("backlight"))
    }

    fn define_glyph(&mut self, slot: u8, glyph: &Glyph) -> Result<(), DisplayError> {
        check_slot(slot)?;
        let rows = glyph.rows.map(|r| r & 0x1F);
        self.lcd
            .custom_char(slot, &rows)
            .map_err(|_| bus_error("define glyph"))
    }

    fn write_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(row, col)?;
        let visible = printable(text, (self.columns - col) as usize);
        self.lcd
            .write_str(&visible)
            .map_err(|_| bus_error("write text"))
    }

    fn write_glyph(&mut self, row: u8, col: u8, slot: u8) -> Result<(), DisplayError> {
        check_slot(slot)?;
        self.set_cursor(row, col)?;
        self.lcd
            .write_custom_char(slot)
            .map_err(|_| bus_error("write glyph"))
    }
}
