//! Boot screen and glyph registration.
//!
//! Everything here talks to a [`DisplaySink`]; the actual LCD protocol lives
//! in [`crate::drivers::lcd`].

pub mod glyphs;

use core::fmt::Write as _;

use heapless::String;
use log::info;

use crate::app::ports::DisplaySink;
use crate::error::DisplayError;
use glyphs::{GLYPH_TABLE, GlyphSlot};

/// Widest line any supported display can show.
const MAX_COLUMNS: usize = 40;

/// Second boot-screen line: the author credit.
const TAGLINE: &str = "by Leo Keil";

/// Load all custom glyphs into the display's character RAM.
pub fn register_glyphs(display: &mut impl DisplaySink) -> Result<(), DisplayError> {
    for (slot, glyph) in &GLYPH_TABLE {
        display.define_glyph(slot.index(), glyph)?;
    }
    Ok(())
}

/// Title line, `"Aromatron v<major>.<minor>"`, clipped to leave the last column
/// free for the heart glyph.
pub fn title_line(columns: u8) -> String<MAX_COLUMNS> {
    let mut line: String<MAX_COLUMNS> = String::new();
    // Overflow only truncates.
    let _ = write!(
        line,
        "Aromatron v{}.{}",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR")
    );
    let width = (columns as usize).saturating_sub(1).min(MAX_COLUMNS);
    line.truncate(width.min(line.len()));
    line
}

/// Bring the display up and draw the boot screen.
pub fn show_boot_screen(display: &mut impl DisplaySink, columns: u8) -> Result<(), DisplayError> {
    display.set_backlight(true)?;
    register_glyphs(display)?;
    display.clear()?;

    display.write_text(0, 0, &title_line(columns))?;
    display.write_glyph(0, columns.saturating_sub(1), GlyphSlot::CoffeeHeart.index())?;
    display.write_text(1, 0, TAGLINE)?;

    info!("display: boot screen shown");
    Ok(())
}
