//! Unified error types for the Aromatron firmware.
//!
//! Each collaborator (clock, display, relay pins) has its own small `Copy`
//! error enum; the boot path funnels them into [`Error`] so the entry point
//! has a single thing to log.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible boot-time operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The real-time clock could not be read or set.
    Clock(ClockError),
    /// The character display rejected a command.
    Display(DisplayError),
    /// A relay or indicator pin write failed.
    Relay(RelayError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clock(e) => write!(f, "clock: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Relay(e) => write!(f, "relay: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Clock errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// I2C transfer to the RTC failed.
    Bus,
    /// The RTC returned register contents that are not a valid date/time.
    InvalidReading,
    /// The timestamp cannot be stored by this clock (e.g. year outside 2000–2099).
    OutOfRange,
    /// A textual timestamp did not match `YYYY-MM-DDTHH:MM:SS`.
    Parse,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "RTC bus error"),
            Self::InvalidReading => write!(f, "invalid date/time"),
            Self::OutOfRange => write!(f, "timestamp out of range"),
            Self::Parse => write!(f, "malformed timestamp"),
        }
    }
}

impl core::error::Error for ClockError {}

impl From<ClockError> for Error {
    fn from(e: ClockError) -> Self {
        Self::Clock(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// I2C transfer to the LCD backpack failed.
    Bus,
    /// Row/column outside the character grid.
    OutOfBounds,
    /// Custom glyph slot outside 0–7.
    InvalidSlot,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "LCD bus error"),
            Self::OutOfBounds => write!(f, "position outside display"),
            Self::InvalidSlot => write!(f, "glyph slot must be 0-7"),
        }
    }
}

impl core::error::Error for DisplayError {}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Relay errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayError {
    /// Writing the relay control line failed; the indicator was not touched.
    RelayPin,
    /// The relay was switched but the indicator LED write failed.
    IndicatorPin,
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RelayPin => write!(f, "relay pin write failed"),
            Self::IndicatorPin => write!(f, "indicator pin write failed"),
        }
    }
}

impl core::error::Error for RelayError {}

impl From<RelayError> for Error {
    fn from(e: RelayError) -> Self {
        Self::Relay(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
