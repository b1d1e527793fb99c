//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (RTC, LCD, config storage, event sinks) implement these
//! traits. The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly. Relay and
//! LED lines use `embedded_hal::digital::OutputPin` directly.

use crate::clock::ClockReading;
use crate::config::SystemConfig;
use crate::display::glyphs::Glyph;
use crate::error::{ClockError, DisplayError};

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: RTC → domain)
// ───────────────────────────────────────────────────────────────

/// Battery-backed wall clock.
pub trait ClockSource {
    /// Current date and time.
    fn now(&mut self) -> Result<ClockReading, ClockError>;

    /// Whether the clock stopped at some point (e.g. battery ran flat) and
    /// its time can no longer be trusted.
    fn lost_power(&mut self) -> Result<bool, ClockError>;

    /// Set the clock. Also clears any lost-power indication.
    fn adjust(&mut self, reading: &ClockReading) -> Result<(), ClockError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character LCD)
// ───────────────────────────────────────────────────────────────

/// Fixed-size character grid with eight user-definable glyphs.
///
/// Rows and columns are zero-based. Output only; nothing is read back.
pub trait DisplaySink {
    fn clear(&mut self) -> Result<(), DisplayError>;

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Store `glyph` in custom character `slot` (0–7).
    fn define_glyph(&mut self, slot: u8, glyph: &Glyph) -> Result<(), DisplayError>;

    /// Write `text` starting at (`row`, `col`), clipped at the right edge.
    fn write_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Draw custom character `slot` at (`row`, `col`).
    fn write_glyph(&mut self, row: u8, col: u8, slot: u8) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting and
/// reject invalid ranges with [`ConfigError::ValidationFailed`] rather than
/// clamping them.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
