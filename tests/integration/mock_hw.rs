//! Mock hardware for integration tests.
//!
//! Pins, display and clock all append to one shared [`Journal`] so tests can
//! assert on the global order of hardware operations, not just per-device
//! history.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use aromatron::app::events::AppEvent;
use aromatron::app::ports::{ClockSource, DisplaySink, EventSink};
use aromatron::clock::ClockReading;
use aromatron::display::glyphs::Glyph;
use aromatron::error::{ClockError, DisplayError};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

// ── Journal ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwOp {
    Pin { name: &'static str, high: bool },
    Display(DisplayOp),
    ClockRead,
    ClockAdjust(ClockReading),
    Delay { ms: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOp {
    Clear,
    Backlight(bool),
    DefineGlyph(u8),
    Text { row: u8, col: u8, text: String },
    Glyph { row: u8, col: u8, slot: u8 },
}

#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<HwOp>>>);

#[allow(dead_code)]
impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, op: HwOp) {
        self.0.borrow_mut().push(op);
    }

    pub fn ops(&self) -> Vec<HwOp> {
        self.0.borrow().clone()
    }

    /// Every level written to the named pin, oldest first.
    pub fn pin_levels(&self, name: &str) -> Vec<bool> {
        self.0
            .borrow()
            .iter()
            .filter_map(|op| match op {
                HwOp::Pin { name: n, high } if *n == name => Some(*high),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, pred: impl Fn(&HwOp) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(pred)
    }
}

// ── Pins ──────────────────────────────────────────────────────

pub struct JournalPin {
    name: &'static str,
    journal: Journal,
    broken: bool,
}

#[allow(dead_code)]
impl JournalPin {
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
            broken: false,
        }
    }

    /// A pin whose every write fails and leaves no journal entry.
    pub fn broken(name: &'static str, journal: &Journal) -> Self {
        Self {
            broken: true,
            ..Self::new(name, journal)
        }
    }

    fn write(&mut self, high: bool) -> Result<(), ErrorKind> {
        if self.broken {
            return Err(ErrorKind::Other);
        }
        self.journal.push(HwOp::Pin {
            name: self.name,
            high,
        });
        Ok(())
    }
}

impl ErrorType for JournalPin {
    type Error = ErrorKind;
}

impl OutputPin for JournalPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

// ── Display ───────────────────────────────────────────────────

pub struct MockDisplay {
    journal: Journal,
    pub offline: bool,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            offline: false,
        }
    }

    pub fn offline(journal: &Journal) -> Self {
        Self {
            offline: true,
            ..Self::new(journal)
        }
    }

    fn record(&mut self, op: DisplayOp) -> Result<(), DisplayError> {
        if self.offline {
            return Err(DisplayError::Bus);
        }
        self.journal.push(HwOp::Display(op));
        Ok(())
    }
}

impl DisplaySink for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.record(DisplayOp::Clear)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.record(DisplayOp::Backlight(on))
    }

    fn define_glyph(&mut self, slot: u8, _glyph: &Glyph) -> Result<(), DisplayError> {
        self.record(DisplayOp::DefineGlyph(slot))
    }

    fn write_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.record(DisplayOp::Text {
            row,
            col,
            text: text.to_string(),
        })
    }

    fn write_glyph(&mut self, row: u8, col: u8, slot: u8) -> Result<(), DisplayError> {
        self.record(DisplayOp::Glyph { row, col, slot })
    }
}

// ── Clock ─────────────────────────────────────────────────────

/// Clock that replays a script of readings, then keeps returning the last
/// good one.
pub struct ScriptedClock {
    journal: Journal,
    current: ClockReading,
    script: VecDeque<Result<ClockReading, ClockError>>,
    pub lost_power: bool,
}

#[allow(dead_code)]
impl ScriptedClock {
    pub fn new(journal: &Journal, start: ClockReading) -> Self {
        Self {
            journal: journal.clone(),
            current: start,
            script: VecDeque::new(),
            lost_power: false,
        }
    }

    pub fn then(mut self, reading: ClockReading) -> Self {
        self.script.push_back(Ok(reading));
        self
    }

    pub fn then_fail(mut self, err: ClockError) -> Self {
        self.script.push_back(Err(err));
        self
    }

    pub fn push(&mut self, reading: ClockReading) {
        self.script.push_back(Ok(reading));
    }
}

impl ClockSource for ScriptedClock {
    fn now(&mut self) -> Result<ClockReading, ClockError> {
        self.journal.push(HwOp::ClockRead);
        match self.script.pop_front() {
            Some(Ok(r)) => {
                self.current = r;
                Ok(r)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.current),
        }
    }

    fn lost_power(&mut self) -> Result<bool, ClockError> {
        Ok(self.lost_power)
    }

    fn adjust(&mut self, reading: &ClockReading) -> Result<(), ClockError> {
        self.journal.push(HwOp::ClockAdjust(*reading));
        self.current = *reading;
        self.lost_power = false;
        Ok(())
    }
}

// ── Delay ─────────────────────────────────────────────────────

pub struct JournalDelay(Journal);

impl JournalDelay {
    pub fn new(journal: &Journal) -> Self {
        Self(journal.clone())
    }
}

impl DelayNs for JournalDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(HwOp::Delay { ms });
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

pub fn at(s: &str) -> ClockReading {
    s.parse().expect("valid timestamp literal")
}
