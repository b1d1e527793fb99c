//! Wall-clock timestamps and time-change detection.
//!
//! [`ClockReading`] is what a [`ClockSource`](crate::app::ports::ClockSource)
//! hands back: a validated calendar date and time of day with a total order
//! over (year, month, day, hour, minute, second).

pub mod poller;

use core::fmt;
use core::str::FromStr;

use crate::error::ClockError;

/// Timestamp the firmware was built at, in local time.
const BUILD_TIME: &str = env!("AROMATRON_BUILD_TIME");

/// A single sample of the real-time clock.
///
/// Field order matters: the derived `Ord` compares year first and second
/// last, which is exactly chronological order for valid readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockReading {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl ClockReading {
    /// Build a reading, rejecting impossible dates and times.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, ClockError> {
        if !(1..=12).contains(&month)
            || day == 0
            || day > days_in_month(year, month)
            || hour > 23
            || minute > 59
            || second > 59
        {
            return Err(ClockError::InvalidReading);
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// Day of the week, 0 = Sunday … 6 = Saturday.
    pub fn weekday(&self) -> u8 {
        // Sakamoto's method.
        const OFFSETS: [u32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let year = u32::from(self.year);
        let y = if self.month < 3 {
            year.saturating_sub(1)
        } else {
            year
        };
        let idx = (self.month - 1) as usize;
        ((y + y / 4 - y / 100 + y / 400 + OFFSETS[idx] + u32::from(self.day)) % 7) as u8
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for ClockReading {
    type Err = ClockError;

    /// Parse `YYYY-MM-DDTHH:MM:SS`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 19 {
            return Err(ClockError::Parse);
        }
        for (i, &c) in b.iter().enumerate() {
            let ok = match i {
                4 | 7 => c == b'-',
                10 => c == b'T',
                13 | 16 => c == b':',
                _ => c.is_ascii_digit(),
            };
            if !ok {
                return Err(ClockError::Parse);
            }
        }
        let field = |range: core::ops::Range<usize>| -> u16 {
            b[range]
                .iter()
                .fold(0u16, |acc, &c| acc * 10 + u16::from(c - b'0'))
        };
        let year = field(0..4);
        let month = field(5..7);
        let day = field(8..10);
        let hour = field(11..13);
        let minute = field(14..16);
        let second = field(17..19);
        Self::new(
            year,
            month as u8,
            day as u8,
            hour as u8,
            minute as u8,
            second as u8,
        )
    }
}

/// The moment this firmware image was built.
pub fn build_time() -> Result<ClockReading, ClockError> {
    BUILD_TIME.parse()
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
