//! One-shot boot sequence.
//!
//! Runs after the relay has already been forced off (see
//! [`RelayController::new`](crate::drivers::relay::RelayController::new)):
//!
//! 1. boot screen and custom glyphs on the LCD
//! 2. RTC lost-power check, then optional reset to the build timestamp
//! 3. first clock sample, which seeds the time-change poller
//! 4. hold the boot screen, clear the LCD

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use super::events::AppEvent;
use super::ports::{ClockSource, DisplaySink, EventSink};
use crate::clock::{self, ClockReading};
use crate::config::SystemConfig;
use crate::display;
use crate::error::Result;

/// Bring up display and clock. Returns the clock reading to seed the
/// poller with.
///
/// Display failures are logged and skipped; the LCD is only an output.
/// Clock failures abort boot because there is nothing to poll without one.
pub fn boot(
    config: &SystemConfig,
    lcd: &mut impl DisplaySink,
    rtc: &mut impl ClockSource,
    delay: &mut impl DelayNs,
    sink: &mut impl EventSink,
) -> Result<ClockReading> {
    if let Err(e) = display::show_boot_screen(lcd, config.lcd_columns) {
        warn!("boot: display unavailable ({}), continuing without it", e);
    }

    // Sample before adjusting: setting the clock clears the flag.
    let lost_power = rtc.lost_power()?;

    if config.sync_clock_to_build_time {
        let built = clock::build_time()?;
        rtc.adjust(&built)?;
        info!("boot: RTC set to build time {}", built);
        sink.emit(&AppEvent::ClockSetToBuildTime(built));
    }

    if lost_power {
        // TODO: open the time-entry dialog once the rotary menu exists.
        warn!("boot: RTC lost power since it was last set");
        sink.emit(&AppEvent::ClockLostPower);
    }

    let seed = rtc.now()?;

    delay.delay_ms(config.boot_screen_ms);
    if let Err(e) = lcd.clear() {
        warn!("boot: display clear failed ({})", e);
    }

    info!("boot: complete at {}", seed);
    sink.emit(&AppEvent::Booted { at: seed });
    Ok(seed)
}
