//! Aromatron Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Ds3231 (ClockSource)   I2cLcd (DisplaySink)                   │
//! │  NvsAdapter (Config)    LogEventSink (EventSink)               │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  RelayController · TimeChangePoller                    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, PinDriver, Pull};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info, warn};

use aromatron::adapters::log_sink::LogEventSink;
use aromatron::adapters::nvs::NvsAdapter;
use aromatron::app::boot;
use aromatron::app::ports::ConfigPort;
use aromatron::app::service::AppService;
use aromatron::config::{self, SystemConfig};
use aromatron::drivers::ds3231::Ds3231;
use aromatron::drivers::lcd::I2cLcd;
use aromatron::drivers::relay::RelayController;
use aromatron::pins;

/// Pause between clock polls. Yields to FreeRTOS so the idle task can feed
/// the task watchdog.
const POLL_INTERVAL_MS: u32 = 50;

/// Park the main task. Called from `main` so every pin driver stays alive
/// and the relay stays held off.
fn halt() -> ! {
    error!("Halting with relay off");
    loop {
        FreeRtos::delay_ms(1_000);
    }
}

/// Unwrap a start-up step that runs once the relay is held off; on failure
/// log and park instead of returning, which would drop the pin drivers.
fn or_halt<T, E: core::fmt::Display>(res: Result<T, E>, what: &str) -> T {
    match res {
        Ok(v) => v,
        Err(e) => {
            error!("{} failed: {}", what, e);
            halt();
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Aromatron v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let peripherals = Peripherals::take()?;

    // ── 2. Relay off before anything else ─────────────────────
    // SAFETY: each GPIO number in `pins` is claimed exactly once, here.
    let relay_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::RELAY_GPIO) })?;
    let relay_led = PinDriver::output(unsafe { AnyOutputPin::new(pins::RELAY_LED_GPIO) })?;
    let mut relay = RelayController::new(relay_pin, relay_led, pins::RELAY_POLARITY)?;

    // Outputs with no behaviour yet are parked low; inputs get pull-ups so
    // they do not float.
    let mut armed_led = or_halt(
        PinDriver::output(unsafe { AnyOutputPin::new(pins::ARMED_LED_GPIO) }),
        "armed LED",
    );
    or_halt(armed_led.set_low(), "armed LED");
    let mut buzzer = or_halt(
        PinDriver::output(unsafe { AnyOutputPin::new(pins::BUZZER_GPIO) }),
        "buzzer",
    );
    or_halt(buzzer.set_low(), "buzzer");

    let mut inputs = Vec::new();
    for gpio in [
        pins::ENCODER_A_GPIO,
        pins::ENCODER_B_GPIO,
        pins::ENCODER_BUTTON_GPIO,
        pins::ARM_BUTTON_GPIO,
    ] {
        let mut pin = or_halt(
            PinDriver::input(unsafe { AnyInputPin::new(gpio) }),
            "input pin",
        );
        or_halt(pin.set_pull(Pull::Up), "input pull-up");
        inputs.push(pin);
    }

    // ── 3. Load config from NVS (or defaults) ─────────────────
    let config = match NvsAdapter::with_offset(config::STORAGE_OFFSET) {
        Ok(nvs) => match nvs.load() {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("NVS config load failed ({}), using defaults", e);
                SystemConfig::default()
            }
        },
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults", e);
            SystemConfig::default()
        }
    };
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config not printable: {}", e),
    }
    or_halt(relay.set_polarity(config.relay_polarity), "relay polarity");

    // ── 4. I2C buses ──────────────────────────────────────────
    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ));
    let rtc_bus = or_halt(
        I2cDriver::new(
            peripherals.i2c0,
            unsafe { AnyIOPin::new(pins::RTC_SDA_GPIO) },
            unsafe { AnyIOPin::new(pins::RTC_SCL_GPIO) },
            &i2c_config,
        ),
        "RTC bus",
    );
    let mut lcd_bus = or_halt(
        I2cDriver::new(
            peripherals.i2c1,
            unsafe { AnyIOPin::new(pins::LCD_SDA_GPIO) },
            unsafe { AnyIOPin::new(pins::LCD_SCL_GPIO) },
            &i2c_config,
        ),
        "LCD bus",
    );

    let mut rtc = Ds3231::new(rtc_bus);
    let mut lcd_delay = FreeRtos;
    let mut lcd = or_halt(
        I2cLcd::new(
            &mut lcd_bus,
            &mut lcd_delay,
            config.lcd_address,
            config.lcd_columns,
            config.lcd_rows,
        ),
        "LCD init",
    );
    let mut sink = LogEventSink::new();

    // ── 5. Boot ───────────────────────────────────────────────
    let seed = or_halt(
        boot::boot(&config, &mut lcd, &mut rtc, &mut FreeRtos, &mut sink),
        "Boot",
    );

    let mut app = AppService::new(relay, seed);
    info!("System ready. Entering poll loop.");

    // ── 6. Poll loop ──────────────────────────────────────────
    loop {
        app.tick(&mut rtc, &mut sink);
        FreeRtos::delay_ms(POLL_INTERVAL_MS);
    }
}
