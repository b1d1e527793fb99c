//! Aromatron firmware library.
//!
//! Exposes the pure-logic modules and the embedded-hal drivers for
//! integration testing. ESP-IDF-specific code is guarded by
//! `#[cfg(feature = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
