//! Application core: pure domain logic, zero I/O.
//!
//! Relay control, time-change detection and the boot sequence. All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`] (plus embedded-hal pins and delays), keeping this layer fully
//! testable without real peripherals.

pub mod boot;
pub mod events;
pub mod ports;
pub mod service;
