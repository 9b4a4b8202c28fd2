//! Application core — pure domain logic, zero I/O.
//!
//! Decoding a command byte, sequencing its pulse and acknowledging it.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod dispatcher;
pub mod ports;
pub mod pulse;
