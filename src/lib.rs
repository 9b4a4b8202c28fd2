//! tagwave bridge firmware library.
//!
//! Turns single ASCII digits received over a serial link into trigger
//! pulses on a 4-bit discrete output bus, echoing each digit once its pulse
//! is out. Exposes the pure-logic modules for integration testing; all
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod client;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;

pub use app::dispatcher::CommandDispatcher;
pub use app::ports::{ByteTransport, OutputPort};
pub use error::HardwareFault;
