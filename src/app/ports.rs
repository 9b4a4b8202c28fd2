//! Port traits — the boundary between the dispatcher and the hardware.
//!
//! ```text
//!   ByteTransport ──▶ CommandDispatcher ──▶ OutputPort
//! ```
//!
//! Driven adapters (GPIO blocks, pin banks, UARTs, channels) implement
//! these traits. The [`CommandDispatcher`](super::dispatcher::CommandDispatcher)
//! consumes them via generics, so the control loop never touches a
//! register directly.

use crate::error::HardwareFault;

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → discrete output bus)
// ───────────────────────────────────────────────────────────────

/// A fixed-width discrete output bus.
pub trait OutputPort {
    /// One-time low-level initialisation: every bit becomes a driven
    /// output. Must succeed before the first [`write`](Self::write).
    fn configure(&mut self) -> Result<(), HardwareFault>;

    /// Drive `value` onto the bus.
    fn write(&mut self, value: u32);
}

impl<P: OutputPort + ?Sized> OutputPort for &mut P {
    fn configure(&mut self) -> Result<(), HardwareFault> {
        (**self).configure()
    }

    fn write(&mut self, value: u32) {
        (**self).write(value);
    }
}

// ───────────────────────────────────────────────────────────────
// Byte transport (driving adapter: host link → domain)
// ───────────────────────────────────────────────────────────────

/// Single-byte, blocking transport channel.
pub trait ByteTransport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Block until one byte arrives.
    fn receive_byte(&mut self) -> Result<u8, Self::Error>;

    /// Send one byte back to the host.
    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

impl<T: ByteTransport + ?Sized> ByteTransport for &mut T {
    type Error = T::Error;

    fn receive_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).receive_byte()
    }

    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).send_byte(byte)
    }
}
