//! Command dispatcher — the control loop.
//!
//! [`CommandDispatcher`] owns the output port and the byte transport for
//! the lifetime of the process. It has one state, awaiting a byte, and
//! loops on it forever:
//!
//! ```text
//!        ┌──────────────────────────────────────────────┐
//!        ▼                                              │
//!  receive_byte ──▶ decode ──digit──▶ pulse ──▶ echo ───┘
//!                     │
//!                     └──other──────────────────────────┘
//! ```
//!
//! The port is configured in [`CommandDispatcher::new`]; a dispatcher
//! therefore never exists with an unconfigured port, and no byte is read
//! if configuration fails.

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::error::HardwareFault;

use super::commands::Command;
use super::ports::{ByteTransport, OutputPort};
use super::pulse::{Pulse, TRIGGER_BIT};

/// Delay source for dispatchers running without a settle time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSettle;

impl DelayNs for NoSettle {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Drives the output port from commands received over the transport.
pub struct CommandDispatcher<P, T, D = NoSettle> {
    port: P,
    transport: T,
    delay: D,
    settle_ns: u32,
}

impl<P: OutputPort, T: ByteTransport> CommandDispatcher<P, T, NoSettle> {
    /// Take ownership of both handles and configure the port.
    ///
    /// This is the only place [`OutputPort::configure`] is called.
    pub fn new(mut port: P, transport: T) -> Result<Self, HardwareFault> {
        port.configure()?;
        Ok(Self {
            port,
            transport,
            delay: NoSettle,
            settle_ns: 0,
        })
    }

    /// Hold each pulse write for `settle_ns` using `delay`.
    ///
    /// A `settle_ns` of 0 skips the delay calls entirely.
    pub fn with_settle<D: DelayNs>(self, delay: D, settle_ns: u32) -> CommandDispatcher<P, T, D> {
        CommandDispatcher {
            port: self.port,
            transport: self.transport,
            delay,
            settle_ns,
        }
    }
}

impl<P: OutputPort, T: ByteTransport, D: DelayNs> CommandDispatcher<P, T, D> {
    /// Run the control loop. Never returns.
    ///
    /// Transport errors are logged and the loop carries on with the next
    /// receive.
    pub fn run(mut self) -> ! {
        loop {
            if let Err(e) = self.step() {
                warn!("transport error: {:?}", e);
            }
        }
    }

    /// Block for one byte and handle it.
    ///
    /// Returns the command that was pulsed, or `None` if the byte was
    /// discarded.
    pub fn step(&mut self) -> Result<Option<Command>, T::Error> {
        let byte = self.transport.receive_byte()?;
        self.handle_byte(byte)
    }

    /// Handle an already-received byte: decode, pulse, echo.
    pub fn handle_byte(&mut self, byte: u8) -> Result<Option<Command>, T::Error> {
        let Some(cmd) = Command::decode(byte) else {
            trace!("discard 0x{:02x}", byte);
            return Ok(None);
        };

        let pulse = Pulse::new(cmd.index());
        if pulse.base() & TRIGGER_BIT != 0 {
            debug!("index {} overlaps the trigger line", cmd.index());
        }
        self.emit(pulse);

        self.transport.send_byte(cmd.raw())?;
        debug!(
            "pulsed {} ({})",
            cmd.index(),
            cmd.rfid().map_or("unnamed", |r| r.label())
        );
        Ok(Some(cmd))
    }

    /// Write the three pulse values in order.
    fn emit(&mut self, pulse: Pulse) {
        let [set, assert, deassert] = pulse.writes();
        self.port.write(set);
        self.settle();
        self.port.write(assert);
        self.settle();
        self.port.write(deassert);
    }

    fn settle(&mut self) {
        if self.settle_ns > 0 {
            self.delay.delay_ns(self.settle_ns);
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_parts(self) -> (P, T) {
        (self.port, self.transport)
    }
}
