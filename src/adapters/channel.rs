//! Single-slot channel transport.
//!
//! Bridges whatever owns the physical link (an RX interrupt, an I/O
//! thread, a test) to the dispatcher through two `embassy-sync` channels
//! of depth one. At most one byte is pending in each direction; a second
//! byte waits until the first is taken.
//!
//! ```text
//!  link ──▶ [rx: 1 byte] ──▶ dispatcher ──▶ [tx: 1 byte] ──▶ link
//! ```

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use futures_lite::future::block_on;

use crate::app::ports::ByteTransport;

/// One-byte mailbox shared between the link side and the dispatcher.
pub type ByteSlot = Channel<CriticalSectionRawMutex, u8, 1>;

/// Dispatcher side of a pair of [`ByteSlot`]s.
pub struct ChannelTransport<'a> {
    rx: &'a ByteSlot,
    tx: &'a ByteSlot,
}

impl<'a> ChannelTransport<'a> {
    pub fn new(rx: &'a ByteSlot, tx: &'a ByteSlot) -> Self {
        Self { rx, tx }
    }
}

impl ByteTransport for ChannelTransport<'_> {
    type Error = Infallible;

    fn receive_byte(&mut self) -> Result<u8, Infallible> {
        Ok(block_on(self.rx.receive()))
    }

    fn send_byte(&mut self, byte: u8) -> Result<(), Infallible> {
        block_on(self.tx.send(byte));
        Ok(())
    }
}
