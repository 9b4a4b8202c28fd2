//! Host side of the command link.
//!
//! Sends one ASCII digit and waits for the bridge to echo it. The echo
//! only arrives after the pulse has been written, so a returned `Ok`
//! means the reader was triggered. Silence means the byte was dropped;
//! with a blocking transport that shows up as `send` never returning, so
//! callers wanting a deadline should give their transport a timeout.

use core::fmt;

use log::debug;

use crate::app::commands::{MAX_INDEX, RfidCommand};
use crate::app::ports::ByteTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoError<E> {
    /// Index does not fit in one ASCII digit; nothing was sent.
    InvalidIndex(u8),
    /// The bridge answered with a different byte.
    Mismatch { sent: u8, received: u8 },
    /// Transport failure.
    Transport(E),
}

impl<E: fmt::Debug> fmt::Display for EchoError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex(i) => write!(f, "command index {i} out of range 0-{MAX_INDEX}"),
            Self::Mismatch { sent, received } => {
                write!(f, "sent 0x{sent:02x}, echo was 0x{received:02x}")
            }
            Self::Transport(e) => write!(f, "transport: {e:?}"),
        }
    }
}

/// Host end of the serial link to the bridge.
pub struct HostLink<T> {
    transport: T,
}

impl<T: ByteTransport> HostLink<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Trigger a named reader action.
    pub fn send(&mut self, cmd: RfidCommand) -> Result<(), EchoError<T::Error>> {
        self.send_index(cmd.index())
    }

    /// Trigger the action wired to `index` (0-9) and wait for the echo.
    pub fn send_index(&mut self, index: u8) -> Result<(), EchoError<T::Error>> {
        if index > MAX_INDEX {
            return Err(EchoError::InvalidIndex(index));
        }
        let sent = b'0' + index;
        self.transport.send_byte(sent).map_err(EchoError::Transport)?;
        let received = self.transport.receive_byte().map_err(EchoError::Transport)?;
        debug!("sent {:?} echo {:?}", sent as char, received as char);
        if received == sent {
            Ok(())
        } else {
            Err(EchoError::Mismatch { sent, received })
        }
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}
