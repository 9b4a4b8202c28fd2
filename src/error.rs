//! Unified error types for the tagwave firmware.
//!
//! Only one condition is fatal: the output port cannot be configured at
//! startup. Transport errors are reported by the adapters and logged by the
//! dispatcher loop. A non-digit command byte is not an error at all; it is
//! dropped silently and has no type here.
//!
//! All variants are `Copy` so they can be passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Hardware faults (output port initialisation)
// ---------------------------------------------------------------------------

/// Output-port initialisation failure. Fatal: the bridge cannot run
/// without its output bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareFault {
    /// Descriptor carries a null base address.
    NullBaseAddress,
    /// Base address is not aligned to a 32-bit register boundary.
    MisalignedBaseAddress(usize),
    /// Channel 2 requested on a block built without a second channel.
    NoSecondChannel,
    /// Channel number other than 1 or 2.
    InvalidChannel(u8),
    /// Bus narrower than the trigger line or wider than a channel.
    UnsupportedBusWidth(u8),
    /// Direction register did not hold the written value (peripheral absent).
    DirectionReadback { expected: u32, found: u32 },
    /// A discrete output pin rejected the initial level.
    Pin,
    /// Platform GPIO configuration call failed with the given return code.
    Gpio(i32),
}

impl fmt::Display for HardwareFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullBaseAddress => write!(f, "null GPIO base address"),
            Self::MisalignedBaseAddress(addr) => {
                write!(f, "GPIO base address 0x{addr:08x} is not word aligned")
            }
            Self::NoSecondChannel => write!(f, "channel 2 requested on a single-channel GPIO"),
            Self::InvalidChannel(ch) => write!(f, "GPIO channel {ch} does not exist"),
            Self::UnsupportedBusWidth(w) => write!(f, "{w}-bit output bus not supported"),
            Self::DirectionReadback { expected, found } => write!(
                f,
                "direction read-back mismatch (wrote 0x{expected:08x}, read 0x{found:08x})"
            ),
            Self::Pin => write!(f, "output pin rejected initial level"),
            Self::Gpio(rc) => write!(f, "GPIO config failed (rc={rc})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// UART driver call failed with the given return code.
    Uart(i32),
    /// The other end of the byte stream is gone.
    Closed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uart(rc) => write!(f, "UART error (rc={rc})"),
            Self::Closed => write!(f, "transport closed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Output port could not be brought up.
    Hardware(HardwareFault),
    /// Byte transport failed.
    Transport(TransportError),
    /// Board bring-up failed outside the output port.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hardware(e) => write!(f, "hardware: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl From<HardwareFault> for Error {
    fn from(e: HardwareFault) -> Self {
        Self::Hardware(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl core::error::Error for HardwareFault {}
impl core::error::Error for TransportError {}
impl core::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
