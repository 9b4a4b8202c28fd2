//! The three-write trigger pulse.
//!
//! ```text
//!  bit 3 (trigger)  ____/‾‾‾‾\____
//!  bits 0-2 (index) ==============
//!                   set  assert  deassert
//! ```
//!
//! The index is placed on the bus with the trigger low, the trigger is
//! raised on the now-stable value (the peripheral samples on that rising
//! edge), then dropped again leaving the index on the bus.

use super::commands::MAX_INDEX;

/// Reserved trigger line. Never carries command data.
pub const TRIGGER_BIT: u32 = 1 << 3;

/// Bits that carry the command index.
pub const INDEX_MASK: u32 = 0b0111;

/// Narrowest bus that still carries the trigger line.
pub const MIN_BUS_WIDTH: u8 = TRIGGER_BIT.trailing_zeros() as u8 + 1;

/// One complete command transmission to the peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    base: u32,
}

impl Pulse {
    /// Pulse for a decoded command index (0-9).
    pub fn new(index: u8) -> Self {
        debug_assert!(index <= MAX_INDEX);
        Self { base: u32::from(index) }
    }

    pub const fn base(self) -> u32 {
        self.base
    }

    /// Bus values in the order they must be written.
    pub const fn writes(self) -> [u32; 3] {
        [self.base, self.base | TRIGGER_BIT, self.base]
    }
}
