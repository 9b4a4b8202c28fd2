//! GPIO / peripheral pin assignments for the ESP32-S3 bridge board.
//!
//! Single source of truth — bring-up references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Discrete output bus to the RFID front-end
// ---------------------------------------------------------------------------

/// Bus bits 0-3 in order. Bits 0-2 carry the command index, bit 3 is the
/// trigger line.
pub const BUS_GPIOS: [i32; 4] = [4, 5, 6, 7];

/// Bus bit wired to the front-end's trigger input.
pub const TRIGGER_GPIO: i32 = BUS_GPIOS[3];

// ---------------------------------------------------------------------------
// Host link
// ---------------------------------------------------------------------------

/// IDF UART number used for the command link (UART0 stays the log console).
pub const BRIDGE_UART_NUM: i32 = 1;

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
