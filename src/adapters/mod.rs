//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements     | Connects to                          |
//! |------------|----------------|--------------------------------------|
//! | `axi_gpio` | OutputPort     | Xilinx AXI GPIO block (memory-mapped)|
//! | `pin_bus`  | OutputPort     | Any `embedded-hal` output pins       |
//! | `channel`  | ByteTransport  | Single-slot `embassy-sync` channels  |
//! | `uart`     | ByteTransport  | ESP-IDF UART driver                  |

pub mod axi_gpio;
pub mod channel;
pub mod pin_bus;
pub mod uart;
