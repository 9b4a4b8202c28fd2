//! Board description for the bridge.
//!
//! The output port is described directly (base address and capability
//! flags) rather than looked up by device ID. Defaults match the Zybo PL
//! design the host tool talks to.

use serde::{Deserialize, Serialize};

/// AXI GPIO base address in the default PL design.
pub const DEFAULT_GPIO_BASE_ADDR: usize = 0x4120_0000;

/// Low-level descriptor for a memory-mapped GPIO block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpioConfig {
    /// Physical base address of the register block.
    pub base_address: usize,
    /// Block was synthesised with its interrupt output. Carried, not used.
    pub interrupt_present: bool,
    /// Block was synthesised with a second channel.
    pub is_dual: bool,
    /// Channel driving the bus (1 or 2).
    pub channel: u8,
    /// Bus width in bits. Bits 0-2 carry the index, bit 3 the trigger.
    pub bus_width: u8,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_GPIO_BASE_ADDR,
            interrupt_present: false,
            is_dual: false,
            channel: 1,
            bus_width: 4,
        }
    }
}

/// Core bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Output port descriptor.
    pub gpio: GpioConfig,

    /// Serial link speed (8N1).
    pub baud_rate: u32,

    /// Optional hold time between pulse writes in nanoseconds. 0 = none.
    pub settle_ns: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            gpio: GpioConfig::default(),
            baud_rate: 115_200,
            settle_ns: 0,
        }
    }
}
