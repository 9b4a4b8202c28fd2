//! Memory-mapped AXI GPIO output port.
//!
//! Drives one channel of a Xilinx AXI GPIO block in the programmable
//! logic. The block is described directly by a [`GpioConfig`]; there is no
//! device-ID lookup.
//!
//! | Offset | Register | Use                         |
//! |--------|----------|-----------------------------|
//! | 0x0    | DATA     | channel 1 pin levels        |
//! | 0x4    | TRI      | channel 1 direction (1=in)  |
//! | 0x8    | DATA2    | channel 2 pin levels        |
//! | 0xC    | TRI2     | channel 2 direction (1=in)  |

use core::cell::UnsafeCell;
use core::ptr;

use log::{debug, warn};

use crate::app::ports::OutputPort;
use crate::app::pulse::MIN_BUS_WIDTH;
use crate::config::GpioConfig;
use crate::error::HardwareFault;

const DATA_OFFSET: usize = 0x0;
const TRI_OFFSET: usize = 0x4;
const CHANNEL2_OFFSET: usize = 0x8;

/// Direction value with every bit driven as an output.
pub const ALL_OUTPUTS: u32 = 0x0;

/// Direction value after reset: every bit an input.
pub const ALL_INPUTS: u32 = 0xffff_ffff;

/// Widest bus one channel can drive.
const CHANNEL_WIDTH: u8 = 32;

#[derive(Clone, Copy)]
struct Registers {
    data: *mut u32,
    tri: *mut u32,
    /// Bits of DATA that belong to the bus.
    mask: u32,
}

/// AXI GPIO channel used as the discrete output bus.
pub struct AxiGpio {
    config: GpioConfig,
    regs: Option<Registers>,
}

impl AxiGpio {
    /// Build an unconfigured port from a descriptor.
    ///
    /// # Safety
    ///
    /// If `config.base_address` is non-null and word aligned it must point
    /// at an AXI GPIO register block (or memory laid out like one) that
    /// stays mapped for the lifetime of the port, and nothing else may
    /// write the selected channel's registers.
    pub unsafe fn new(config: GpioConfig) -> Self {
        Self { config, regs: None }
    }

    pub fn config(&self) -> &GpioConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.regs.is_some()
    }

    fn channel_offset(&self) -> Result<usize, HardwareFault> {
        match (self.config.channel, self.config.is_dual) {
            (1, _) => Ok(0),
            (2, true) => Ok(CHANNEL2_OFFSET),
            (2, false) => Err(HardwareFault::NoSecondChannel),
            (ch, _) => Err(HardwareFault::InvalidChannel(ch)),
        }
    }
}

impl OutputPort for AxiGpio {
    fn configure(&mut self) -> Result<(), HardwareFault> {
        let base = self.config.base_address;
        if base == 0 {
            return Err(HardwareFault::NullBaseAddress);
        }
        if base % core::mem::align_of::<u32>() != 0 {
            return Err(HardwareFault::MisalignedBaseAddress(base));
        }
        let width = self.config.bus_width;
        if !(MIN_BUS_WIDTH..=CHANNEL_WIDTH).contains(&width) {
            return Err(HardwareFault::UnsupportedBusWidth(width));
        }
        let channel = base + self.channel_offset()?;

        let regs = Registers {
            data: (channel + DATA_OFFSET) as *mut u32,
            tri: (channel + TRI_OFFSET) as *mut u32,
            mask: u32::MAX >> (CHANNEL_WIDTH - width),
        };

        // SAFETY: address validated above; mapping guaranteed by `new`'s contract.
        let found = unsafe {
            ptr::write_volatile(regs.tri, ALL_OUTPUTS);
            ptr::read_volatile(regs.tri)
        };
        if found != ALL_OUTPUTS {
            return Err(HardwareFault::DirectionReadback { expected: ALL_OUTPUTS, found });
        }

        if self.config.interrupt_present {
            debug!("axi_gpio: interrupt output present, left disabled");
        }
        self.regs = Some(regs);
        debug!(
            "axi_gpio: channel {} at 0x{:08x} configured as {}-bit output",
            self.config.channel, base, width
        );
        Ok(())
    }

    fn write(&mut self, value: u32) {
        let Some(regs) = self.regs else {
            warn!("axi_gpio: write 0x{:x} before configure dropped", value);
            return;
        };
        // SAFETY: `regs` only exists after `configure` validated the block.
        unsafe { ptr::write_volatile(regs.data, value & regs.mask) };
    }
}

// ── RAM-backed register block ─────────────────────────────────

/// Four words of ordinary memory laid out like an AXI GPIO block.
///
/// Lets the real driver run on the host; the simulator and the tests point
/// an [`AxiGpio`] at [`SimBlock::base_address`].
pub struct SimBlock {
    words: Box<UnsafeCell<[u32; 4]>>,
}

impl SimBlock {
    /// Block with every register reading `fill`.
    pub fn new(fill: u32) -> Self {
        Self { words: Box::new(UnsafeCell::new([fill; 4])) }
    }

    /// Block in the hardware reset state: DATA low, every pin an input.
    pub fn reset() -> Self {
        Self {
            words: Box::new(UnsafeCell::new([0, ALL_INPUTS, 0, ALL_INPUTS])),
        }
    }

    pub fn base_address(&self) -> usize {
        self.words.get() as usize
    }

    /// Volatile read of the word at byte `offset`.
    pub fn read(&self, offset: usize) -> u32 {
        assert!(offset < 16 && offset % 4 == 0, "offset 0x{offset:x} outside block");
        // SAFETY: offset checked against the four-word block.
        unsafe { ptr::read_volatile((self.base_address() + offset) as *const u32) }
    }

    pub fn data(&self) -> u32 {
        self.read(DATA_OFFSET)
    }

    pub fn tri(&self) -> u32 {
        self.read(TRI_OFFSET)
    }

    pub fn data2(&self) -> u32 {
        self.read(CHANNEL2_OFFSET + DATA_OFFSET)
    }

    pub fn tri2(&self) -> u32 {
        self.read(CHANNEL2_OFFSET + TRI_OFFSET)
    }
}
