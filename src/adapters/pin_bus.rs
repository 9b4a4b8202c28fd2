//! Output port over a bank of discrete pins.
//!
//! Bit *i* of each written value drives `pins[i]`. Works with any
//! `embedded-hal` output pin, so the same bus runs on ESP-IDF pin drivers
//! and on test doubles.

use embedded_hal::digital::{OutputPin, PinState};
use log::{debug, warn};

use crate::app::ports::OutputPort;
use crate::app::pulse::MIN_BUS_WIDTH;
use crate::error::HardwareFault;

pub struct PinBus<P, const N: usize> {
    pins: [P; N],
}

impl<P: OutputPin, const N: usize> PinBus<P, N> {
    /// Pins ordered from bit 0 upward.
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    pub fn pins(&self) -> &[P; N] {
        &self.pins
    }
}

impl<P: OutputPin, const N: usize> OutputPort for PinBus<P, N> {
    fn configure(&mut self) -> Result<(), HardwareFault> {
        if N < usize::from(MIN_BUS_WIDTH) {
            return Err(HardwareFault::UnsupportedBusWidth(N as u8));
        }
        for pin in &mut self.pins {
            pin.set_low().map_err(|_| HardwareFault::Pin)?;
        }
        debug!("pin_bus: {} pins driven low", N);
        Ok(())
    }

    fn write(&mut self, value: u32) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            let state = PinState::from(value & (1 << bit) != 0);
            if pin.set_state(state).is_err() {
                warn!("pin_bus: bit {} rejected {:?}", bit, state);
            }
        }
    }
}
