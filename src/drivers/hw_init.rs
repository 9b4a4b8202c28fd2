//! One-shot board bring-up.
//!
//! Builds the output port, the byte transport and the settle-delay source
//! for the current target. Called once from `main()` before the dispatcher
//! starts. The port is handed back unconfigured; [`start`] configures it
//! and reports the outcome on the console.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: four GPIO pin drivers form the bus, UART1 carries the link.
//! On host: the real AXI GPIO driver runs against a RAM-backed register
//! block, and stdin/stdout are pumped through single-slot channels.

use log::{error, info};

use crate::app::dispatcher::CommandDispatcher;
use crate::app::ports::{ByteTransport, OutputPort};
use crate::config::BridgeConfig;
use crate::error::{HardwareFault, Result};

/// Everything the dispatcher needs, acquired once for the process lifetime.
pub struct Board<P, T, D> {
    pub port: P,
    pub transport: T,
    pub delay: D,
}

/// Console diagnostic for a fatal output-port failure.
pub fn report_init_failure(fault: HardwareFault) {
    error!("GPIO Init Failed ({})", fault);
}

/// Configure the port and hand back a ready dispatcher.
///
/// Logs the failure diagnostic exactly once if configuration fails, or the
/// active banner once it succeeds. Nothing is read from `transport` here.
pub fn start<P: OutputPort, T: ByteTransport>(
    port: P,
    transport: T,
) -> core::result::Result<CommandDispatcher<P, T>, HardwareFault> {
    match CommandDispatcher::new(port, transport) {
        Ok(dispatcher) => {
            info!("--- RFID Controller Active ---");
            Ok(dispatcher)
        }
        Err(fault) => {
            report_init_failure(fault);
            Err(fault)
        }
    }
}

// ── ESP-IDF ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_hal::delay::Ets;
    use esp_idf_hal::gpio::{AnyOutputPin, Output, OutputPin, PinDriver};
    use esp_idf_hal::peripherals::Peripherals;
    use log::debug;

    use super::Board;
    use crate::adapters::pin_bus::PinBus;
    use crate::adapters::uart::UartTransport;
    use crate::config::BridgeConfig;
    use crate::error::{Error, HardwareFault, Result};

    pub type BusPin = PinDriver<'static, AnyOutputPin, Output>;
    pub type EspBoard = Board<PinBus<BusPin, 4>, UartTransport, Ets>;

    fn bus_pin(pin: AnyOutputPin) -> Result<BusPin> {
        PinDriver::output(pin).map_err(|e| Error::Hardware(HardwareFault::Gpio(e.code())))
    }

    pub fn bring_up(config: &BridgeConfig) -> Result<EspBoard> {
        let p = Peripherals::take().map_err(|_| Error::Init("peripherals already taken"))?;
        let pins = p.pins;

        // Order must match `pins::BUS_GPIOS`.
        let bus = PinBus::new([
            bus_pin(pins.gpio4.downgrade_output())?,
            bus_pin(pins.gpio5.downgrade_output())?,
            bus_pin(pins.gpio6.downgrade_output())?,
            bus_pin(pins.gpio7.downgrade_output())?,
        ]);
        debug!("hw_init: bus pins {:?}", crate::pins::BUS_GPIOS);

        let transport = UartTransport::install(config.baud_rate)?;

        Ok(Board { port: bus, transport, delay: Ets })
    }
}

#[cfg(target_os = "espidf")]
pub use esp::{BusPin, EspBoard};

#[cfg(target_os = "espidf")]
pub fn bring_up(config: &BridgeConfig) -> Result<EspBoard> {
    esp::bring_up(config)
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::io::{Read, Write};
    use std::thread;
    use std::time::Duration;

    use embedded_hal::delay::DelayNs;
    use futures_lite::future::block_on;
    use log::{debug, warn};

    use super::Board;
    use crate::adapters::axi_gpio::{AxiGpio, SimBlock};
    use crate::adapters::channel::{ByteSlot, ChannelTransport};
    use crate::config::{BridgeConfig, GpioConfig};
    use crate::error::{Error, Result};

    static LINK_RX: ByteSlot = ByteSlot::new();
    static LINK_TX: ByteSlot = ByteSlot::new();

    /// Thread-sleep delay for the settle time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SleepDelay;

    impl DelayNs for SleepDelay {
        fn delay_ns(&mut self, ns: u32) {
            thread::sleep(Duration::from_nanos(u64::from(ns)));
        }
    }

    pub type SimBoard = Board<AxiGpio, ChannelTransport<'static>, SleepDelay>;

    pub fn bring_up(config: &BridgeConfig) -> Result<SimBoard> {
        let block: &'static SimBlock = Box::leak(Box::new(SimBlock::reset()));
        let gpio = GpioConfig {
            base_address: block.base_address(),
            ..config.gpio
        };
        // SAFETY: the leaked block lives for the rest of the process and
        // only this port touches it.
        let port = unsafe { AxiGpio::new(gpio) };

        spawn_stdio_link()?;
        debug!(
            "hw_init(sim): AXI GPIO at 0x{:08x} (RAM), link on stdin/stdout",
            gpio.base_address
        );

        Ok(Board {
            port,
            transport: ChannelTransport::new(&LINK_RX, &LINK_TX),
            delay: SleepDelay,
        })
    }

    /// Pump stdin into `LINK_RX` and `LINK_TX` out to stdout.
    fn spawn_stdio_link() -> Result<()> {
        thread::Builder::new()
            .name("link-rx".into())
            .spawn(|| {
                for byte in std::io::stdin().lock().bytes() {
                    match byte {
                        Ok(b) => block_on(LINK_RX.send(b)),
                        Err(e) => {
                            warn!("link-rx: {}", e);
                            break;
                        }
                    }
                }
                // No more input: the dispatcher keeps waiting, as it would on
                // a disconnected serial line.
                debug!("link-rx: stdin closed");
            })
            .map_err(|_| Error::Init("link-rx thread spawn failed"))?;

        thread::Builder::new()
            .name("link-tx".into())
            .spawn(|| {
                let mut out = std::io::stdout();
                loop {
                    let b = block_on(LINK_TX.receive());
                    if out.write_all(&[b]).and_then(|()| out.flush()).is_err() {
                        warn!("link-tx: stdout closed");
                        break;
                    }
                }
            })
            .map_err(|_| Error::Init("link-tx thread spawn failed"))?;

        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
pub use sim::{SimBoard, SleepDelay};

#[cfg(not(target_os = "espidf"))]
pub fn bring_up(config: &BridgeConfig) -> Result<SimBoard> {
    sim::bring_up(config)
}
