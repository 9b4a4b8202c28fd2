//! tagwave Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                     │
//! │                                                            │
//! │  UartTransport / ChannelTransport    PinBus / AxiGpio      │
//! │  (ByteTransport)                     (OutputPort)          │
//! │                                                            │
//! │  ─────────────── Port Trait Boundary ───────────────       │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │        CommandDispatcher (pure logic)                │  │
//! │  │  receive · decode · pulse · echo                     │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::debug;

use tagwave::config::BridgeConfig;
use tagwave::drivers::hw_init;
use tagwave::error::Error;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    // stdout is the command link on the host; logs go to stderr.
    #[cfg(not(target_os = "espidf"))]
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    debug!("tagwave v{}", env!("CARGO_PKG_VERSION"));

    let config = BridgeConfig::default();

    // ── 2. Board bring-up ─────────────────────────────────────
    let board = match hw_init::bring_up(&config) {
        Ok(b) => b,
        Err(Error::Hardware(e)) => {
            hw_init::report_init_failure(e);
            std::process::exit(1)
        }
        Err(e) => return Err(e.into()),
    };

    // ── 3. Output port configuration ──────────────────────────
    // No recovery path: without the bus there is nothing to do.
    let Ok(dispatcher) = hw_init::start(board.port, board.transport) else {
        std::process::exit(1)
    };

    // ── 4. Control loop ───────────────────────────────────────
    if config.settle_ns > 0 {
        dispatcher.with_settle(board.delay, config.settle_ns).run()
    }
    dispatcher.run()
}
