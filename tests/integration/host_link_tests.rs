//! Host link ↔ bridge over single-slot channels, end to end.
//!
//! The bridge runs on its own thread, as it would on the board; the test
//! thread plays the host tool.

use std::thread;

use tagwave::adapters::axi_gpio::{AxiGpio, SimBlock};
use tagwave::adapters::channel::{ByteSlot, ChannelTransport};
use tagwave::app::commands::RfidCommand;
use tagwave::app::dispatcher::CommandDispatcher;
use tagwave::client::{EchoError, HostLink};
use tagwave::config::GpioConfig;

/// Run `steps` bridge iterations on a thread; returns the final DATA value.
fn spawn_bridge(
    to_bridge: &'static ByteSlot,
    from_bridge: &'static ByteSlot,
    steps: usize,
) -> thread::JoinHandle<u32> {
    thread::spawn(move || {
        let block = SimBlock::new(0xffff_ffff);
        let cfg = GpioConfig { base_address: block.base_address(), ..GpioConfig::default() };
        // SAFETY: `block` outlives the dispatcher on this thread.
        let port = unsafe { AxiGpio::new(cfg) };
        let link = ChannelTransport::new(to_bridge, from_bridge);
        let mut d = CommandDispatcher::new(port, link).unwrap();
        for _ in 0..steps {
            d.step().unwrap();
        }
        block.data()
    })
}

#[test]
fn host_commands_are_acknowledged() {
    static TO_BRIDGE: ByteSlot = ByteSlot::new();
    static FROM_BRIDGE: ByteSlot = ByteSlot::new();

    let bridge = spawn_bridge(&TO_BRIDGE, &FROM_BRIDGE, 3);
    let mut host = HostLink::new(ChannelTransport::new(&FROM_BRIDGE, &TO_BRIDGE));

    host.send(RfidCommand::Reqa).unwrap();
    host.send(RfidCommand::Select).unwrap();
    host.send_index(7).unwrap();

    assert_eq!(bridge.join().unwrap(), 7);
}

#[test]
fn out_of_range_index_never_reaches_bridge() {
    static TO_BRIDGE: ByteSlot = ByteSlot::new();
    static FROM_BRIDGE: ByteSlot = ByteSlot::new();

    let mut host = HostLink::new(ChannelTransport::new(&FROM_BRIDGE, &TO_BRIDGE));
    assert_eq!(host.send_index(12), Err(EchoError::InvalidIndex(12)));
    assert!(TO_BRIDGE.try_receive().is_err(), "nothing was sent");
}
