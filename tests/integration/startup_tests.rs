//! Startup behaviour: output-port configuration gates the control loop.

use log::Level;

use crate::log_capture::{at, capture, console};
use crate::mock_hw::{MockLink, MockPort, Op, echoes, reads, timeline, writes};

use tagwave::adapters::axi_gpio::{ALL_OUTPUTS, AxiGpio, SimBlock};
use tagwave::app::dispatcher::CommandDispatcher;
use tagwave::config::GpioConfig;
use tagwave::drivers::hw_init;
use tagwave::error::HardwareFault;

#[test]
fn failed_configure_never_reads_the_link() {
    let log = timeline();
    let port = MockPort::failing(&log, HardwareFault::NullBaseAddress);
    let link = MockLink::new(&log, b"123");

    let result = CommandDispatcher::new(port, link);

    assert_eq!(result.err(), Some(HardwareFault::NullBaseAddress));
    assert_eq!(*log.borrow(), [Op::Configure], "configure attempted exactly once");
    assert_eq!(reads(&log), 0);
    assert!(writes(&log).is_empty());
}

#[test]
fn configure_happens_before_first_read() {
    let log = timeline();
    let mut d = CommandDispatcher::new(MockPort::new(&log), MockLink::new(&log, b"0")).unwrap();
    assert_eq!(*log.borrow(), [Op::Configure]);
    d.step().unwrap();
    assert_eq!(log.borrow()[0], Op::Configure);
    assert_eq!(log.borrow().iter().filter(|op| **op == Op::Configure).count(), 1);
}

#[test]
fn axi_gpio_drives_registers_through_dispatcher() {
    let block = SimBlock::new(0xffff_ffff);
    let cfg = GpioConfig { base_address: block.base_address(), ..GpioConfig::default() };
    // SAFETY: `block` outlives the dispatcher.
    let port = unsafe { AxiGpio::new(cfg) };
    let log = timeline();

    let mut d = CommandDispatcher::new(port, MockLink::new(&log, b"3")).unwrap();
    assert_eq!(block.tri(), ALL_OUTPUTS);
    assert_eq!(block.data(), 0xffff_ffff, "no data write during configure");

    d.step().unwrap();
    assert_eq!(block.data(), 3, "bus idles on the command value");
}

#[test]
fn bad_descriptor_stops_startup() {
    let log = timeline();
    // SAFETY: null base is rejected before any register access.
    let port = unsafe { AxiGpio::new(GpioConfig { base_address: 0, ..GpioConfig::default() }) };
    let result = CommandDispatcher::new(port, MockLink::new(&log, b"1"));
    assert!(matches!(result, Err(HardwareFault::NullBaseAddress)));
    assert_eq!(reads(&log), 0);
}

// ── Console diagnostics ───────────────────────────────────────

#[test]
fn start_reports_configure_failure_once() {
    let log = timeline();
    let port = MockPort::failing(&log, HardwareFault::NullBaseAddress);

    let (result, records) = capture(|| hw_init::start(port, MockLink::new(&log, b"42")));

    assert!(matches!(result, Err(HardwareFault::NullBaseAddress)));
    let errors = at(&records, Level::Error);
    assert_eq!(errors.len(), 1, "exactly one fatal diagnostic: {records:?}");
    assert!(errors[0].starts_with("GPIO Init Failed"));
    assert!(errors[0].contains("null GPIO base address"));
    assert!(!console(&records).iter().any(|l| l.contains("RFID Controller Active")));
    assert_eq!(reads(&log), 0, "link never read after a failed configure");
}

#[test]
fn start_with_bad_descriptor_never_touches_link() {
    let log = timeline();
    // SAFETY: a misaligned base is rejected before any register access.
    let port = unsafe {
        AxiGpio::new(GpioConfig { base_address: 0x4120_0001, ..GpioConfig::default() })
    };

    let (result, records) = capture(|| hw_init::start(port, MockLink::new(&log, b"1")));

    assert!(result.is_err());
    assert_eq!(console(&records).len(), 1);
    assert!(console(&records)[0].starts_with("GPIO Init Failed"));
    assert_eq!(reads(&log), 0);
}

#[test]
fn normal_run_prints_only_the_banner() {
    let block = SimBlock::reset();
    let cfg = GpioConfig { base_address: block.base_address(), ..GpioConfig::default() };
    // SAFETY: `block` outlives the dispatcher.
    let port = unsafe { AxiGpio::new(cfg) };
    let log = timeline();

    let ((), records) = capture(|| {
        let mut d = hw_init::start(port, MockLink::new(&log, b"5x9")).unwrap();
        for _ in 0..3 {
            d.step().unwrap();
        }
    });

    assert_eq!(console(&records), ["--- RFID Controller Active ---"]);
    assert_eq!(echoes(&log), b"59");
    assert_eq!(block.data(), 9);
}
