//! Integration tests for the link → dispatcher → output bus pipeline.

use crate::mock_hw::{Exhausted, MockLink, MockPort, Op, echoes, timeline, writes};

use tagwave::app::dispatcher::CommandDispatcher;

/// Feed `input` through a fresh dispatcher until the script runs dry.
fn drive(input: &[u8]) -> crate::mock_hw::Timeline {
    let log = timeline();
    let mut d = CommandDispatcher::new(MockPort::new(&log), MockLink::new(&log, input)).unwrap();
    loop {
        match d.step() {
            Ok(_) => {}
            Err(Exhausted) => break,
        }
    }
    log
}

#[test]
fn every_digit_pulses_and_echoes() {
    for b in b'0'..=b'9' {
        let log = drive(&[b]);
        let v = u32::from(b - b'0');
        assert_eq!(writes(&log), [v, v | 8, v], "digit {:?}", b as char);
        assert_eq!(echoes(&log), [b]);
    }
}

#[test]
fn range_boundaries() {
    let log = drive(b"/");
    assert!(writes(&log).is_empty());
    assert!(echoes(&log).is_empty());

    let log = drive(b":");
    assert!(writes(&log).is_empty());
    assert!(echoes(&log).is_empty());

    assert_eq!(writes(&drive(b"0")), [0, 8, 0]);
    assert_eq!(writes(&drive(b"9")), [9, 9, 9]);
}

#[test]
fn echo_follows_complete_pulse() {
    let log = drive(b"6");
    assert_eq!(
        *log.borrow(),
        [
            Op::Configure,
            Op::Read(b'6'),
            Op::Write(6),
            Op::Write(14),
            Op::Write(6),
            Op::Echo(b'6'),
        ]
    );
}

#[test]
fn repeated_command_carries_no_state() {
    let log = drive(b"555");
    assert_eq!(writes(&log), [5, 13, 5, 5, 13, 5, 5, 13, 5]);
    assert_eq!(echoes(&log), b"555");
}

#[test]
fn noise_between_commands_is_skipped() {
    // What a terminal sends when someone types "2<enter>4<enter>".
    let log = drive(b"2\r\n4\r\n");
    assert_eq!(writes(&log), [2, 10, 2, 4, 12, 4]);
    assert_eq!(echoes(&log), b"24");
}

#[test]
fn pulses_never_interleave() {
    let log = drive(b"13");
    let ops: Vec<Op> = log.borrow().iter().copied().filter(|op| *op != Op::Configure).collect();
    assert_eq!(
        ops,
        [
            Op::Read(b'1'),
            Op::Write(1),
            Op::Write(9),
            Op::Write(1),
            Op::Echo(b'1'),
            Op::Read(b'3'),
            Op::Write(3),
            Op::Write(11),
            Op::Write(3),
            Op::Echo(b'3'),
        ]
    );
}

#[test]
fn step_reports_what_happened() {
    let log = timeline();
    let mut d = CommandDispatcher::new(MockPort::new(&log), MockLink::new(&log, b"x4")).unwrap();
    assert_eq!(d.step(), Ok(None));
    let cmd = d.step().unwrap().expect("digit is a command");
    assert_eq!(cmd.raw(), b'4');
    assert_eq!(cmd.index(), 4);
    assert_eq!(d.step(), Err(Exhausted));
}
