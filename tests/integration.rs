//! Integration tests for the pad2ble translation engine: full event
//! streams through `InputEngine` against a scripted transport.

use pad2ble::engine::{InputEngine, ReportSink};
use pad2ble::hid::ReportType;
use pad2ble::input::{code, InputEvent};

/// Transport double: records notifications, scriptable gating.
#[derive(Default)]
struct Link {
    busy: bool,
    unsubscribed: Vec<ReportType>,
    log: Vec<(ReportType, Vec<u8>)>,
}

impl Link {
    fn subscribed() -> Self {
        Self::default()
    }

    fn count(&self, report: ReportType) -> usize {
        self.log.iter().filter(|(t, _)| *t == report).count()
    }

    fn last(&self, report: ReportType) -> Option<&[u8]> {
        self.log
            .iter()
            .rev()
            .find(|(t, _)| *t == report)
            .map(|(_, d)| d.as_slice())
    }
}

impl ReportSink for Link {
    fn is_subscribed(&self, report: ReportType) -> bool {
        !self.unsubscribed.contains(&report)
    }

    fn transport_busy(&self) -> bool {
        self.busy
    }

    fn notify(&mut self, report: ReportType, data: &[u8]) {
        assert_eq!(data.len(), report.size(), "wire size mismatch");
        self.log.push((report, data.to_vec()));
    }
}

#[test]
fn dpad_walkthrough_produces_octant_sequence() {
    let mut engine = InputEngine::new();
    let mut link = Link::subscribed();

    // Clockwise sweep: up, up+right, right, right+down, down.
    let presses = [
        (code::BTN_DPAD_UP, true),
        (code::BTN_DPAD_RIGHT, true),
        (code::BTN_DPAD_UP, false),
        (code::BTN_DPAD_DOWN, true),
        (code::BTN_DPAD_RIGHT, false),
    ];
    for (c, pressed) in presses {
        engine.handle_event(InputEvent::key(c, pressed), &mut link);
    }

    let hats: Vec<u8> = link
        .log
        .iter()
        .filter(|(t, _)| *t == ReportType::Gamepad)
        .map(|(_, d)| d[0])
        .collect();
    assert_eq!(hats, [0, 1, 2, 3, 4]);
}

#[test]
fn mixed_stream_keeps_channels_independent() {
    let mut engine = InputEngine::new();
    let mut link = Link::subscribed();

    engine.handle_event(InputEvent::key(code::BTN_SOUTH, true), &mut link); // keyboard
    engine.handle_event(InputEvent::absolute(code::ABS_X, 200), &mut link); // gamepad
    engine.handle_event(InputEvent::relative(code::REL_X, -12), &mut link); // mouse
    engine.handle_event(InputEvent::key(code::BTN_SOUTH, false), &mut link); // keyboard

    assert_eq!(link.count(ReportType::Keyboard), 2);
    assert_eq!(link.count(ReportType::Gamepad), 1);
    assert_eq!(link.count(ReportType::Mouse), 1);

    let gamepad = link.last(ReportType::Gamepad).unwrap();
    assert_eq!(gamepad[3], 200); // stick X byte

    let keyboard = link.last(ReportType::Keyboard).unwrap();
    assert_eq!(keyboard, [0; 8]); // all released again
}

#[test]
fn backpressure_window_collapses_into_one_report_per_channel() {
    let mut engine = InputEngine::new();
    let mut link = Link::subscribed();
    link.busy = true;

    // A burst of motion while the radio is saturated: last value wins.
    for delta in [5, 9, -3] {
        engine.handle_event(InputEvent::relative(code::REL_Y, delta), &mut link);
    }
    engine.handle_event(InputEvent::key(code::KEY_C, true), &mut link);
    assert!(link.log.is_empty());

    link.busy = false;
    engine.handle_event(InputEvent::key(code::KEY_C, false), &mut link);

    // One mouse report carrying only the final delta. The keyboard
    // press and release cancelled out inside the busy window, so the
    // buffer matches the last-sent baseline and nothing is queued.
    assert_eq!(link.count(ReportType::Mouse), 1);
    let mouse = link.last(ReportType::Mouse).unwrap();
    assert_eq!(&mouse[3..5], &(-3i16).to_le_bytes());

    assert_eq!(link.count(ReportType::Keyboard), 0);

    // A fresh press on the now-idle link goes straight out.
    engine.handle_event(InputEvent::key(code::KEY_C, true), &mut link);
    assert_eq!(link.count(ReportType::Keyboard), 1);
    assert_eq!(link.last(ReportType::Keyboard).unwrap()[2], 0x2c);
}

#[test]
fn late_subscription_catches_up_held_state() {
    let mut engine = InputEngine::new();
    let mut link = Link::subscribed();
    link.unsubscribed = vec![ReportType::Gamepad, ReportType::Mouse, ReportType::Keyboard];

    // State accumulates while nobody listens.
    engine.handle_event(InputEvent::key(code::BTN_DPAD_LEFT, true), &mut link);
    engine.handle_event(InputEvent::key(code::BTN_TL, true), &mut link);
    assert!(link.log.is_empty());

    // Peer subscribes to everything; the next event flushes both
    // held reports.
    link.unsubscribed.clear();
    engine.handle_event(InputEvent::absolute(code::ABS_Y, 10), &mut link);

    assert_eq!(link.count(ReportType::Gamepad), 1);
    let gamepad = link.last(ReportType::Gamepad).unwrap();
    assert_eq!(gamepad[0], 6); // hat: left

    assert_eq!(link.count(ReportType::Keyboard), 1);
    let keyboard = link.last(ReportType::Keyboard).unwrap();
    assert_eq!(keyboard[2], 0x14); // TL usage held
}

#[test]
fn six_key_chord_rolls_over_on_the_wire() {
    let mut engine = InputEngine::new();
    let mut link = Link::subscribed();

    // Seven mapped keys pressed together; the seventh is dropped.
    let keys = [
        code::KEY_0,
        code::KEY_1,
        code::KEY_2,
        code::KEY_3,
        code::BTN_NORTH,
        code::BTN_SOUTH,
        code::BTN_WEST,
    ];
    for c in keys {
        engine.handle_event(InputEvent::key(c, true), &mut link);
    }

    // Six presses notified, the overflowed seventh changed nothing.
    assert_eq!(link.count(ReportType::Keyboard), 6);
    let report = link.last(ReportType::Keyboard).unwrap();
    assert_eq!(&report[2..], [0x52, 0x51, 0x50, 0x4f, 0x17, 0x09]);

    // Releasing one of the held keys frees its slot for the key that
    // overflowed.
    engine.handle_event(InputEvent::key(code::KEY_1, false), &mut link);
    engine.handle_event(InputEvent::key(code::BTN_WEST, true), &mut link);

    let report = link.last(ReportType::Keyboard).unwrap();
    assert_eq!(&report[2..], [0x52, 0x15, 0x50, 0x4f, 0x17, 0x09]);
}
