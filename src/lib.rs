//! Host-testable library interface for pad2ble.
//!
//! The report translation engine and all pure decision logic compile on
//! the host with no default features, so `cargo test --lib` runs without
//! embedded hardware.
//!
//! The embedded binary uses main.rs with #![no_std] and #![no_main] and
//! pulls in the Embassy/SoftDevice modules via the `embedded` feature.

#![cfg_attr(not(test), no_std)]

pub mod analog_logic;
pub mod config;
pub mod engine;
pub mod error;
pub mod hid;
pub mod input;
pub mod keymap;
pub mod system_logic;
pub mod touch_logic;

// ═══════════════════════════════════════════════════════════════════════════
// Embedded-only modules (Embassy + Nordic SoftDevice)
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(feature = "embedded")]
pub mod analog;
#[cfg(feature = "embedded")]
pub mod ble;
#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod led;
#[cfg(feature = "embedded")]
pub mod supervisor;
#[cfg(feature = "embedded")]
pub mod touch;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::analog_logic::{scale_axis, AxisConfig, AXIS_CENTER};
    use crate::engine::{InputEngine, ReportSink};
    use crate::hid::gamepad::{hat_code, HatDir, GAMEPAD_REPORT_SIZE, HAT_CENTERED};
    use crate::hid::keyboard::KEYBOARD_REPORT_SIZE;
    use crate::hid::mouse::MOUSE_REPORT_SIZE;
    use crate::hid::{GamepadReport, KeyboardReport, MouseReport, ReportType, REPORT_MAP};
    use crate::input::{code, EventKind, InputEvent};
    use crate::keymap;
    use crate::system_logic::{battery_soc, should_idle_shutdown, ChordTracker, SystemRequest};
    use crate::touch_logic::TouchState;

    /// Scripted transport for engine tests: records every notification
    /// and lets a test flip the subscription and busy signals.
    struct MockSink {
        gamepad_subscribed: bool,
        mouse_subscribed: bool,
        keyboard_subscribed: bool,
        busy: bool,
        sent: Vec<(ReportType, heapless::Vec<u8, 8>)>,
    }

    impl MockSink {
        fn subscribed_all() -> Self {
            Self {
                gamepad_subscribed: true,
                mouse_subscribed: true,
                keyboard_subscribed: true,
                busy: false,
                sent: Vec::new(),
            }
        }

        fn sent_of(&self, report: ReportType) -> Vec<&[u8]> {
            self.sent
                .iter()
                .filter(|(t, _)| *t == report)
                .map(|(_, d)| d.as_slice())
                .collect()
        }
    }

    impl ReportSink for MockSink {
        fn is_subscribed(&self, report: ReportType) -> bool {
            match report {
                ReportType::Gamepad => self.gamepad_subscribed,
                ReportType::Mouse => self.mouse_subscribed,
                ReportType::Keyboard => self.keyboard_subscribed,
            }
        }

        fn transport_busy(&self) -> bool {
            self.busy
        }

        fn notify(&mut self, report: ReportType, data: &[u8]) {
            let mut copy = heapless::Vec::new();
            copy.extend_from_slice(data).unwrap();
            self.sent.push((report, copy));
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Hat-Switch Encoder Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn hat_code_total_over_all_16_bitmasks() {
        const UP: u8 = HatDir::Up.bit();
        const DOWN: u8 = HatDir::Down.bit();
        const LEFT: u8 = HatDir::Left.bit();
        const RIGHT: u8 = HatDir::Right.bit();

        for bits in 0u8..16 {
            let expected = match bits {
                b if b == UP => 0,
                b if b == UP | RIGHT => 1,
                b if b == RIGHT => 2,
                b if b == RIGHT | DOWN => 3,
                b if b == DOWN => 4,
                b if b == DOWN | LEFT => 5,
                b if b == LEFT => 6,
                b if b == LEFT | UP => 7,
                _ => 8,
            };
            assert_eq!(hat_code(bits), expected, "bitmask {bits:#06b}");
        }
    }

    #[test]
    fn hat_opposite_pair_reads_centered() {
        assert_eq!(hat_code(HatDir::Up.bit() | HatDir::Down.bit()), HAT_CENTERED);
        assert_eq!(
            hat_code(HatDir::Left.bit() | HatDir::Right.bit()),
            HAT_CENTERED
        );
    }

    #[test]
    fn hat_sequence_up_then_right_then_release_up() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        engine.handle_event(InputEvent::key(code::BTN_DPAD_UP, true), &mut sink);
        assert_eq!(engine.gamepad().hat, 0);

        engine.handle_event(InputEvent::key(code::BTN_DPAD_RIGHT, true), &mut sink);
        assert_eq!(engine.gamepad().hat, 1);

        engine.handle_event(InputEvent::key(code::BTN_DPAD_UP, false), &mut sink);
        assert_eq!(engine.gamepad().hat, 2);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Report Layout Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn gamepad_report_wire_layout() {
        let report = GamepadReport {
            hat: 3,
            buttons: 0x1FFF,
            x: 0x10,
            y: 0x20,
            rx: 0x30,
            ry: 0x40,
        };
        let mut buf = [0u8; GAMEPAD_REPORT_SIZE];
        let written = report.serialize(&mut buf);
        assert_eq!(written, 7);
        assert_eq!(buf, [0x03, 0xFF, 0x1F, 0x10, 0x20, 0x30, 0x40]);
    }

    #[test]
    fn gamepad_serialize_buffer_too_small() {
        let report = GamepadReport::idle();
        let mut buf = [0u8; 4];
        assert_eq!(report.serialize(&mut buf), 0);
    }

    #[test]
    fn mouse_report_wire_layout_little_endian_signed() {
        let report = MouseReport {
            buttons: 0x03,
            x: -2,
            y: 0x1234,
            wheel: -1,
        };
        let mut buf = [0u8; MOUSE_REPORT_SIZE];
        let written = report.serialize(&mut buf);
        assert_eq!(written, 6);
        assert_eq!(buf, [0x03, 0xFE, 0xFF, 0x34, 0x12, 0xFF]);
    }

    #[test]
    fn keyboard_report_wire_layout() {
        let mut report = KeyboardReport::idle();
        report.set_modifier(1, true);
        report.press(0x10);
        report.press(0x11);
        let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
        let written = report.serialize(&mut buf);
        assert_eq!(written, 8);
        assert_eq!(buf, [0x02, 0x00, 0x10, 0x11, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn report_map_concatenates_all_three_collections() {
        // Starts with the gamepad collection preamble.
        assert_eq!(&REPORT_MAP[..4], &[0x05, 0x01, 0x09, 0x05]);

        // All three report IDs are declared.
        for id in 1u8..=3 {
            assert!(
                REPORT_MAP.windows(2).any(|w| w == [0x85, id]),
                "missing report ID {id}"
            );
        }

        // Balanced collections.
        let opens = REPORT_MAP.windows(2).filter(|w| w[0] == 0xA1).count();
        let closes = REPORT_MAP.iter().filter(|&&b| b == 0xC0).count();
        assert_eq!(opens, closes);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Keyboard Rollover Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn keyboard_seventh_key_is_dropped() {
        let mut report = KeyboardReport::idle();
        for usage in 0x10..0x16 {
            report.press(usage);
        }
        report.press(0x20); // rollover overflow - silently dropped

        assert_eq!(report.keys, [0x10, 0x11, 0x12, 0x13, 0x14, 0x15]);
    }

    #[test]
    fn keyboard_release_frees_slot_for_next_press() {
        let mut report = KeyboardReport::idle();
        for usage in 0x10..0x16 {
            report.press(usage);
        }
        report.release(0x12);
        report.press(0x20);

        assert_eq!(report.keys, [0x10, 0x11, 0x20, 0x13, 0x14, 0x15]);
    }

    #[test]
    fn keyboard_release_preserves_slot_positions() {
        let mut report = KeyboardReport::idle();
        report.press(0x10);
        report.press(0x11);
        report.release(0x10);

        // Slot position, not compaction.
        assert_eq!(report.keys, [0x00, 0x11, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn keyboard_repeated_press_occupies_one_slot() {
        let mut report = KeyboardReport::idle();
        report.press(0x10);
        report.press(0x10);
        assert_eq!(report.keys, [0x10, 0x00, 0x00, 0x00, 0x00, 0x00]);

        report.release(0x10);
        assert_eq!(report.keys, [0; 6]);
    }

    #[test]
    fn keyboard_release_of_absent_usage_is_noop() {
        let mut report = KeyboardReport::idle();
        report.press(0x10);
        report.release(0x55);
        assert_eq!(report.keys, [0x10, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn keyboard_modifier_bits_set_and_clear() {
        let mut report = KeyboardReport::idle();
        report.set_modifier(0, true);
        report.set_modifier(1, true);
        assert_eq!(report.modifier, 0x03);
        report.set_modifier(0, false);
        assert_eq!(report.modifier, 0x02);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Event Classifier Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn event_kind_from_raw() {
        assert_eq!(EventKind::from_raw(0x01), Some(EventKind::Key));
        assert_eq!(EventKind::from_raw(0x02), Some(EventKind::Relative));
        assert_eq!(EventKind::from_raw(0x03), Some(EventKind::Absolute));
        assert_eq!(EventKind::from_raw(0x00), None);
        assert_eq!(EventKind::from_raw(0x7F), None);
    }

    #[test]
    fn unknown_raw_kind_is_discarded() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        engine.handle_raw(0x42, code::BTN_DPAD_UP, 1, &mut sink);

        assert!(sink.sent.is_empty());
        assert_eq!(engine.gamepad().hat, HAT_CENTERED);
    }

    #[test]
    fn unknown_key_code_is_ignored() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        // BTN_TOUCH drives the supervisor LED, not any report.
        engine.handle_event(InputEvent::key(code::BTN_TOUCH, true), &mut sink);
        engine.handle_event(InputEvent::key(0x2FF, true), &mut sink);

        assert!(sink.sent.is_empty());
    }

    #[test]
    fn unknown_axis_codes_are_ignored() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        engine.handle_event(InputEvent::absolute(0x07, 200), &mut sink);
        engine.handle_event(InputEvent::relative(0x07, 10), &mut sink);

        assert!(sink.sent.is_empty());
    }

    #[test]
    fn keymap_tables_are_disjoint() {
        let mut codes: Vec<u16> = Vec::new();
        codes.extend(keymap::HAT_MAP.iter().map(|(c, _)| *c));
        codes.extend(keymap::GAMEPAD_BUTTON_MAP.iter().map(|(c, _)| *c));
        codes.extend(keymap::MOUSE_BUTTON_MAP.iter().map(|(c, _)| *c));
        codes.extend(keymap::MODIFIER_MAP.iter().map(|(c, _)| *c));
        codes.extend(keymap::KEYBOARD_USAGE_MAP.iter().map(|(c, _)| *c));

        let mut deduped = codes.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(codes.len(), deduped.len());
    }

    // ════════════════════════════════════════════════════════════════════════
    // Encoder Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn stick_samples_overwrite_and_clamp() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        engine.handle_event(InputEvent::absolute(code::ABS_X, 300), &mut sink);
        assert_eq!(engine.gamepad().x, 255);

        engine.handle_event(InputEvent::absolute(code::ABS_Y, -5), &mut sink);
        assert_eq!(engine.gamepad().y, 0);

        engine.handle_event(InputEvent::absolute(code::ABS_X, 128), &mut sink);
        assert_eq!(engine.gamepad().x, 128);
    }

    #[test]
    fn relative_motion_is_last_value_wins_and_clamped() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();
        sink.busy = true; // hold transmissions so values accumulate visibly

        engine.handle_event(InputEvent::relative(code::REL_X, 10), &mut sink);
        engine.handle_event(InputEvent::relative(code::REL_X, 3), &mut sink);
        // Replacement, not accumulation.
        assert_eq!(engine.mouse().x, 3);

        engine.handle_event(InputEvent::relative(code::REL_Y, 40_000), &mut sink);
        assert_eq!(engine.mouse().y, i16::MAX);

        engine.handle_event(InputEvent::relative(code::REL_Z, -500), &mut sink);
        assert_eq!(engine.mouse().wheel, i8::MIN);
    }

    #[test]
    fn gamepad_button_key_is_idempotent() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        engine.handle_event(InputEvent::key(code::BTN_MODE, true), &mut sink);
        assert_eq!(engine.gamepad().buttons, 1 << 8);
        assert_eq!(sink.sent_of(ReportType::Gamepad).len(), 1);

        // Identical repeat: no state change, no transmission.
        engine.handle_event(InputEvent::key(code::BTN_MODE, true), &mut sink);
        assert_eq!(engine.gamepad().buttons, 1 << 8);
        assert_eq!(sink.sent_of(ReportType::Gamepad).len(), 1);
    }

    #[test]
    fn mouse_buttons_map_to_trigger_codes() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        engine.handle_event(InputEvent::key(code::BTN_TR2, true), &mut sink);
        assert_eq!(engine.mouse().buttons, 0b01);

        engine.handle_event(InputEvent::key(code::BTN_TL2, true), &mut sink);
        assert_eq!(engine.mouse().buttons, 0b11);

        engine.handle_event(InputEvent::key(code::BTN_TR2, false), &mut sink);
        assert_eq!(engine.mouse().buttons, 0b10);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Differential Dispatcher Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn unchanged_state_is_not_retransmitted() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        engine.handle_event(InputEvent::key(code::BTN_MODE, true), &mut sink);
        engine.handle_event(InputEvent::key(code::BTN_MODE, false), &mut sink);
        assert_eq!(sink.sent_of(ReportType::Gamepad).len(), 2);

        // Release when already released: byte image unchanged.
        engine.handle_event(InputEvent::key(code::BTN_MODE, false), &mut sink);
        assert_eq!(sink.sent_of(ReportType::Gamepad).len(), 2);
    }

    #[test]
    fn change_in_one_report_never_forces_another() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        engine.handle_event(InputEvent::key(code::BTN_DPAD_UP, true), &mut sink);

        assert_eq!(sink.sent_of(ReportType::Gamepad).len(), 1);
        assert!(sink.sent_of(ReportType::Mouse).is_empty());
        assert!(sink.sent_of(ReportType::Keyboard).is_empty());
    }

    #[test]
    fn mouse_deltas_reset_after_transmission() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        engine.handle_event(InputEvent::relative(code::REL_X, 25), &mut sink);

        let sent = sink.sent_of(ReportType::Mouse);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], [0x00, 25, 0x00, 0x00, 0x00, 0x00]);

        // Live deltas read zero after the send.
        assert_eq!(engine.mouse().x, 0);
        assert_eq!(engine.mouse().y, 0);
        assert_eq!(engine.mouse().wheel, 0);

        // A further event with no new motion must not re-notify: the
        // zeroed baseline equals the zeroed live buffer.
        engine.handle_event(InputEvent::key(code::BTN_TOUCH, false), &mut sink);
        assert_eq!(sink.sent_of(ReportType::Mouse).len(), 1);
    }

    #[test]
    fn mouse_button_state_survives_delta_reset() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        engine.handle_event(InputEvent::key(code::BTN_TR2, true), &mut sink);
        engine.handle_event(InputEvent::relative(code::REL_Y, -7), &mut sink);

        let sent = sink.sent_of(ReportType::Mouse);
        assert_eq!(sent.len(), 2);
        // Second report: button still held, y = -7.
        assert_eq!(sent[1], [0x01, 0x00, 0x00, 0xF9, 0xFF, 0x00]);
        assert_eq!(engine.mouse().buttons, 0x01);
    }

    #[test]
    fn busy_transport_defers_all_reports() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();
        sink.busy = true;

        engine.handle_event(InputEvent::key(code::BTN_DPAD_UP, true), &mut sink);
        engine.handle_event(InputEvent::key(code::BTN_START, true), &mut sink);
        assert!(sink.sent.is_empty());

        // Link idle again: the next event flushes the accumulated changes.
        sink.busy = false;
        engine.handle_event(InputEvent::relative(code::REL_Z, 1), &mut sink);

        assert_eq!(sink.sent_of(ReportType::Gamepad).len(), 1);
        assert_eq!(sink.sent_of(ReportType::Keyboard).len(), 1);
        assert_eq!(sink.sent_of(ReportType::Mouse).len(), 1);
    }

    #[test]
    fn unsubscribed_mouse_is_gated_without_blocking_others() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();
        sink.mouse_subscribed = false;

        engine.handle_event(InputEvent::relative(code::REL_X, 9), &mut sink);
        engine.handle_event(InputEvent::key(code::BTN_DPAD_UP, true), &mut sink);

        assert!(sink.sent_of(ReportType::Mouse).is_empty());
        assert_eq!(sink.sent_of(ReportType::Gamepad).len(), 1);

        // Subscription resumes: the unsent motion goes out within one
        // event cycle.
        sink.mouse_subscribed = true;
        engine.handle_event(InputEvent::key(code::BTN_DPAD_UP, false), &mut sink);

        let sent = sink.sent_of(ReportType::Mouse);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], [0x00, 9, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn keyboard_slot_images_on_the_wire() {
        let mut engine = InputEngine::new();
        let mut sink = MockSink::subscribed_all();

        // KEY_A maps to usage 0x10, KEY_B to 0x11.
        engine.handle_event(InputEvent::key(code::KEY_A, true), &mut sink);
        engine.handle_event(InputEvent::key(code::KEY_B, true), &mut sink);
        engine.handle_event(InputEvent::key(code::KEY_A, false), &mut sink);

        let sent = sink.sent_of(ReportType::Keyboard);
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0], [0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(sent[1], [0x00, 0x00, 0x10, 0x11, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(sent[2], [0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00, 0x00]);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Analog Scaling Tests
    // ════════════════════════════════════════════════════════════════════════

    const TEST_AXIS: AxisConfig = AxisConfig {
        offset: 0,
        dead_zone: 40,
        limit: 1650,
        invert: false,
    };

    #[test]
    fn analog_dead_zone_snaps_to_center() {
        assert_eq!(scale_axis(0, &TEST_AXIS), AXIS_CENTER);
        assert_eq!(scale_axis(39, &TEST_AXIS), AXIS_CENTER);
        assert_eq!(scale_axis(-39, &TEST_AXIS), AXIS_CENTER);
        assert_ne!(scale_axis(40, &TEST_AXIS), AXIS_CENTER);
    }

    #[test]
    fn analog_full_deflection_clamps_at_rails() {
        assert_eq!(scale_axis(1650, &TEST_AXIS), 255);
        assert_eq!(scale_axis(i16::MAX, &TEST_AXIS), 255);
        assert_eq!(scale_axis(-1650, &TEST_AXIS), 1);
        assert_eq!(scale_axis(i16::MIN, &TEST_AXIS), 0);
    }

    #[test]
    fn analog_offset_and_invert() {
        let cfg = AxisConfig {
            offset: -100,
            ..TEST_AXIS
        };
        // 100 raw cancels against the offset.
        assert_eq!(scale_axis(100, &cfg), AXIS_CENTER);

        let inverted = AxisConfig {
            invert: true,
            ..TEST_AXIS
        };
        let plain = scale_axis(825, &TEST_AXIS);
        let flipped = scale_axis(-825, &inverted);
        assert_eq!(plain, flipped);
        assert!(plain > AXIS_CENTER);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Touch / Supervisor Logic Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn touch_reports_edges_only() {
        let mut touch = TouchState::new();

        assert_eq!(touch.update(3, 15), None);
        assert_eq!(touch.update(30, 15), Some(true));
        assert_eq!(touch.update(45, 15), None);
        assert_eq!(touch.update(2, 15), Some(false));
        assert_eq!(touch.update(1, 15), None);
    }

    #[test]
    fn touch_threshold_is_exclusive() {
        let mut touch = TouchState::new();
        assert_eq!(touch.update(15, 15), None);
        assert!(!touch.is_touched());
        assert_eq!(touch.update(16, 15), Some(true));
    }

    #[test]
    fn battery_soc_is_linear_and_clamped() {
        assert_eq!(battery_soc(4200), 100);
        assert_eq!(battery_soc(3000), 0);
        assert_eq!(battery_soc(3600), 50);
        assert_eq!(battery_soc(5000), 100);
        assert_eq!(battery_soc(2500), 0);
    }

    #[test]
    fn chord_mode_start_requests_unpair() {
        let mut chords = ChordTracker::new();

        assert_eq!(chords.observe(&InputEvent::key(code::BTN_MODE, true)), None);
        assert_eq!(
            chords.observe(&InputEvent::key(code::BTN_START, true)),
            Some(SystemRequest::Unpair)
        );
    }

    #[test]
    fn chord_mode_select_requests_shutdown() {
        let mut chords = ChordTracker::new();

        assert_eq!(
            chords.observe(&InputEvent::key(code::BTN_SELECT, true)),
            None
        );
        assert_eq!(
            chords.observe(&InputEvent::key(code::BTN_MODE, true)),
            Some(SystemRequest::Shutdown)
        );
    }

    #[test]
    fn chord_releases_disarm() {
        let mut chords = ChordTracker::new();

        chords.observe(&InputEvent::key(code::BTN_MODE, true));
        chords.observe(&InputEvent::key(code::BTN_MODE, false));
        assert_eq!(
            chords.observe(&InputEvent::key(code::BTN_START, true)),
            None
        );
    }

    #[test]
    fn chord_ignores_non_key_events() {
        let mut chords = ChordTracker::new();
        assert_eq!(
            chords.observe(&InputEvent::absolute(code::ABS_X, 200)),
            None
        );
    }

    #[test]
    fn idle_shutdown_after_delay() {
        assert!(!should_idle_shutdown(0, 1_200_000));
        assert!(!should_idle_shutdown(1_200_000, 1_200_000));
        assert!(should_idle_shutdown(1_200_001, 1_200_000));
    }
}
