//! Input-event-to-report translation and notification engine.
//!
//! One [`InputEngine`] instance owns the three live report buffers, their
//! last-sent snapshots and the hat bitmask. Every [`InputEvent`] flows
//! through classify → encode → dispatch in a single synchronous call, so
//! confining the engine to one execution context is enough to keep every
//! transmitted byte image an atomic snapshot.
//!
//! Transmission is differential: a report goes out only when its live
//! buffer differs from the last-sent copy, and only while the sink is
//! subscribed to that report and the outbound path is idle. Gamepad and
//! keyboard fields are latched; mouse x/y/wheel are deltas, zeroed by the
//! dispatcher right after a successful send.

use crate::hid::{GamepadReport, KeyboardReport, MouseReport, ReportType};
use crate::hid::gamepad::hat_code;
use crate::input::{code, EventKind, InputEvent};
use crate::keymap;

/// Transport seam between the engine and the radio-link collaborator.
///
/// `notify` must treat the passed bytes as read-only; they are only valid
/// for the duration of the call.
pub trait ReportSink {
    /// Whether the remote peer has enabled notifications for this report.
    fn is_subscribed(&self, report: ReportType) -> bool;

    /// Whether the outbound path currently has backpressure. Polled once
    /// per event; the engine never waits on it.
    fn transport_busy(&self) -> bool;

    /// Hand a changed report to the transport for transmission.
    fn notify(&mut self, report: ReportType, data: &[u8]);
}

/// Stateful translation engine. See the module docs.
pub struct InputEngine {
    hat_bits: u8,

    gamepad: GamepadReport,
    gamepad_last: GamepadReport,

    mouse: MouseReport,
    mouse_last: MouseReport,

    keyboard: KeyboardReport,
    keyboard_last: KeyboardReport,
}

impl Default for InputEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InputEngine {
    pub const fn new() -> Self {
        Self {
            hat_bits: 0,
            gamepad: GamepadReport::idle(),
            gamepad_last: GamepadReport::idle(),
            mouse: MouseReport::idle(),
            mouse_last: MouseReport::idle(),
            keyboard: KeyboardReport::idle(),
            keyboard_last: KeyboardReport::idle(),
        }
    }

    /// Process one event end to end: route it to the matching encoders,
    /// then evaluate all three reports for transmission.
    pub fn handle_event<S: ReportSink>(&mut self, event: InputEvent, sink: &mut S) {
        match event.kind {
            EventKind::Key => {
                self.encode_hat(event.code, event.value);
                self.encode_gamepad_button(event.code, event.value);
                self.encode_mouse_button(event.code, event.value);
                self.encode_keyboard_key(event.code, event.value);
            }
            EventKind::Absolute => self.encode_stick(event.code, event.value),
            EventKind::Relative => self.encode_motion(event.code, event.value),
        }

        self.dispatch(sink);
    }

    /// Process an event whose kind byte comes from an untrusted source.
    /// Unknown kinds are logged and discarded; no report is mutated.
    pub fn handle_raw<S: ReportSink>(&mut self, kind: u8, code: u16, value: i32, sink: &mut S) {
        match EventKind::from_raw(kind) {
            Some(k) => self.handle_event(
                InputEvent {
                    kind: k,
                    code,
                    value,
                },
                sink,
            ),
            None => {
                #[cfg(feature = "defmt")]
                defmt::error!("unrecognized event kind: {:#x}", kind);
            }
        }
    }

    /// Current live gamepad state (for tests and diagnostics).
    pub fn gamepad(&self) -> &GamepadReport {
        &self.gamepad
    }

    pub fn mouse(&self) -> &MouseReport {
        &self.mouse
    }

    pub fn keyboard(&self) -> &KeyboardReport {
        &self.keyboard
    }

    // - Encoders ---------------------------------------------------------

    /// Keep the 4-bit direction bitmask and recompute the hat octant.
    fn encode_hat(&mut self, code: u16, value: i32) {
        let Some(dir) = keymap::hat_dir(code) else {
            return;
        };

        if value != 0 {
            self.hat_bits |= dir.bit();
        } else {
            self.hat_bits &= !dir.bit();
        }

        self.gamepad.hat = hat_code(self.hat_bits);
    }

    fn encode_gamepad_button(&mut self, code: u16, value: i32) {
        if let Some(bit) = keymap::lookup(keymap::GAMEPAD_BUTTON_MAP, code) {
            self.gamepad.set_button(bit, value != 0);
        }
    }

    fn encode_mouse_button(&mut self, code: u16, value: i32) {
        if let Some(bit) = keymap::lookup(keymap::MOUSE_BUTTON_MAP, code) {
            self.mouse.set_button(bit, value != 0);
        }
    }

    fn encode_keyboard_key(&mut self, code: u16, value: i32) {
        if let Some(bit) = keymap::lookup(keymap::MODIFIER_MAP, code) {
            self.keyboard.set_modifier(bit, value != 0);
            return;
        }

        let Some(usage) = keymap::lookup(keymap::KEYBOARD_USAGE_MAP, code) else {
            return;
        };

        if value != 0 {
            self.keyboard.press(usage);
        } else {
            self.keyboard.release(usage);
        }
    }

    /// Absolute stick sample, pre-scaled upstream; only clamped here.
    fn encode_stick(&mut self, code: u16, value: i32) {
        let clamped = value.clamp(0, u8::MAX as i32) as u8;
        match code {
            code::ABS_X => self.gamepad.x = clamped,
            code::ABS_Y => self.gamepad.y = clamped,
            _ => {}
        }
    }

    /// Relative pointer motion. Last value wins within a dispatch window;
    /// the dispatcher zeroes the fields after each transmitted report.
    fn encode_motion(&mut self, code: u16, value: i32) {
        match code {
            code::REL_X => self.mouse.x = value.clamp(i16::MIN as i32, i16::MAX as i32) as i16,
            code::REL_Y => self.mouse.y = value.clamp(i16::MIN as i32, i16::MAX as i32) as i16,
            code::REL_Z => self.mouse.wheel = value.clamp(i8::MIN as i32, i8::MAX as i32) as i8,
            _ => {}
        }
    }

    // - Differential dispatcher ------------------------------------------

    /// Compare each live report against its last-sent snapshot and notify
    /// the sink about the ones that changed.
    ///
    /// A busy transport defers all three checks to the next event; nothing
    /// is compared or mutated. An unsubscribed report type is skipped on
    /// its own while the other channels proceed - the live buffer keeps
    /// accumulating state and the first comparison after the subscription
    /// resumes catches up in one cycle.
    fn dispatch<S: ReportSink>(&mut self, sink: &mut S) {
        if sink.transport_busy() {
            return;
        }

        let mut buf = [0u8; crate::hid::MAX_REPORT_SIZE];

        if sink.is_subscribed(ReportType::Gamepad) && self.gamepad != self.gamepad_last {
            let n = self.gamepad.serialize(&mut buf);
            sink.notify(ReportType::Gamepad, &buf[..n]);
            self.gamepad_last = self.gamepad;
        }

        if sink.is_subscribed(ReportType::Mouse) && self.mouse != self.mouse_last {
            let n = self.mouse.serialize(&mut buf);
            sink.notify(ReportType::Mouse, &buf[..n]);
            // Deltas are consumed by the transmission. Resetting both the
            // live buffer and the snapshot makes the next comparison run
            // against a zeroed baseline, so an idle mouse never re-notifies.
            self.mouse.clear_motion();
            self.mouse_last = self.mouse;
        }

        if sink.is_subscribed(ReportType::Keyboard) && self.keyboard != self.keyboard_last {
            let n = self.keyboard.serialize(&mut buf);
            sink.notify(ReportType::Keyboard, &buf[..n]);
            self.keyboard_last = self.keyboard;
        }
    }
}
