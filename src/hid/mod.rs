//! HID report types and the composite report map.
//!
//! The device exposes three independent input reports over a single
//! HID-over-GATT service: gamepad (ID 1), mouse (ID 2) and keyboard
//! (ID 3). Each report has a fixed wire layout matching its section of
//! [`REPORT_MAP`] bit for bit.

pub mod gamepad;
pub mod keyboard;
pub mod mouse;

pub use gamepad::GamepadReport;
pub use keyboard::KeyboardReport;
pub use mouse::MouseReport;

/// Largest serialized report (keyboard, 8 bytes). Notification scratch
/// buffers are sized to this.
pub const MAX_REPORT_SIZE: usize = keyboard::KEYBOARD_REPORT_SIZE;

/// The three notification channels of the composite device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportType {
    Gamepad,
    Mouse,
    Keyboard,
}

impl ReportType {
    /// HID report ID as declared in the report map.
    pub const fn report_id(self) -> u8 {
        match self {
            ReportType::Gamepad => 1,
            ReportType::Mouse => 2,
            ReportType::Keyboard => 3,
        }
    }

    /// Serialized size of this report on the wire.
    pub const fn size(self) -> usize {
        match self {
            ReportType::Gamepad => gamepad::GAMEPAD_REPORT_SIZE,
            ReportType::Mouse => mouse::MOUSE_REPORT_SIZE,
            ReportType::Keyboard => keyboard::KEYBOARD_REPORT_SIZE,
        }
    }
}

/// Complete HID report map: gamepad, mouse and keyboard collections
/// concatenated. Served verbatim from the Report Map characteristic.
pub const REPORT_MAP: &[u8] = &concat_report_map();

const REPORT_MAP_LEN: usize = gamepad::GAMEPAD_DESCRIPTOR.len()
    + mouse::MOUSE_DESCRIPTOR.len()
    + keyboard::KEYBOARD_DESCRIPTOR.len();

const fn concat_report_map() -> [u8; REPORT_MAP_LEN] {
    let mut out = [0u8; REPORT_MAP_LEN];
    let mut i = 0;
    let mut j = 0;
    while j < gamepad::GAMEPAD_DESCRIPTOR.len() {
        out[i] = gamepad::GAMEPAD_DESCRIPTOR[j];
        i += 1;
        j += 1;
    }
    j = 0;
    while j < mouse::MOUSE_DESCRIPTOR.len() {
        out[i] = mouse::MOUSE_DESCRIPTOR[j];
        i += 1;
        j += 1;
    }
    j = 0;
    while j < keyboard::KEYBOARD_DESCRIPTOR.len() {
        out[i] = keyboard::KEYBOARD_DESCRIPTOR[j];
        i += 1;
        j += 1;
    }
    out
}
