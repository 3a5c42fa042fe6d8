//! HID mouse report (report ID 2).
//!
//! Layout (6 bytes):
//! ```text
//! Byte 0:   Button bitfield (bit 0 = primary, bit 1 = secondary, 3 used)
//! Byte 1-2: X displacement (signed 16-bit, little-endian)
//! Byte 3-4: Y displacement (signed 16-bit, little-endian)
//! Byte 5:   Scroll wheel   (signed, -127..127)
//! ```
//!
//! X, Y and wheel carry *delta* semantics: motion since the last
//! transmission. The dispatcher zeroes them after a successful send; the
//! encoder never resets them itself.

/// Mouse report size in bytes.
pub const MOUSE_REPORT_SIZE: usize = 6;

/// Live mouse report state.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield, 3 bits used.
    pub buttons: u8,
    /// Relative X movement since last transmission.
    pub x: i16,
    /// Relative Y movement since last transmission.
    pub y: i16,
    /// Scroll wheel delta since last transmission.
    pub wheel: i8,
}

impl MouseReport {
    /// Idle (no movement, no buttons) report.
    pub const fn idle() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
        }
    }

    /// Set or clear one button bit.
    pub fn set_button(&mut self, bit: u8, pressed: bool) {
        if pressed {
            self.buttons |= 1 << bit;
        } else {
            self.buttons &= !(1 << bit);
        }
    }

    /// Zero the delta fields, keeping button state.
    pub fn clear_motion(&mut self) {
        self.x = 0;
        self.y = 0;
        self.wheel = 0;
    }

    /// Serialise into a byte slice for GATT notification.
    /// Returns the number of bytes written (always 6).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.buttons;
        buf[1..3].copy_from_slice(&self.x.to_le_bytes());
        buf[3..5].copy_from_slice(&self.y.to_le_bytes());
        buf[5] = self.wheel as u8;
        MOUSE_REPORT_SIZE
    }
}

/// Mouse section of the HID report map.
pub const MOUSE_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x02, //   Report ID (2)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    //
    //   - Buttons (3 bits + 5 padding) -
    0x05, 0x09, //     Usage Page (Button)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x03, //     Usage Maximum (Button 3)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x03, //     Report Count (3)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x05, //     Report Size (5)
    0x81, 0x03, //     Input (Constant) - padding
    //
    //   - X, Y displacement (16-bit) -
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x16, 0x01, 0x80, // Logical Minimum (-32767)
    0x26, 0xFF, 0x7F, // Logical Maximum (32767)
    0x75, 0x10, //     Report Size (16)
    0x95, 0x02, //     Report Count (2)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    //   - Scroll wheel -
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x01, //     Report Count (1)
    0x09, 0x38, //     Usage (Wheel)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    0xC0, //   End Collection (Physical)
    0xC0, // End Collection (Application)
];
