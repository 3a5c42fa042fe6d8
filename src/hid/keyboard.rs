//! HID keyboard report (report ID 3).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key usage codes (6-key rollover)
//! ```
//!
//! Slot order carries no meaning but stays stable between updates: a key
//! keeps its slot for as long as it is held, and release clears only the
//! slot(s) holding its usage code, without compaction.

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Number of rollover key slots.
pub const KEY_SLOTS: usize = 6;

/// Standard boot-protocol-shaped keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte, always 0x00 on the wire.
    pub reserved: u8,
    /// Rollover buffer of currently held key usage codes (0 = empty slot).
    pub keys: [u8; KEY_SLOTS],
}

impl KeyboardReport {
    /// All-keys-released report.
    pub const fn idle() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keys: [0; KEY_SLOTS],
        }
    }

    /// Record a key press: the usage code goes into the first empty slot.
    ///
    /// A usage already held keeps its single slot (repeated press events
    /// are no-ops). A press with all six slots occupied is dropped
    /// silently (rollover overflow, non-fatal by design).
    pub fn press(&mut self, usage: u8) {
        if self.keys.contains(&usage) {
            return;
        }
        for slot in self.keys.iter_mut() {
            if *slot == 0 {
                *slot = usage;
                return;
            }
        }
    }

    /// Record a key release: clears the first slot holding this usage
    /// code. No-op when the code is not present.
    pub fn release(&mut self, usage: u8) {
        for slot in self.keys.iter_mut() {
            if *slot == usage {
                *slot = 0;
                return;
            }
        }
    }

    /// Set or clear one modifier bit.
    pub fn set_modifier(&mut self, bit: u8, pressed: bool) {
        if pressed {
            self.modifier |= 1 << bit;
        } else {
            self.modifier &= !(1 << bit);
        }
    }

    /// Serialise into a byte slice for GATT notification.
    /// Returns the number of bytes written (always 8).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keys);
        KEYBOARD_REPORT_SIZE
    }
}

/// Keyboard section of the HID report map.
pub const KEYBOARD_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x03, //   Report ID (3)
    //
    //   - Modifier keys (8 bits) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x08, //   Report Count (8)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant) - padding
    //
    //   - Key codes (6 bytes) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x00, // Usage Maximum (255)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x00, //   Input (Data, Array)
    //
    0xC0, // End Collection
];
