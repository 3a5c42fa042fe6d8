//! Static code-to-report mapping tables.
//!
//! A single key code is relevant to at most one of: hat direction, gamepad
//! button, mouse button, keyboard modifier, keyboard key. The tables are
//! disjoint by construction; lookups are linear scans, which is fine at
//! these sizes and keeps the tables greppable against the schematic.

use crate::hid::gamepad::HatDir;
use crate::input::code;

/// Directional pad codes and the hat bit they drive.
pub const HAT_MAP: &[(u16, HatDir)] = &[
    (code::BTN_DPAD_UP, HatDir::Up),
    (code::BTN_DPAD_DOWN, HatDir::Down),
    (code::BTN_DPAD_LEFT, HatDir::Left),
    (code::BTN_DPAD_RIGHT, HatDir::Right),
];

/// Gamepad button vector bits. Most physical buttons go out through the
/// keyboard report instead; only the home button is a gamepad button.
pub const GAMEPAD_BUTTON_MAP: &[(u16, u8)] = &[(code::BTN_MODE, 8)];

/// Mouse button bits (bit 0 = primary, bit 1 = secondary).
pub const MOUSE_BUTTON_MAP: &[(u16, u8)] = &[
    (code::BTN_TR2, 0),
    (code::BTN_TL2, 1),
];

/// Keyboard modifier byte bits.
pub const MODIFIER_MAP: &[(u16, u8)] = &[
    (code::KEY_D, 0),       // left ctrl
    (code::BTN_THUMBL, 1),  // left shift
];

/// Key code to HID keyboard usage.
pub const KEYBOARD_USAGE_MAP: &[(u16, u8)] = &[
    (code::KEY_0, 0x52), // dpad up
    (code::KEY_1, 0x51), // dpad down
    (code::KEY_2, 0x50), // dpad left
    (code::KEY_3, 0x4f), // dpad right
    //
    (code::BTN_NORTH, 0x17),
    (code::BTN_SOUTH, 0x09),
    (code::BTN_WEST, 0x15),
    (code::BTN_EAST, 0x19),
    //
    (code::BTN_SELECT, 0x2b),
    (code::BTN_START, 0x29),
    (code::KEY_A, 0x10), // select 2
    (code::KEY_B, 0x11), // start 2
    //
    (code::BTN_TL, 0x14),
    (code::BTN_TR, 0x08),
    //
    (code::KEY_C, 0x2c), // L4
];

/// Linear-scan lookup shared by the byte-valued tables.
pub fn lookup(map: &[(u16, u8)], code: u16) -> Option<u8> {
    map.iter().find(|(c, _)| *c == code).map(|(_, v)| *v)
}

/// Hat direction for a key code, if it is a directional-pad code.
pub fn hat_dir(code: u16) -> Option<HatDir> {
    HAT_MAP.iter().find(|(c, _)| *c == code).map(|(_, d)| *d)
}
