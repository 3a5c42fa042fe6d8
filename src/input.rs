//! Input event types - the boundary between the sensor drivers and the
//! report translation engine.
//!
//! Drivers (buttons, analog sticks, touch sense) report every raw
//! transition as an [`InputEvent`]; the engine consumes them synchronously.
//! Codes follow the Linux/Zephyr `input-event-codes` vocabulary so the
//! keymap tables stay recognisable next to a device tree.

/// Event kind - which encoder family an event is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Button / key transition. `value` 0 = released, nonzero = pressed.
    Key,
    /// Absolute axis sample (analog stick), pre-scaled to 0..=255 upstream.
    Absolute,
    /// Relative axis delta (pointer motion, wheel).
    Relative,
}

impl EventKind {
    /// Convert a raw wire/driver kind byte.
    ///
    /// Returns `None` for kinds outside the fixed vocabulary; the caller
    /// logs and discards those (non-fatal).
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x01 => Some(EventKind::Key),
            0x02 => Some(EventKind::Relative),
            0x03 => Some(EventKind::Absolute),
            _ => None,
        }
    }
}

/// One physical input transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    pub kind: EventKind,
    /// Opaque control identifier from the `code` constants below.
    pub code: u16,
    /// For `Key`: 0 = released, nonzero = pressed. For axes: magnitude.
    pub value: i32,
}

impl InputEvent {
    pub const fn key(code: u16, pressed: bool) -> Self {
        Self {
            kind: EventKind::Key,
            code,
            value: pressed as i32,
        }
    }

    pub const fn absolute(code: u16, value: i32) -> Self {
        Self {
            kind: EventKind::Absolute,
            code,
            value,
        }
    }

    pub const fn relative(code: u16, value: i32) -> Self {
        Self {
            kind: EventKind::Relative,
            code,
            value,
        }
    }
}

/// Input code constants (Linux `input-event-codes.h` values).
pub mod code {
    // Keyboard-row keys reused as extra controls
    pub const KEY_1: u16 = 2;
    pub const KEY_2: u16 = 3;
    pub const KEY_3: u16 = 4;
    pub const KEY_0: u16 = 11;
    pub const KEY_A: u16 = 30;
    pub const KEY_D: u16 = 32;
    pub const KEY_C: u16 = 46;
    pub const KEY_B: u16 = 48;

    // Gamepad face / shoulder buttons
    pub const BTN_SOUTH: u16 = 0x130;
    pub const BTN_EAST: u16 = 0x131;
    pub const BTN_NORTH: u16 = 0x133;
    pub const BTN_WEST: u16 = 0x134;
    pub const BTN_TL: u16 = 0x136;
    pub const BTN_TR: u16 = 0x137;
    pub const BTN_TL2: u16 = 0x138;
    pub const BTN_TR2: u16 = 0x139;
    pub const BTN_SELECT: u16 = 0x13a;
    pub const BTN_START: u16 = 0x13b;
    pub const BTN_MODE: u16 = 0x13c;
    pub const BTN_THUMBL: u16 = 0x13d;
    pub const BTN_THUMBR: u16 = 0x13e;

    // Capacitive touch surface
    pub const BTN_TOUCH: u16 = 0x14a;

    // Directional pad
    pub const BTN_DPAD_UP: u16 = 0x220;
    pub const BTN_DPAD_DOWN: u16 = 0x221;
    pub const BTN_DPAD_LEFT: u16 = 0x222;
    pub const BTN_DPAD_RIGHT: u16 = 0x223;

    // Axes
    pub const ABS_X: u16 = 0x00;
    pub const ABS_Y: u16 = 0x01;
    pub const REL_X: u16 = 0x00;
    pub const REL_Y: u16 = 0x01;
    pub const REL_Z: u16 = 0x02;
}
