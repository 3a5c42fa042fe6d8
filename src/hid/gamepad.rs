//! HID gamepad report (report ID 1).
//!
//! Layout (7 bytes):
//! ```text
//! Byte 0:   Hat switch octant (low nibble, 0-7 + 8 = centered),
//!           high nibble constant padding
//! Byte 1-2: 13-bit button vector (little-endian, top 3 bits padding)
//! Byte 3:   Left stick X  (unsigned, 0-255, 128 = center)
//! Byte 4:   Left stick Y
//! Byte 5:   Right stick X (Rx)
//! Byte 6:   Right stick Y (Ry)
//! ```

/// Gamepad report size in bytes.
pub const GAMEPAD_REPORT_SIZE: usize = 7;

/// Hat code transmitted when no valid direction is held.
pub const HAT_CENTERED: u8 = 8;

/// Directional-pad bit positions inside the hat bitmask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HatDir {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl HatDir {
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Map a 4-bit direction bitmask to the 8-way hat octant code.
///
/// Single directions map to the cardinals, adjacent pairs to the
/// intercardinals; everything else (opposite pairs, three or more
/// directions, none) reads as centered. Total over all 16 inputs.
pub fn hat_code(bits: u8) -> u8 {
    const UP: u8 = HatDir::Up.bit();
    const DOWN: u8 = HatDir::Down.bit();
    const LEFT: u8 = HatDir::Left.bit();
    const RIGHT: u8 = HatDir::Right.bit();

    match bits {
        b if b == UP => 0,
        b if b == UP | RIGHT => 1,
        b if b == RIGHT => 2,
        b if b == RIGHT | DOWN => 3,
        b if b == DOWN => 4,
        b if b == DOWN | LEFT => 5,
        b if b == LEFT => 6,
        b if b == LEFT | UP => 7,
        _ => HAT_CENTERED,
    }
}

/// Live gamepad report state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadReport {
    /// Hat octant code (0-8).
    pub hat: u8,
    /// Button vector, 13 bits used.
    pub buttons: u16,
    /// Left stick, unsigned bytes centered at 128.
    pub x: u8,
    pub y: u8,
    /// Right stick.
    pub rx: u8,
    pub ry: u8,
}

impl Default for GamepadReport {
    fn default() -> Self {
        Self::idle()
    }
}

impl GamepadReport {
    /// Report with hat centered, no buttons, stick bytes at power-on zero.
    /// The analog sampler overwrites the stick bytes on its first pass.
    pub const fn idle() -> Self {
        Self {
            hat: HAT_CENTERED,
            buttons: 0,
            x: 0,
            y: 0,
            rx: 0,
            ry: 0,
        }
    }

    /// Set or clear one bit of the button vector.
    pub fn set_button(&mut self, bit: u8, pressed: bool) {
        if pressed {
            self.buttons |= 1 << bit;
        } else {
            self.buttons &= !(1 << bit);
        }
    }

    /// Serialise into a byte slice for GATT notification.
    /// Returns the number of bytes written (always 7).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < GAMEPAD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.hat;
        buf[1..3].copy_from_slice(&self.buttons.to_le_bytes());
        buf[3] = self.x;
        buf[4] = self.y;
        buf[5] = self.rx;
        buf[6] = self.ry;
        GAMEPAD_REPORT_SIZE
    }
}

/// Gamepad section of the HID report map.
pub const GAMEPAD_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Game Pad)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x01, //   Report ID (1)
    //
    //   - Hat switch (4 bits + 4 padding) -
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, // Physical Maximum (315)
    0x65, 0x14, //   Unit (Degrees, English Rotation)
    0x09, 0x39, //   Usage (Hat switch)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x45, 0x00, //   Physical Maximum (0)
    0x65, 0x00, //   Unit (None)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x01, //   Input (Constant) - padding
    //
    //   - Buttons (13 bits + 3 padding) -
    0x05, 0x09, //   Usage Page (Button)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x0D, //   Report Count (13)
    0x09, 0x01, //   Usage (Button South)
    0x09, 0x02, //   Usage (Button East)
    0x09, 0x04, //   Usage (Button North)
    0x09, 0x05, //   Usage (Button West)
    0x09, 0x07, //   Usage (TL)
    0x09, 0x08, //   Usage (TR)
    0x09, 0x0B, //   Usage (Select)
    0x09, 0x0C, //   Usage (Start)
    0x09, 0x0D, //   Usage (Mode)
    0x09, 0x0E, //   Usage (Thumb L)
    0x09, 0x0F, //   Usage (Thumb R)
    0x09, 0x11, //   Usage (Trigger Happy 1)
    0x09, 0x12, //   Usage (Trigger Happy 2)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x03, //   Report Count (3)
    0x81, 0x01, //   Input (Constant) - padding
    //
    //   - Left stick (X, Y) -
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x15, 0x01, //   Logical Minimum (1)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0xC0, //           End Collection
    //
    //   - Right stick (Rx, Ry) -
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    0x09, 0x33, //     Usage (Rx)
    0x09, 0x34, //     Usage (Ry)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0xC0, //           End Collection
    0xC0, // End Collection
];
