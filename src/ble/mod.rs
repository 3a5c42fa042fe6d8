//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertiser** - connectable advertising with the HID and Battery
//!    service UUIDs, pairing/bonding via the SoftDevice security manager.
//! 2. **HID-over-GATT service** - the report map plus three Input Report
//!    characteristics (gamepad / mouse / keyboard); CCCD writes drive the
//!    engine's per-report subscription flags and GATT notifications carry
//!    the report bytes.
//! 3. **Status tracking** - bond/connection bookkeeping feeding the
//!    status LED pattern.
//!
//! Sensor tasks communicate with the BLE task via the bounded
//! `INPUT_EVENTS` channel defined here; the translation engine runs
//! entirely inside the BLE task, so its state needs no lock.

pub mod advertiser;
pub mod hog;
pub mod status;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::config::INPUT_QUEUE_DEPTH;
use crate::input::InputEvent;
use crate::system_logic::SystemRequest;

/// Sensor-to-engine event queue. A non-empty queue doubles as the
/// dispatcher's backpressure signal: drain first, notify after.
pub static INPUT_EVENTS: Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH> =
    Channel::new();

/// Chord requests from the supervisor (unpair / shutdown).
pub static SYSTEM_REQUESTS: Channel<CriticalSectionRawMutex, SystemRequest, 2> = Channel::new();

/// Radio-link state as shown to the user via the status LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum LinkStatus {
    /// No bond stored - advertising for a new host.
    Searching,
    /// Bonded but not currently connected.
    Paired,
    /// Connected to the bonded host.
    Connected,
}
