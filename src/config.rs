//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, calibration values and protocol constants live
//! here so they can be tuned in one place.

// BLE

/// GAP device name carried in the advertisement.
pub const BLE_DEVICE_NAME: &str = "pad2ble";

/// GAP appearance: Gamepad (HID subtype).
pub const BLE_APPEARANCE: u16 = 0x03C4;

/// BLE connection interval range (in 1.25 ms units).
/// 6 = 7.5 ms (lowest latency for HID).
pub const BLE_CONN_INTERVAL_MIN: u16 = 6;
pub const BLE_CONN_INTERVAL_MAX: u16 = 12;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

// Input sampling

/// Analog stick sampling period (ms).
pub const ANALOG_SAMPLE_MS: u64 = 15;

/// Dead zone around the mechanical stick center, in raw ADC counts.
pub const ANALOG_DEAD_ZONE: i32 = 40;

/// Raw ADC count mapping to full stick deflection.
pub const ANALOG_LIMIT: i32 = 1650;

/// Button scan period (ms). One period of settling doubles as debounce.
pub const BUTTON_SCAN_MS: u64 = 10;

/// Touch sense sampling period (ms).
pub const TOUCH_SAMPLE_MS: u64 = 50;

/// Maximum charge polls per touch measurement.
pub const TOUCH_POLL_LIMIT: u32 = 50;

/// Charge polls above which the surface counts as touched.
pub const TOUCH_THRESHOLD: u32 = 15;

// Power management

/// Battery state-of-charge refresh period (ms).
pub const SOC_UPDATE_MS: u64 = 10 * 1000;

/// Inactivity delay before the device powers itself off (ms).
pub const SHUTDOWN_DELAY_MS: u64 = 20 * 60 * 1000;

/// Hardware watchdog window (ms). Fed once a second by the supervisor.
pub const WATCHDOG_TIMEOUT_MS: u32 = 5000;

/// Port-0 pin of the Mode button, latched as the System OFF wake source.
pub const WAKE_BUTTON_PIN: usize = 26;

// Event plumbing

/// Depth of the sensor-to-engine input event channel. The dispatcher
/// reads "queued events pending" as transport backpressure, so the
/// channel stays shallow.
pub const INPUT_QUEUE_DEPTH: usize = 8;
