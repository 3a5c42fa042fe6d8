//! Unified error type for pad2ble.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! The translation engine itself has no failure mode; these errors come
//! from the radio-link collaborators.

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The SoftDevice refused a request, raw error code attached.
    Softdevice(u32),

    /// Advertising could not be started.
    AdvertiseFailed,
}
