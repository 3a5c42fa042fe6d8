//! Bond/connection bookkeeping behind the status LED.
//!
//! Connection and bond transitions funnel through here; every change
//! recomputes the [`LinkStatus`] and signals the LED task to switch
//! patterns.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::ble::LinkStatus;

static BONDED: AtomicBool = AtomicBool::new(false);
static CONNECTED: AtomicBool = AtomicBool::new(false);

/// Wakes the LED task with the pattern to show.
pub static STATUS_CHANGED: Signal<CriticalSectionRawMutex, LinkStatus> = Signal::new();

pub fn current() -> LinkStatus {
    if CONNECTED.load(Ordering::Relaxed) {
        LinkStatus::Connected
    } else if BONDED.load(Ordering::Relaxed) {
        LinkStatus::Paired
    } else {
        LinkStatus::Searching
    }
}

pub fn connection_changed(connected: bool) {
    CONNECTED.store(connected, Ordering::Relaxed);
    STATUS_CHANGED.signal(current());
}

pub fn bond_state_changed(bonded: bool) {
    BONDED.store(bonded, Ordering::Relaxed);
    STATUS_CHANGED.signal(current());
}
