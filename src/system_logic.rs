//! System supervisor decision logic - button chords, battery gauge and
//! idle shutdown, separated from the embedded task for host testing.

use crate::input::{code, EventKind, InputEvent};

/// Battery voltage considered full (mV).
pub const VBATT_FULL_MV: i32 = 4200;
/// Battery voltage considered empty (mV).
pub const VBATT_EMPTY_MV: i32 = 3000;

/// Linear state-of-charge estimate from the battery voltage, in percent.
pub fn battery_soc(vbatt_mv: i32) -> u8 {
    let soc = (vbatt_mv - VBATT_EMPTY_MV) * 100 / (VBATT_FULL_MV - VBATT_EMPTY_MV);
    soc.clamp(0, 100) as u8
}

/// System-level request raised by a button chord.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemRequest {
    /// Mode + Start held together: delete bonds and restart pairing.
    Unpair,
    /// Mode + Select held together: power the device off.
    Shutdown,
}

/// Tracks the chord keys across events. The supervisor feeds it every
/// event it observes; most return `None`.
#[derive(Default)]
pub struct ChordTracker {
    mode: bool,
    start: bool,
    select: bool,
}

impl ChordTracker {
    pub const fn new() -> Self {
        Self {
            mode: false,
            start: false,
            select: false,
        }
    }

    /// Update chord state from one event. Returns a request when a chord
    /// becomes complete. Unpair wins over shutdown when both are held.
    pub fn observe(&mut self, event: &InputEvent) -> Option<SystemRequest> {
        if event.kind != EventKind::Key {
            return None;
        }

        match event.code {
            code::BTN_MODE => self.mode = event.value != 0,
            code::BTN_START => self.start = event.value != 0,
            code::BTN_SELECT => self.select = event.value != 0,
            _ => return None,
        }

        if self.mode && self.start {
            Some(SystemRequest::Unpair)
        } else if self.mode && self.select {
            Some(SystemRequest::Shutdown)
        } else {
            None
        }
    }
}

/// Whether the device has been idle long enough to power itself off.
pub fn should_idle_shutdown(idle_ms: u64, shutdown_delay_ms: u64) -> bool {
    idle_ms > shutdown_delay_ms
}
