//! Status LED patterns.
//!
//! One PWM channel shows the radio-link state:
//!   - Searching:  short blink every second
//!   - Paired:     slow breathe, dark between cycles
//!   - Connected:  inverse breathe (mostly lit)
//!
//! The task re-reads the pattern whenever `STATUS_CHANGED` fires, so a
//! state transition interrupts the running animation immediately. The
//! supervisor can also request a solid acknowledgment flash (unpair,
//! shutdown) through `ACKNOWLEDGE`.

use embassy_futures::select::{select3, Either3};
use embassy_nrf::pwm::{Instance, SimplePwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};

use crate::ble::status::STATUS_CHANGED;
use crate::ble::{status, LinkStatus};

/// Solid acknowledgment flash request, hold time in ms.
pub static ACKNOWLEDGE: Signal<CriticalSectionRawMutex, u64> = Signal::new();

/// Acknowledgment hold for unpair.
pub const ACK_SHORT_MS: u64 = 500;
/// Acknowledgment hold for shutdown.
pub const ACK_LONG_MS: u64 = 1500;

/// PWM top value; duty values below are out of this.
const PWM_MAX: u16 = 100;

/// Brightness ceiling for the breathing patterns.
const BREATHE_TOP: u16 = 40;

fn set_brightness<T: Instance>(pwm: &mut SimplePwm<'_, T>, duty: u16) {
    // Duty is inverted on the active-low LED rail.
    pwm.set_duty(0, PWM_MAX - duty.min(PWM_MAX));
}

/// One animation step, interruptible by a status change or an
/// acknowledgment request. Returns the status to animate next when the
/// step was interrupted.
async fn step<T: Instance>(
    pwm: &mut SimplePwm<'_, T>,
    duty: u16,
    hold: Duration,
) -> Option<LinkStatus> {
    set_brightness(pwm, duty);
    match select3(STATUS_CHANGED.wait(), ACKNOWLEDGE.wait(), Timer::after(hold)).await {
        Either3::First(next) => Some(next),
        Either3::Second(hold_ms) => {
            set_brightness(pwm, PWM_MAX);
            Timer::after(Duration::from_millis(hold_ms)).await;
            set_brightness(pwm, 0);
            Some(status::current())
        }
        Either3::Third(()) => None,
    }
}

async fn blink_searching<T: Instance>(pwm: &mut SimplePwm<'_, T>) -> LinkStatus {
    loop {
        if let Some(next) = step(pwm, 50, Duration::from_millis(30)).await {
            return next;
        }
        if let Some(next) = step(pwm, 0, Duration::from_secs(1)).await {
            return next;
        }
    }
}

async fn breathe<T: Instance>(pwm: &mut SimplePwm<'_, T>, inverse: bool) -> LinkStatus {
    loop {
        for i in (0..=BREATHE_TOP).chain((0..=BREATHE_TOP).rev()) {
            let duty = if inverse { BREATHE_TOP - i } else { i };
            if let Some(next) = step(pwm, duty, Duration::from_millis(5)).await {
                return next;
            }
        }
        let rest = if inverse { BREATHE_TOP } else { 0 };
        if let Some(next) = step(pwm, rest, Duration::from_secs(2)).await {
            return next;
        }
    }
}

/// Drive the LED forever, following the link status.
pub async fn led_task<T: Instance>(mut pwm: SimplePwm<'_, T>) -> ! {
    pwm.set_max_duty(PWM_MAX);
    let mut current = status::current();

    loop {
        current = match current {
            LinkStatus::Searching => blink_searching(&mut pwm).await,
            LinkStatus::Paired => breathe(&mut pwm, false).await,
            LinkStatus::Connected => breathe(&mut pwm, true).await,
        };
    }
}
