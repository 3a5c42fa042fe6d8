//! Capacitive touch sense task.
//!
//! A drive pin charges the touch surface while a sense pin watches the
//! rise; the number of polls before the sense line goes high grows with
//! finger capacitance. The poll loop runs inside a critical section so
//! scheduling jitter cannot inflate the count.

use cortex_m::asm;
use defmt::debug;
use embassy_nrf::gpio::{Input, Output};
use embassy_time::{Duration, Ticker};

use crate::ble::INPUT_EVENTS;
use crate::config;
use crate::input::{code, InputEvent};
use crate::touch_logic::TouchState;

/// One charge measurement: polls until the sense line rises or the poll
/// limit is hit.
fn measure(drive: &mut Output<'_>, sense: &Input<'_>) -> u32 {
    let mut steps = 0;

    critical_section::with(|_| {
        drive.set_high();
        while steps < config::TOUCH_POLL_LIMIT {
            if sense.is_high() {
                break;
            }
            // ~1 us pause between polls at 64 MHz
            asm::delay(64);
            steps += 1;
        }
    });

    drive.set_low();
    steps
}

/// Sample the touch surface every 50 ms, reporting edges as key events.
pub async fn touch_task(mut drive: Output<'static>, sense: Input<'static>) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(config::TOUCH_SAMPLE_MS));
    let mut state = TouchState::new();

    loop {
        let steps = measure(&mut drive, &sense);
        debug!("sense: {}", steps);

        if let Some(touched) = state.update(steps, config::TOUCH_THRESHOLD) {
            INPUT_EVENTS
                .send(InputEvent::key(code::BTN_TOUCH, touched))
                .await;
        }

        ticker.next().await;
    }
}
