//! GPIO button scan task.
//!
//! All buttons are active-low against internal pull-ups. A fixed-rate
//! poll doubles as the debounce: a contact has to hold its new level
//! across a full scan period before the change is reported.

use embassy_nrf::gpio::Input;
use embassy_time::{Duration, Ticker};

use crate::ble::INPUT_EVENTS;
use crate::config;
use crate::input::InputEvent;

/// One scanned button: its input pin and the event code it reports.
pub struct Button {
    pub pin: Input<'static>,
    pub code: u16,
}

/// Scan the button array forever, reporting edges as key events.
pub async fn buttons_task<const N: usize>(mut buttons: [Button; N]) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(config::BUTTON_SCAN_MS));
    let mut pressed = [false; N];
    let mut pending = [false; N];

    loop {
        for (i, button) in buttons.iter_mut().enumerate() {
            let level = button.pin.is_low();

            if level == pressed[i] {
                pending[i] = false;
            } else if pending[i] {
                pending[i] = false;
                pressed[i] = level;
                INPUT_EVENTS.send(InputEvent::key(button.code, level)).await;
            } else {
                pending[i] = true;
            }
        }

        ticker.next().await;
    }
}
