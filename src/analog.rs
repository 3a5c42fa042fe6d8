//! Analog stick sampling task (SAADC).
//!
//! Samples both stick channels every 15 ms, scales each raw value with
//! [`crate::analog_logic::scale_axis`] and reports an Absolute input
//! event only when the scaled byte changes, keeping the event queue
//! quiet while the stick rests. A third channel on VDDH/5 feeds the
//! battery gauge in the supervisor.

use defmt::debug;
use embassy_nrf::saadc::Saadc;
use embassy_time::{Duration, Ticker};

use crate::analog_logic::{scale_axis, AxisConfig};
use crate::ble::INPUT_EVENTS;
use crate::config;
use crate::input::{code, InputEvent};
use crate::supervisor;

/// Number of sampled stick channels.
pub const CHANNELS: usize = 2;

/// Total SAADC channels: sticks plus the battery voltage tap.
pub const SAADC_CHANNELS: usize = CHANNELS + 1;

/// Fixed channel-to-axis wiring.
const AXIS_CODES: [u16; CHANNELS] = [code::ABS_X, code::ABS_Y];

/// Calibration per channel. The Y axis is inverted so that stick-up
/// reads as low values, matching the report descriptor orientation.
const AXIS_CONFIG: [AxisConfig; CHANNELS] = [
    AxisConfig {
        offset: 0,
        dead_zone: config::ANALOG_DEAD_ZONE,
        limit: config::ANALOG_LIMIT,
        invert: false,
    },
    AxisConfig {
        offset: 0,
        dead_zone: config::ANALOG_DEAD_ZONE,
        limit: config::ANALOG_LIMIT,
        invert: true,
    },
];

/// Battery voltage from a raw VDDH/5 sample. 12-bit resolution, 1/6
/// gain against the 0.6 V internal reference puts full scale at 3.6 V
/// on the pin, 18 V on the supply side of the divider.
fn vbatt_mv(raw: i16) -> u32 {
    raw.max(0) as u32 * 18000 / 4096
}

/// Sample the sticks and the battery tap forever.
pub async fn analog_task(mut adc: Saadc<'_, SAADC_CHANNELS>) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(config::ANALOG_SAMPLE_MS));
    let mut out = [0u8; CHANNELS];

    loop {
        let mut bufs = [0i16; SAADC_CHANNELS];
        adc.sample(&mut bufs).await;

        debug!("analog: {} {}", bufs[0], bufs[1]);
        supervisor::battery_sample(vbatt_mv(bufs[CHANNELS]));

        for i in 0..CHANNELS {
            let scaled = scale_axis(bufs[i], &AXIS_CONFIG[i]);
            if scaled != out[i] {
                INPUT_EVENTS
                    .send(InputEvent::absolute(AXIS_CODES[i], scaled as i32))
                    .await;
            }
            out[i] = scaled;
        }

        ticker.next().await;
    }
}
