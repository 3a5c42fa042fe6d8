//! System supervisor task.
//!
//! Owns everything that is not an input report: the battery gauge, the
//! unpair and shutdown chords, the idle timer and the hardware watchdog.
//! The engine event loop calls [`observe`] for every event it drains;
//! the task itself ticks once a second.

use core::cell::RefCell;
use core::sync::atomic::{AtomicU32, Ordering};

use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_nrf::wdt::WatchdogHandle;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Instant, Ticker, Timer};

use crate::ble::advertiser::Bonder;
use crate::ble::hog::Server;
use crate::ble::SYSTEM_REQUESTS;
use crate::config;
use crate::input::InputEvent;
use crate::led;
use crate::system_logic::{battery_soc, should_idle_shutdown, ChordTracker, SystemRequest};

/// Housekeeping period. Also the watchdog feed interval, so it must stay
/// well inside `config::WATCHDOG_TIMEOUT_MS`.
const TICK_MS: u64 = 1000;

/// Uptime of the most recent input event (ms).
static LAST_ACTIVITY_MS: AtomicU32 = AtomicU32::new(0);

/// Most recent battery voltage sample from the SAADC task (mV).
/// Zero until the first sample lands.
static BATTERY_MV: AtomicU32 = AtomicU32::new(0);

static CHORDS: Mutex<CriticalSectionRawMutex, RefCell<ChordTracker>> =
    Mutex::new(RefCell::new(ChordTracker::new()));

/// Record one input event: resets the idle timer and advances the chord
/// tracker, raising a [`SystemRequest`] when a chord completes.
pub fn observe(event: &InputEvent) {
    LAST_ACTIVITY_MS.store(Instant::now().as_millis() as u32, Ordering::Relaxed);

    let request = CHORDS.lock(|t| t.borrow_mut().observe(event));
    if let Some(request) = request {
        if SYSTEM_REQUESTS.try_send(request).is_err() {
            warn!("system request dropped: {}", request);
        }
    }
}

/// Publish a battery voltage sample (mV). Called from the SAADC task.
pub fn battery_sample(mv: u32) {
    BATTERY_MV.store(mv, Ordering::Relaxed);
}

fn update_battery(server: &Server) {
    let mv = BATTERY_MV.load(Ordering::Relaxed);
    if mv == 0 {
        return;
    }

    let soc = battery_soc(mv as i32);
    info!("battery: {} mV, {}%", mv, soc);
    if server.bas.battery_level_set(&soc).is_err() {
        warn!("battery level update failed");
    }
}

fn idle_ms() -> u64 {
    Instant::now()
        .as_millis()
        .saturating_sub(LAST_ACTIVITY_MS.load(Ordering::Relaxed) as u64)
}

/// Enter System OFF. The Mode button is latched as the wake source
/// before the core powers down.
async fn shutdown() -> ! {
    info!("powering off");
    led::ACKNOWLEDGE.signal(led::ACK_LONG_MS);
    Timer::after(Duration::from_millis(led::ACK_LONG_MS + 100)).await;

    let cnf = embassy_nrf::pac::P0.pin_cnf(config::WAKE_BUTTON_PIN);
    cnf.modify(|w| {
        w.set_input(embassy_nrf::pac::gpio::vals::Input::CONNECT);
        w.set_pull(embassy_nrf::pac::gpio::vals::Pull::PULLUP);
        w.set_sense(embassy_nrf::pac::gpio::vals::Sense::LOW);
    });

    unsafe { nrf_softdevice::raw::sd_power_system_off() };
    loop {
        cortex_m::asm::wfe();
    }
}

async fn handle_request(request: SystemRequest, bonder: &Bonder) {
    match request {
        SystemRequest::Unpair => {
            info!("unpair requested");
            bonder.clear();
            led::ACKNOWLEDGE.signal(led::ACK_SHORT_MS);
        }
        SystemRequest::Shutdown => shutdown().await,
    }
}

/// Watchdog feed, battery gauge, idle shutdown and chord requests.
pub async fn supervisor_task(
    server: &'static Server,
    bonder: &'static Bonder,
    mut wdt: WatchdogHandle,
) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut since_soc = config::SOC_UPDATE_MS;

    loop {
        match select(ticker.next(), SYSTEM_REQUESTS.receive()).await {
            Either::First(()) => {
                wdt.pet();

                since_soc += TICK_MS;
                if since_soc >= config::SOC_UPDATE_MS {
                    since_soc = 0;
                    update_battery(server);
                }

                if should_idle_shutdown(idle_ms(), config::SHUTDOWN_DELAY_MS) {
                    info!("idle for {} ms", idle_ms());
                    shutdown().await;
                }
            }
            Either::Second(request) => handle_request(request, bonder).await,
        }
    }
}
