//! pad2ble firmware entry point (nRF52840 + SoftDevice S140).
//!
//! Brings up the SoftDevice in peripheral role, registers the GATT
//! server (battery + HID-over-GATT), spawns the sensor and housekeeping
//! tasks and then loops: advertise, serve one connection, repeat. The
//! translation engine lives on this task; everything else reaches it
//! through the input event channel.

#![no_std]
#![no_main]

use defmt::{info, unwrap, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::peripherals::PWM0;
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::saadc::{self, ChannelConfig, Saadc, VddhDiv5Input};
use embassy_nrf::{bind_interrupts, wdt};
use nrf_softdevice::ble::gatt_server;
use nrf_softdevice::{raw, Softdevice};
use panic_probe as _;
use static_cell::StaticCell;

use pad2ble::ble::advertiser::{self, Bonder};
use pad2ble::ble::hog::{self, BatteryServiceEvent, HidServiceEvent, Server, ServerEvent};
use pad2ble::ble::status;
use pad2ble::buttons::Button;
use pad2ble::engine::InputEngine;
use pad2ble::error::Error;
use pad2ble::input::code;
use pad2ble::{analog, config, led, supervisor, touch};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
});

const BUTTON_COUNT: usize = 17;

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn buttons_task(buttons: [Button; BUTTON_COUNT]) -> ! {
    pad2ble::buttons::buttons_task(buttons).await
}

#[embassy_executor::task]
async fn analog_task(adc: Saadc<'static, { analog::SAADC_CHANNELS }>) -> ! {
    analog::analog_task(adc).await
}

#[embassy_executor::task]
async fn touch_task(drive: Output<'static>, sense: Input<'static>) -> ! {
    touch::touch_task(drive, sense).await
}

#[embassy_executor::task]
async fn led_task(pwm: SimplePwm<'static, PWM0>) -> ! {
    led::led_task(pwm).await
}

#[embassy_executor::task]
async fn supervisor_task(
    server: &'static Server,
    bonder: &'static Bonder,
    wdt: wdt::WatchdogHandle,
) -> ! {
    supervisor::supervisor_task(server, bonder, wdt).await
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: config::BLE_DEVICE_NAME.as_ptr() as _,
            current_len: config::BLE_DEVICE_NAME.len() as u16,
            max_len: config::BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { core::mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Preferred peripheral connection parameters, pushed to the SoftDevice
/// so the central can pick them up after connecting.
fn set_conn_params() -> Result<(), Error> {
    let params = raw::ble_gap_conn_params_t {
        min_conn_interval: config::BLE_CONN_INTERVAL_MIN,
        max_conn_interval: config::BLE_CONN_INTERVAL_MAX,
        slave_latency: config::BLE_SLAVE_LATENCY,
        conn_sup_timeout: config::BLE_SUP_TIMEOUT,
    };
    let ret = unsafe { raw::sd_ble_gap_ppcp_set(&params) };
    if ret != raw::NRF_SUCCESS {
        return Err(Error::Softdevice(ret));
    }
    Ok(())
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("pad2ble starting");

    // SoftDevice reserves the highest interrupt priorities; everything
    // Embassy owns has to sit below them.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);
    interrupt::SAADC.set_priority(Priority::P3);

    // Watchdog first, so a hang anywhere in bring-up still resets.
    let mut wdt_config = wdt::Config::default();
    wdt_config.timeout_ticks = 32768 / 1000 * config::WATCHDOG_TIMEOUT_MS;
    let (_wdt, [wdt_handle]) = unwrap!(wdt::Watchdog::try_new(p.WDT, wdt_config).ok());

    let sd = Softdevice::enable(&softdevice_config());
    static SERVER: StaticCell<Server> = StaticCell::new();
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    if let Err(e) = set_conn_params() {
        warn!("preferred connection parameters rejected: {:?}", e);
    }

    let bonder = advertiser::bonder();

    // Analog sticks on AIN0/AIN1, battery tap on VDDH/5.
    let adc = Saadc::new(
        p.SAADC,
        Irqs,
        saadc::Config::default(),
        [
            ChannelConfig::single_ended(p.P0_02),
            ChannelConfig::single_ended(p.P0_03),
            ChannelConfig::single_ended(VddhDiv5Input),
        ],
    );

    let buttons = [
        Button { pin: Input::new(p.P0_12, Pull::Up), code: code::BTN_DPAD_UP },
        Button { pin: Input::new(p.P0_13, Pull::Up), code: code::BTN_DPAD_DOWN },
        Button { pin: Input::new(p.P0_14, Pull::Up), code: code::BTN_DPAD_LEFT },
        Button { pin: Input::new(p.P0_15, Pull::Up), code: code::BTN_DPAD_RIGHT },
        Button { pin: Input::new(p.P0_16, Pull::Up), code: code::BTN_SOUTH },
        Button { pin: Input::new(p.P0_17, Pull::Up), code: code::BTN_EAST },
        Button { pin: Input::new(p.P0_19, Pull::Up), code: code::BTN_NORTH },
        Button { pin: Input::new(p.P0_20, Pull::Up), code: code::BTN_WEST },
        Button { pin: Input::new(p.P0_21, Pull::Up), code: code::BTN_TL },
        Button { pin: Input::new(p.P0_22, Pull::Up), code: code::BTN_TR },
        Button { pin: Input::new(p.P0_23, Pull::Up), code: code::BTN_TL2 },
        Button { pin: Input::new(p.P0_24, Pull::Up), code: code::BTN_TR2 },
        Button { pin: Input::new(p.P0_25, Pull::Up), code: code::BTN_SELECT },
        // Mode doubles as the System OFF wake source (config::WAKE_BUTTON_PIN).
        Button { pin: Input::new(p.P0_26, Pull::Up), code: code::BTN_MODE },
        Button { pin: Input::new(p.P0_27, Pull::Up), code: code::BTN_START },
        Button { pin: Input::new(p.P0_29, Pull::Up), code: code::BTN_THUMBL },
        Button { pin: Input::new(p.P0_30, Pull::Up), code: code::BTN_THUMBR },
    ];

    let touch_drive = Output::new(p.P0_04, Level::Low, OutputDrive::Standard);
    let touch_sense = Input::new(p.P0_05, Pull::None);

    let led_pwm = SimplePwm::new_1ch(p.PWM0, p.P0_06);

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(buttons_task(buttons)));
    unwrap!(spawner.spawn(analog_task(adc)));
    unwrap!(spawner.spawn(touch_task(touch_drive, touch_sense)));
    unwrap!(spawner.spawn(led_task(led_pwm)));
    unwrap!(spawner.spawn(supervisor_task(server, bonder, wdt_handle)));

    let mut engine = InputEngine::new();

    loop {
        // Keep the engine's latched state current while advertising.
        let conn = match select(
            advertiser::advertise(sd, bonder),
            hog::offline_event_loop(&mut engine),
        )
        .await
        {
            Either::First(Ok(conn)) => conn,
            Either::First(Err(e)) => {
                warn!("advertising failed: {:?}", e);
                continue;
            }
            Either::Second(never) => never,
        };

        server.hid.reset_subscriptions();
        status::connection_changed(true);

        let gatt = gatt_server::run(&conn, server, |e| match e {
            ServerEvent::Bas(BatteryServiceEvent::BatteryLevelCccdWrite { notifications }) => {
                info!("battery notifications: {}", notifications)
            }
            ServerEvent::Hid(HidServiceEvent::SubscriptionChanged(report, enabled)) => {
                info!("{} subscription: {}", report, enabled)
            }
        });

        let disconnect = match select(gatt, hog::connected_event_loop(server, &conn, &mut engine))
            .await
        {
            Either::First(e) => e,
            Either::Second(never) => never,
        };
        info!("disconnected: {:?}", disconnect);

        server.hid.reset_subscriptions();
        status::connection_changed(false);
    }
}
