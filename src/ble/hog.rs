//! HID-over-GATT service (HOGP) and the engine event loop.
//!
//! The service exposes the composite report map and three Input Report
//! characteristics, one per report type, each with a Report Reference
//! descriptor carrying its report ID. Subscription state is tracked per
//! characteristic from CCCD writes; the translation engine polls it
//! through the [`ReportSink`] seam before every transmission.
//!
//! The engine itself lives in this task only. Sensor tasks hand events
//! over the `INPUT_EVENTS` channel and never touch report state.

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{info, warn};
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{self, CharacteristicHandles, RegisterError};
use nrf_softdevice::ble::{Connection, SecurityMode, Uuid};
use nrf_softdevice::Softdevice;

use crate::ble::INPUT_EVENTS;
use crate::engine::{InputEngine, ReportSink};
use crate::hid::{ReportType, REPORT_MAP};
use crate::supervisor;

// GATT UUIDs (Bluetooth SIG assigned numbers)
const UUID_HID_SERVICE: Uuid = Uuid::new_16(0x1812);
const UUID_HID_INFORMATION: Uuid = Uuid::new_16(0x2A4A);
const UUID_HID_REPORT_MAP: Uuid = Uuid::new_16(0x2A4B);
const UUID_HID_CONTROL_POINT: Uuid = Uuid::new_16(0x2A4C);
const UUID_HID_REPORT: Uuid = Uuid::new_16(0x2A4D);
const UUID_REPORT_REFERENCE: Uuid = Uuid::new_16(0x2908);

/// HID Information characteristic value:
/// bcdHID 1.11, no country code, NORMALLY_CONNECTABLE.
const HID_INFO: [u8; 4] = [0x11, 0x01, 0x00, 0x02];

/// Report Reference descriptor type: Input Report.
const REPORT_TYPE_INPUT: u8 = 0x01;

/// Battery Service (0x180F), generated by the SoftDevice macro.
#[nrf_softdevice::gatt_service(uuid = "180f")]
pub struct BatteryService {
    #[characteristic(uuid = "2a19", read, notify)]
    pub battery_level: u8,
}

/// Hand-built HID service: the builder API is needed for the Report
/// Reference descriptors and for three characteristics sharing the
/// Report UUID.
pub struct HidService {
    gamepad: CharacteristicHandles,
    mouse: CharacteristicHandles,
    keyboard: CharacteristicHandles,

    gamepad_subscribed: AtomicBool,
    mouse_subscribed: AtomicBool,
    keyboard_subscribed: AtomicBool,
}

impl HidService {
    pub fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut sb = ServiceBuilder::new(sd, UUID_HID_SERVICE)?;

        sb.add_characteristic(
            UUID_HID_INFORMATION,
            Attribute::new(&HID_INFO),
            Metadata::new(Properties::new().read()),
        )?
        .build();

        sb.add_characteristic(
            UUID_HID_REPORT_MAP,
            Attribute::new(REPORT_MAP),
            Metadata::new(Properties::new().read()),
        )?
        .build();

        let gamepad = Self::input_report(&mut sb, ReportType::Gamepad)?;
        let mouse = Self::input_report(&mut sb, ReportType::Mouse)?;
        let keyboard = Self::input_report(&mut sb, ReportType::Keyboard)?;

        sb.add_characteristic(
            UUID_HID_CONTROL_POINT,
            Attribute::new(&[0u8]),
            Metadata::new(Properties::new().write_without_response()),
        )?
        .build();

        sb.build();

        Ok(Self {
            gamepad,
            mouse,
            keyboard,
            gamepad_subscribed: AtomicBool::new(false),
            mouse_subscribed: AtomicBool::new(false),
            keyboard_subscribed: AtomicBool::new(false),
        })
    }

    /// One Input Report characteristic: readable, notifiable, encrypted
    /// link required, Report Reference descriptor carrying the ID.
    fn input_report(
        sb: &mut ServiceBuilder,
        report: ReportType,
    ) -> Result<CharacteristicHandles, RegisterError> {
        let initial = [0u8; crate::hid::MAX_REPORT_SIZE];
        let mut cb = sb.add_characteristic(
            UUID_HID_REPORT,
            Attribute::new(&initial[..report.size()]).security(SecurityMode::JustWorks),
            Metadata::new(Properties::new().read().notify()),
        )?;

        cb.add_descriptor(
            UUID_REPORT_REFERENCE,
            Attribute::new(&[report.report_id(), REPORT_TYPE_INPUT]),
        )?;

        Ok(cb.build())
    }

    fn value_handle(&self, report: ReportType) -> u16 {
        match report {
            ReportType::Gamepad => self.gamepad.value_handle,
            ReportType::Mouse => self.mouse.value_handle,
            ReportType::Keyboard => self.keyboard.value_handle,
        }
    }

    fn subscription(&self, report: ReportType) -> &AtomicBool {
        match report {
            ReportType::Gamepad => &self.gamepad_subscribed,
            ReportType::Mouse => &self.mouse_subscribed,
            ReportType::Keyboard => &self.keyboard_subscribed,
        }
    }

    /// Forget all CCCD state, e.g. on disconnect.
    pub fn reset_subscriptions(&self) {
        for report in [ReportType::Gamepad, ReportType::Mouse, ReportType::Keyboard] {
            self.subscription(report).store(false, Ordering::Relaxed);
        }
    }
}

pub enum HidServiceEvent {
    SubscriptionChanged(ReportType, bool),
}

impl gatt_server::Service for HidService {
    type Event = HidServiceEvent;

    fn on_write(&self, handle: u16, data: &[u8]) -> Option<Self::Event> {
        for report in [ReportType::Gamepad, ReportType::Mouse, ReportType::Keyboard] {
            let handles = match report {
                ReportType::Gamepad => &self.gamepad,
                ReportType::Mouse => &self.mouse,
                ReportType::Keyboard => &self.keyboard,
            };
            if handle == handles.cccd_handle && !data.is_empty() {
                let enabled = data[0] & 0x01 != 0;
                self.subscription(report).store(enabled, Ordering::Relaxed);
                return Some(HidServiceEvent::SubscriptionChanged(report, enabled));
            }
        }
        None
    }
}

/// Composite GATT server: battery + HID.
#[nrf_softdevice::gatt_server]
pub struct Server {
    pub bas: BatteryService,
    pub hid: HidService,
}

/// [`ReportSink`] over a live connection. Backpressure is "the input
/// queue still holds events": the engine drains the queue before the
/// dispatcher spends radio time, exactly one notification attempt per
/// drained event.
struct GattSink<'a> {
    server: &'a Server,
    conn: &'a Connection,
}

impl ReportSink for GattSink<'_> {
    fn is_subscribed(&self, report: ReportType) -> bool {
        self.server.hid.subscription(report).load(Ordering::Relaxed)
    }

    fn transport_busy(&self) -> bool {
        !INPUT_EVENTS.is_empty()
    }

    fn notify(&mut self, report: ReportType, data: &[u8]) {
        let handle = self.server.hid.value_handle(report);
        if let Err(e) = gatt_server::notify_value(self.conn, handle, data) {
            warn!("notify {} failed: {:?}", report, e);
        }
    }
}

/// Sink used while no host is connected: nothing is subscribed, so the
/// engine keeps encoding latched state without transmitting.
struct OfflineSink;

impl ReportSink for OfflineSink {
    fn is_subscribed(&self, _report: ReportType) -> bool {
        false
    }

    fn transport_busy(&self) -> bool {
        false
    }

    fn notify(&mut self, _report: ReportType, _data: &[u8]) {}
}

/// Drain input events into the engine for the duration of a connection.
/// Runs forever; the caller races it against `gatt_server::run`.
pub async fn connected_event_loop(
    server: &Server,
    conn: &Connection,
    engine: &mut InputEngine,
) -> ! {
    info!("engine online");
    loop {
        let event = INPUT_EVENTS.receive().await;
        supervisor::observe(&event);
        let mut sink = GattSink { server, conn };
        engine.handle_event(event, &mut sink);
    }
}

/// Keep the engine's latched state current while disconnected, so the
/// first notification after reconnect reflects reality.
pub async fn offline_event_loop(engine: &mut InputEngine) -> ! {
    loop {
        let event = INPUT_EVENTS.receive().await;
        supervisor::observe(&event);
        engine.handle_event(event, &mut OfflineSink);
    }
}
