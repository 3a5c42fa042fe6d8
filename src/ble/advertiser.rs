//! Connectable advertising and pairing.
//!
//! The device advertises as a general-discoverable HID gamepad carrying
//! the HID (0x1812) and Battery (0x180F) service UUIDs. Pairing is
//! Just Works bonding handled by the SoftDevice security manager; keys
//! live in the bonder for the lifetime of the application.

use core::cell::RefCell;

use defmt::info;
use heapless::Vec;
use nrf_softdevice::ble::peripheral;
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{Connection, EncryptionInfo, IdentityKey, MasterId, SecurityMode};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

use crate::ble::status;
use crate::config;
use crate::error::Error;

/// Bonds kept for re-encryption (a gamepad realistically pairs with one
/// host at a time, plus one spare).
const MAX_BONDS: usize = 2;

struct PeerBond {
    master_id: MasterId,
    key: EncryptionInfo,
    peer_id: IdentityKey,
}

/// Just Works bonder, peripheral side. Adapted from the central-role
/// pattern: we hand out our stored long-term key when the bonded host
/// reconnects and asks to re-encrypt.
pub struct Bonder {
    peers: RefCell<Vec<PeerBond, MAX_BONDS>>,
}

impl Bonder {
    fn new() -> Self {
        Self {
            peers: RefCell::new(Vec::new()),
        }
    }

    /// Whether any host is currently bonded.
    pub fn has_bond(&self) -> bool {
        !self.peers.borrow().is_empty()
    }

    /// Factory unpair: drop every stored bond.
    pub fn clear(&self) {
        self.peers.borrow_mut().clear();
        status::bond_state_changed(false);
    }
}

impl SecurityHandler for Bonder {
    fn io_capabilities(&self) -> IoCapabilities {
        IoCapabilities::None
    }

    fn can_bond(&self, _conn: &Connection) -> bool {
        true
    }

    fn on_bonded(
        &self,
        _conn: &Connection,
        master_id: MasterId,
        key: EncryptionInfo,
        peer_id: IdentityKey,
    ) {
        info!("bonded");
        let mut peers = self.peers.borrow_mut();
        if let Some(existing) = peers.iter_mut().find(|p| p.master_id == master_id) {
            existing.key = key;
            existing.peer_id = peer_id;
        } else {
            if peers.is_full() {
                peers.remove(0);
            }
            let _ = peers.push(PeerBond {
                master_id,
                key,
                peer_id,
            });
        }
        drop(peers);
        status::bond_state_changed(true);
    }

    fn get_key(&self, _conn: &Connection, master_id: MasterId) -> Option<EncryptionInfo> {
        self.peers
            .borrow()
            .iter()
            .find_map(|p| (p.master_id == master_id).then_some(p.key))
    }

    fn get_peripheral_key(&self, conn: &Connection) -> Option<(MasterId, EncryptionInfo)> {
        self.peers.borrow().iter().find_map(|p| {
            p.peer_id
                .is_match(conn.peer_address())
                .then_some((p.master_id, p.key))
        })
    }

    fn on_security_update(&self, _conn: &Connection, mode: SecurityMode) {
        info!("BLE security mode updated: {}", mode);
    }
}

pub fn bonder() -> &'static Bonder {
    static BONDER: StaticCell<Bonder> = StaticCell::new();
    BONDER.init(Bonder::new())
}

// Advertisement payload: flags, appearance (gamepad), 16-bit service
// UUIDs (HID, Battery), complete local name.
#[rustfmt::skip]
const ADV_DATA: &[u8] = &[
    0x02, 0x01, 0x06,                   // Flags: LE General Discoverable, no BR/EDR
    0x03, 0x19, 0xC4, 0x03,             // Appearance: Gamepad
    0x05, 0x03, 0x12, 0x18, 0x0F, 0x18, // Complete 16-bit UUIDs: HID, Battery
    0x08, 0x09, b'p', b'a', b'd', b'2', b'b', b'l', b'e', // Complete Local Name
];

const SCAN_DATA: &[u8] = &[];

/// Advertise until a central connects and pairing/encryption is
/// established. Returns the live connection.
pub async fn advertise(sd: &Softdevice, bonder: &'static Bonder) -> Result<Connection, Error> {
    let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
        adv_data: ADV_DATA,
        scan_data: SCAN_DATA,
    };

    let adv_config = peripheral::Config::default();

    info!("advertising as {}", config::BLE_DEVICE_NAME);

    let conn = peripheral::advertise_pairable(sd, adv, &adv_config, bonder)
        .await
        .map_err(|_| Error::AdvertiseFailed)?;

    info!("central connected");
    Ok(conn)
}
