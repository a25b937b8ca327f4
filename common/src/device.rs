//! # Scan Result Model
//!
//! A [`Device`] is one discovered host: the IPv4 address that answered an
//! ARP request paired with the hardware address it answered from. The
//! [`ResultSet`] collects devices from all workers while upholding the
//! uniqueness invariant: no two entries ever share an address.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One discovered host.
///
/// Equality is defined by address only: the hardware address is assumed
/// stable per address within a single run.
#[derive(Debug, Clone, Copy)]
pub struct Device {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl Device {
    pub fn new(ip: Ipv4Addr, mac: MacAddr) -> Self {
        Self { ip, mac }
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.ip == other.ip
    }
}

impl Eq for Device {}

/// Serializes as `{"ip": "...", "mac": "..."}` with string values, in that
/// key order. Both the JSON and CSV renderers rely on this shape.
impl Serialize for Device {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Device", 2)?;
        state.serialize_field("ip", &self.ip.to_string())?;
        state.serialize_field("mac", &self.mac.to_string())?;
        state.end()
    }
}

/// The merged outcome of one scan, keyed by address.
///
/// The first device inserted for an address wins; later duplicates are
/// dropped. Iteration is in address order, which keeps rendering
/// deterministic regardless of which worker reported which device.
#[derive(Debug, Default)]
pub struct ResultSet {
    devices: BTreeMap<Ipv4Addr, Device>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a device unless its address is already present.
    /// Returns whether the device was kept.
    pub fn insert(&mut self, device: Device) -> bool {
        use std::collections::btree_map::Entry;
        match self.devices.entry(device.ip) {
            Entry::Vacant(slot) => {
                slot.insert(device);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Folds a worker's partial result into the set. Commutative with
    /// respect to set contents: merge order only decides which duplicate
    /// survives, never which addresses appear.
    pub fn merge(&mut self, devices: impl IntoIterator<Item = Device>) {
        for device in devices {
            self.insert(device);
        }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn contains(&self, ip: &Ipv4Addr) -> bool {
        self.devices.contains_key(ip)
    }

    pub fn get(&self, ip: &Ipv4Addr) -> Option<&Device> {
        self.devices.get(ip)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
