//! Selection of the interface probes are sent from, and best-effort
//! local-subnet auto-detection for runs without an explicit target.
//!
//! Detection is kept behind a tiny surface (`detect_local_subnet`) so the
//! engine and its tests never have to touch real interfaces.

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use tracing::debug;

/// Why an interface was ruled out for ARP probing.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// Loopback cannot carry ARP traffic to neighbors.
    IsLoopback,
    /// The interface has no MAC address to send from.
    NoMacAddress,
    /// The interface does not support broadcast (required for ARP).
    NotBroadcast,
    /// The interface is a point-to-point link (e.g. a VPN).
    IsPointToPoint,
    /// The interface carries no private IPv4 address.
    NoPrivateIpv4,
}

/// Picks the interface to probe from: the first viable one, wired names
/// (`e...`) preferred over wireless.
pub fn select_probe_interface() -> Option<NetworkInterface> {
    select_from(datalink::interfaces())
}

fn select_from(interfaces: Vec<NetworkInterface>) -> Option<NetworkInterface> {
    let mut viable: Vec<NetworkInterface> = interfaces
        .into_iter()
        .filter(|intf| match is_viable(intf) {
            Ok(()) => true,
            Err(reason) => {
                debug!("skipping interface {}: {:?}", intf.name, reason);
                false
            }
        })
        .collect();

    viable.sort_by_key(|intf| if intf.name.starts_with('e') { 0 } else { 1 });
    viable.into_iter().next()
}

fn is_viable(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if interface.mac.is_none() {
        return Err(ViabilityError::NoMacAddress);
    }
    if !interface.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    if interface_ipv4(interface).is_none() {
        return Err(ViabilityError::NoPrivateIpv4);
    }

    Ok(())
}

/// The private IPv4 network configured on an interface, if any.
pub fn interface_ipv4(interface: &NetworkInterface) -> Option<Ipv4Network> {
    interface.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) if v4.ip().is_private() => Some(*v4),
        _ => None,
    })
}

/// Best-effort local-subnet detection, used as the sole target spec when
/// none is supplied. Returns CIDR notation for the probe interface's
/// network, e.g. `192.168.1.0/24`.
pub fn detect_local_subnet() -> Option<String> {
    let interface = select_probe_interface()?;
    let net = interface_ipv4(&interface)?;
    Some(format!("{}/{}", net.network(), net.prefix()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
