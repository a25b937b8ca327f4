//! The probe seam and its ARP implementation.
//!
//! One probe call is one discovery pass: broadcast a who-has request for
//! every address the target covers, then collect is-at replies until the
//! timeout elapses. Silence is a valid outcome, not an error.

use std::collections::{BTreeMap, HashSet};
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pnet::datalink::{self, NetworkInterface};
use pnet::util::MacAddr;
use tracing::{debug, trace};

use sweepr_common::device::Device;
use sweepr_common::error::ScanError;
use sweepr_common::network::interface;
use sweepr_common::network::target::ProbeTarget;

use crate::net::{arp, channel};

/// Sends one discovery pass for a target and reports the devices that
/// answered. Implementations must tell transport trouble apart from an
/// empty segment: the latter is `Ok(vec![])`.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: ProbeTarget, timeout: Duration) -> Result<Vec<Device>, ScanError>;
}

/// The real prober: raw ethernet frames over a `pnet` datalink channel.
/// Requires privileges to open the channel; a fresh channel is opened per
/// probe call so concurrent probes never share a receiver.
#[derive(Clone)]
pub struct ArpProber {
    interface: NetworkInterface,
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
}

impl ArpProber {
    /// Binds the prober to the best viable interface.
    pub fn new() -> Result<Self, ScanError> {
        let intf = interface::select_probe_interface()
            .ok_or_else(|| ScanError::Transport("no viable interface for probing".into()))?;
        Self::with_interface(intf)
    }

    pub fn with_interface(interface: NetworkInterface) -> Result<Self, ScanError> {
        let src_mac = interface
            .mac
            .ok_or_else(|| ScanError::Transport(format!("{} has no MAC address", interface.name)))?;
        let src_addr = interface::interface_ipv4(&interface)
            .ok_or_else(|| {
                ScanError::Transport(format!("{} has no private IPv4 address", interface.name))
            })?
            .ip();

        Ok(Self {
            interface,
            src_mac,
            src_addr,
        })
    }

    fn probe_blocking(&self, target: ProbeTarget, timeout: Duration) -> Result<Vec<Device>, ScanError> {
        let (mut tx, mut rx) =
            channel::open(&self.interface, &channel::capture_config(), datalink::channel)?;

        let wanted: HashSet<Ipv4Addr> = target.addresses().collect();
        debug!(
            "probing {target} ({} address(es)) via {}",
            wanted.len(),
            self.interface.name
        );

        for &dst_addr in &wanted {
            let frame = arp::build_request(self.src_mac, self.src_addr, dst_addr)
                .map_err(|e| ScanError::Transport(e.to_string()))?;
            if let Some(Err(e)) = tx.send_to(&frame, None) {
                return Err(ScanError::Transport(format!("sending to {dst_addr}: {e}")));
            }
        }

        // First reply per address wins; later duplicates are dropped.
        let mut seen: BTreeMap<Ipv4Addr, Device> = BTreeMap::new();
        let deadline = Instant::now() + timeout;

        while Instant::now() < deadline {
            if let Ok(frame) = rx.next() {
                let Some((ip, mac)) = arp::parse_reply(frame) else {
                    continue;
                };
                if !wanted.contains(&ip) {
                    trace!("ignoring reply from {ip}: outside target");
                    continue;
                }
                seen.entry(ip).or_insert_with(|| Device::new(ip, mac));
            }

            if seen.len() == wanted.len() {
                break;
            }
        }

        Ok(seen.into_values().collect())
    }
}

#[async_trait]
impl Prober for ArpProber {
    async fn probe(&self, target: ProbeTarget, timeout: Duration) -> Result<Vec<Device>, ScanError> {
        let prober = self.clone();
        tokio::task::spawn_blocking(move || prober.probe_blocking(target, timeout))
            .await
            .map_err(|e| ScanError::Transport(format!("probe task failed: {e}")))?
    }
}
