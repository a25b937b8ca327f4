use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;

use sweepr_common::device::Device;
use sweepr_common::error::ScanError;
use sweepr_common::network::target::ProbeTarget;
use sweepr_core::probe::Prober;

/// A prober against a fixed network: addresses in the responder map
/// answer, everything else stays silent. Records how many probe calls
/// were made and can simulate per-probe latency or a broken transport,
/// either on every probe or only for one poisoned address.
pub struct SimulatedProber {
    responders: HashMap<Ipv4Addr, MacAddr>,
    probe_calls: AtomicUsize,
    delay: Option<Duration>,
    fail_transport: bool,
    fail_on: Option<Ipv4Addr>,
}

impl SimulatedProber {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        let responders = entries
            .iter()
            .map(|(ip, mac)| {
                (
                    ip.parse().expect("bad test ip"),
                    mac.parse().expect("bad test mac"),
                )
            })
            .collect();
        Self {
            responders,
            probe_calls: AtomicUsize::new(0),
            delay: None,
            fail_transport: false,
            fail_on: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn broken() -> Self {
        let mut prober = Self::new(&[]);
        prober.fail_transport = true;
        prober
    }

    /// Fails with a transport error on any probe covering `ip`; other
    /// probes behave normally.
    pub fn failing_on(mut self, ip: &str) -> Self {
        self.fail_on = Some(ip.parse().expect("bad test ip"));
        self
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Prober for SimulatedProber {
    async fn probe(&self, target: ProbeTarget, _timeout: Duration) -> Result<Vec<Device>, ScanError> {
        self.probe_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_transport
            || self
                .fail_on
                .is_some_and(|bad| target.addresses().any(|ip| ip == bad))
        {
            return Err(ScanError::Transport("simulated channel failure".into()));
        }

        Ok(target
            .addresses()
            .filter_map(|ip| self.responders.get(&ip).map(|mac| Device::new(ip, *mac)))
            .collect())
    }
}
