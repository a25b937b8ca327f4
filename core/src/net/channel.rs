//! Ethernet channel handling over `pnet::datalink`.
//!
//! Channel failures map to [`ScanError::Transport`] so callers can tell
//! "could not probe" apart from "probed, nobody answered".

use std::time::Duration;

use pnet::datalink::{Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};

use sweepr_common::error::ScanError;

/// Read timeout on the receive side of the channel. Short enough that
/// the deadline poll in the prober stays responsive.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

pub fn capture_config() -> Config {
    Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    }
}

/// Opens the ethernet channel on `intf`. The opener is a parameter so
/// tests can substitute `pnet::datalink::dummy`.
pub fn open<F>(
    intf: &NetworkInterface,
    cfg: &Config,
    channel_opener: F,
) -> Result<(Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>), ScanError>
where
    F: FnOnce(&NetworkInterface, Config) -> std::io::Result<Channel>,
{
    let ch = channel_opener(intf, *cfg)
        .map_err(|e| ScanError::Transport(format!("opening channel on {}: {e}", intf.name)))?;

    match ch {
        Channel::Ethernet(tx, rx) => Ok((tx, rx)),
        _ => Err(ScanError::Transport(format!(
            "non-ethernet channel on {}",
            intf.name
        ))),
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
