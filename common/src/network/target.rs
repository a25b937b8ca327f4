//! # Probe Target Model
//!
//! Defines what a scan can be pointed at and how user input becomes a
//! list of probe units.
//!
//! A spec is either:
//! * A single IPv4 address (e.g. `192.168.1.5`).
//! * A CIDR block (e.g. `192.168.1.0/24`).
//! * A comma-separated list of the above.
//!
//! Blocks are deliberately NOT expanded into per-host targets: one block
//! is one probe unit, and the prober fans its requests across the block
//! in a single pass. Parallelism therefore applies across top-level
//! entries, which is where it buys anything.

use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::ScanError;

/// One unit of probing work, consumed whole by a single prober call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeTarget {
    /// Probe a single host.
    Host(Ipv4Addr),
    /// Probe every address covered by a CIDR block.
    Block(Ipv4Network),
}

impl ProbeTarget {
    /// Iterates every IPv4 address this target covers. A `/30` block
    /// covers 4 addresses; network and broadcast are probed like any
    /// other, a non-answer simply yields nothing.
    pub fn addresses(&self) -> Box<dyn Iterator<Item = Ipv4Addr> + Send> {
        match self {
            Self::Host(addr) => Box::new(std::iter::once(*addr)),
            Self::Block(net) => Box::new(net.iter()),
        }
    }

    /// Number of addresses covered.
    pub fn len(&self) -> u64 {
        match self {
            Self::Host(_) => 1,
            Self::Block(net) => 1u64 << (32 - net.prefix()),
        }
    }
}

impl FromStr for ProbeTarget {
    type Err = ScanError;

    /// Parses one trimmed, non-empty spec entry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(addr) = s.parse::<Ipv4Addr>() {
            return Ok(Self::Host(addr));
        }

        if let Some(target) = parse_cidr(s)? {
            return Ok(target);
        }

        Err(ScanError::invalid_spec(
            s,
            "expected an IPv4 address or CIDR block",
        ))
    }
}

impl std::fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host(addr) => write!(f, "{addr}"),
            Self::Block(net) => write!(f, "{net}"),
        }
    }
}

/// Parses CIDR notation like `192.168.1.0/24`.
fn parse_cidr(s: &str) -> Result<Option<ProbeTarget>, ScanError> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let addr = ip_str
        .parse::<Ipv4Addr>()
        .map_err(|e| ScanError::invalid_spec(s, format!("bad address '{ip_str}': {e}")))?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| ScanError::invalid_spec(s, format!("bad prefix '{prefix_str}': {e}")))?;

    let net = Ipv4Network::new(addr, prefix)
        .map_err(|e| ScanError::invalid_spec(s, e.to_string()))?;

    Ok(Some(ProbeTarget::Block(net)))
}

/// Turns raw user specs into an ordered, deduplicated list of probe
/// units plus the rejections hit along the way.
///
/// Each spec may hold comma-separated entries. Entries are trimmed and
/// empty ones dropped without comment; unparseable ones land in the
/// rejected list while the rest proceed. Duplicates keep their first
/// position.
pub fn expand(specs: &[String]) -> (Vec<ProbeTarget>, Vec<ScanError>) {
    let mut targets: Vec<ProbeTarget> = Vec::new();
    let mut rejected: Vec<ScanError> = Vec::new();

    for spec in specs {
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            match entry.parse::<ProbeTarget>() {
                Ok(target) => {
                    if !targets.contains(&target) {
                        targets.push(target);
                    }
                }
                Err(e) => rejected.push(e),
            }
        }
    }

    (targets, rejected)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
