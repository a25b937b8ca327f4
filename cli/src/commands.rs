pub mod scan;

use clap::Parser;

use sweepr_common::config::DEFAULT_PROBE_TIMEOUT;

use crate::terminal::format::OutputFormat;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "A fast ARP network scanner.", version)]
pub struct CommandLine {
    /// Target IPv4 address or CIDR block (e.g. 192.168.0.0/24);
    /// comma-separate to scan several. Falls back to local-subnet
    /// auto-detection when omitted.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Upper bound on concurrent probes
    #[arg(short, long, default_value_t = 1)]
    pub parallel: usize,

    /// Seconds each probe waits for replies
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
