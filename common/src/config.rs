use std::time::Duration;

/// Reply window of a single probe when none is given on the command line.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Settings for one scan invocation. Built once from the command line and
/// never mutated while the scan runs.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Raw target specs as supplied by the user. May contain
    /// comma-separated entries; empty when auto-detection is wanted.
    pub specs: Vec<String>,
    /// Upper bound on concurrent probes, not a guarantee: fewer targets
    /// mean fewer workers.
    pub parallelism: usize,
    /// How long each probe waits for replies after sending.
    pub probe_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            specs: Vec::new(),
            parallelism: 1,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}
