use thiserror::Error;

/// Everything that can go wrong while preparing or executing a scan.
///
/// Only [`ScanError::InvalidSpec`] is recoverable: the offending spec is
/// skipped and the run continues with the remaining ones. Every other
/// variant terminates the run.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A target spec is neither a single IPv4 address nor a CIDR block.
    #[error("invalid target '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },

    /// The datalink layer could not be used (missing permissions, no
    /// usable interface, channel failure). Distinct from finding zero
    /// devices: a transport failure means the whole scan is unreliable.
    #[error("transport failure: {0}")]
    Transport(String),

    /// No explicit target was given and local-subnet auto-detection
    /// found nothing to scan.
    #[error("no target given and no local subnet could be detected")]
    Detection,

    /// Every supplied spec failed to parse, leaving nothing to scan.
    #[error("no valid targets remain after parsing")]
    NoValidTargets,

    /// The run was interrupted before all probes completed.
    #[error("scan cancelled")]
    Cancelled,
}

impl ScanError {
    pub fn invalid_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error terminates the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::InvalidSpec { .. })
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
