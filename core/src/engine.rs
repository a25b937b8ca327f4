//! # Scan Coordinator
//!
//! Fans a list of probe units out over a bounded set of workers and
//! folds their partial results into one deduplicated [`ResultSet`].
//!
//! The merge is commutative and idempotent, so workers may finish in any
//! order without changing the final contents; only which duplicate
//! survives is decided by merge arrival (first write wins). A transport
//! failure from any worker poisons the whole run: remaining targets are
//! abandoned and already-collected partial results discarded, since a
//! silently partial answer is worse than a clear failure.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

use sweepr_common::device::{Device, ResultSet};
use sweepr_common::error::ScanError;
use sweepr_common::network::target::ProbeTarget;

use crate::probe::Prober;

/// One instance serves exactly one run: [`ScanCoordinator::run`]
/// consumes it, and there is no way back to idle.
pub struct ScanCoordinator {
    prober: Arc<dyn Prober>,
    cancel: Arc<AtomicBool>,
}

impl ScanCoordinator {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self {
            prober,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for interrupting the run from outside (ctrl-c). Once set,
    /// no new probes start; in-flight probes finish naturally and their
    /// results are thrown away.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Probes every target and returns the merged result set.
    ///
    /// Effective concurrency is `min(parallelism, targets.len())`;
    /// `parallelism` is an upper bound, not a promise. Returns only
    /// after every scheduled worker has finished.
    pub async fn run(
        self,
        targets: Vec<ProbeTarget>,
        parallelism: usize,
        timeout: Duration,
    ) -> Result<ResultSet, ScanError> {
        if targets.is_empty() {
            return Ok(ResultSet::new());
        }

        let worker_count = parallelism.max(1).min(targets.len());
        debug!(
            "scanning {} target(s) with {} worker(s), {:?} per probe",
            targets.len(),
            worker_count,
            timeout
        );

        let queue = Arc::new(Mutex::new(VecDeque::from(targets)));
        let (tx, mut rx) = mpsc::unbounded_channel::<Result<Vec<Device>, ScanError>>();

        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let queue = Arc::clone(&queue);
            let prober = Arc::clone(&self.prober);
            let cancel = Arc::clone(&self.cancel);
            let tx = tx.clone();

            handles.push(tokio::spawn(async move {
                loop {
                    if cancel.load(Ordering::Relaxed) {
                        break;
                    }

                    let Some(target) = queue.lock().await.pop_front() else {
                        break;
                    };

                    let outcome = prober.probe(target, timeout).await;
                    if matches!(&outcome, Err(ScanError::Transport(_))) {
                        // Poison the queue so no further probes start.
                        cancel.store(true, Ordering::Relaxed);
                    }

                    if tx.send(outcome).is_err() {
                        break;
                    }
                }
            }));
        }
        drop(tx);

        let mut merged = ResultSet::new();
        let mut failure: Option<ScanError> = None;

        while let Some(outcome) = rx.recv().await {
            match outcome {
                Ok(devices) => merged.merge(devices),
                Err(e) => {
                    warn!("probe failed: {e}");
                    failure.get_or_insert(e);
                }
            }
        }

        // All senders are gone once the channel drains, but join anyway
        // so no worker outlives the run.
        for handle in handles {
            let _ = handle.await;
        }

        if let Some(e) = failure {
            return Err(e);
        }
        if self.cancel.load(Ordering::Relaxed) {
            return Err(ScanError::Cancelled);
        }
        Ok(merged)
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
