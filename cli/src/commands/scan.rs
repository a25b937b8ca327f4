use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tracing::{info, warn};

use sweepr_common::config::ScanConfig;
use sweepr_common::error::ScanError;
use sweepr_common::network::{interface, target};
use sweepr_core::engine::ScanCoordinator;
use sweepr_core::probe::ArpProber;

use crate::commands::CommandLine;
use crate::terminal::{format, print};

pub async fn scan(cmd: CommandLine) -> anyhow::Result<()> {
    let cfg = build_config(&cmd)?;

    let (targets, rejected) = target::expand(&cfg.specs);
    for err in &rejected {
        warn!("{err}");
    }
    if targets.is_empty() {
        return Err(ScanError::NoValidTargets.into());
    }

    let prober = Arc::new(ArpProber::new()?);
    let coordinator = ScanCoordinator::new(prober);

    let cancel = coordinator.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, abandoning outstanding probes");
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let results = coordinator
        .run(targets, cfg.parallelism, cfg.probe_timeout)
        .await?;

    // Zero devices is a completed scan, not a failure.
    if results.is_empty() {
        print::no_devices();
        return Ok(());
    }

    print::found(results.len());
    format::render(cmd.format, &results)
}

fn build_config(cmd: &CommandLine) -> Result<ScanConfig, ScanError> {
    let spec = match &cmd.target {
        Some(spec) => spec.clone(),
        None => {
            info!("no target given, detecting local subnet");
            let subnet = interface::detect_local_subnet().ok_or(ScanError::Detection)?;
            info!("scanning detected subnet {subnet}");
            subnet
        }
    };

    Ok(ScanConfig {
        specs: vec![spec],
        parallelism: cmd.parallel,
        probe_timeout: Duration::from_secs(cmd.timeout),
    })
}
