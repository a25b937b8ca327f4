//! End-to-end engine scenarios over a simulated network: expansion,
//! fan-out, merge, and the failure paths.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use sweepr_common::error::ScanError;
use sweepr_common::network::target::{self, ProbeTarget};
use sweepr_core::engine::ScanCoordinator;

use crate::util::SimulatedProber;

const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

fn parse_targets(spec: &str) -> Vec<ProbeTarget> {
    let (targets, rejected) = target::expand(&[spec.to_string()]);
    assert!(rejected.is_empty(), "unexpected rejections: {rejected:?}");
    targets
}

#[tokio::test]
async fn single_host_yields_its_device() {
    let prober = Arc::new(SimulatedProber::new(&[("192.168.1.5", "aa:bb:cc:dd:ee:ff")]));
    let coordinator = ScanCoordinator::new(prober.clone());

    let result = coordinator
        .run(parse_targets("192.168.1.5"), 1, PROBE_TIMEOUT)
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    let device = result.get(&"192.168.1.5".parse().unwrap()).unwrap();
    assert_eq!(device.ip, Ipv4Addr::new(192, 168, 1, 5));
    assert_eq!(device.mac.to_string(), "aa:bb:cc:dd:ee:ff");
    assert_eq!(prober.probe_calls(), 1);
}

#[tokio::test]
async fn parallelism_does_not_change_contents() {
    let mut reference: Option<Vec<(Ipv4Addr, String)>> = None;

    for parallelism in [1, 2, 4] {
        let prober = Arc::new(SimulatedProber::new(&[
            ("10.0.0.1", "aa:bb:cc:dd:ee:01"),
            ("10.0.0.2", "aa:bb:cc:dd:ee:02"),
        ]));
        let coordinator = ScanCoordinator::new(prober);

        let result = coordinator
            .run(parse_targets("10.0.0.0/30"), parallelism, PROBE_TIMEOUT)
            .await
            .unwrap();

        let contents: Vec<(Ipv4Addr, String)> = result
            .iter()
            .map(|d| (d.ip, d.mac.to_string()))
            .collect();

        assert_eq!(contents.len(), 2);
        match &reference {
            None => reference = Some(contents),
            Some(expected) => assert_eq!(
                &contents, expected,
                "parallelism {parallelism} changed the result set"
            ),
        }
    }
}

#[tokio::test]
async fn overlapping_specs_never_duplicate_an_address() {
    let prober = Arc::new(SimulatedProber::new(&[
        ("10.0.0.1", "aa:bb:cc:dd:ee:01"),
        ("10.0.0.2", "aa:bb:cc:dd:ee:02"),
    ]));
    let coordinator = ScanCoordinator::new(prober.clone());

    // Both entries cover 10.0.0.1; both workers will report it.
    let result = coordinator
        .run(parse_targets("10.0.0.0/30, 10.0.0.1"), 2, PROBE_TIMEOUT)
        .await
        .unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(prober.probe_calls(), 2);

    let mut ips: Vec<Ipv4Addr> = result.iter().map(|d| d.ip).collect();
    ips.dedup();
    assert_eq!(ips.len(), 2);
}

#[tokio::test]
async fn empty_network_completes_with_empty_set() {
    let prober = Arc::new(SimulatedProber::new(&[]));
    let coordinator = ScanCoordinator::new(prober);

    let result = coordinator
        .run(parse_targets("10.0.0.0/30"), 4, PROBE_TIMEOUT)
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn invalid_entry_is_skipped_and_valid_one_scanned() {
    let (targets, rejected) = target::expand(&["not-an-ip, 192.168.1.5".to_string()]);

    assert_eq!(rejected.len(), 1);
    assert!(matches!(&rejected[0], ScanError::InvalidSpec { spec, .. } if spec == "not-an-ip"));

    let prober = Arc::new(SimulatedProber::new(&[("192.168.1.5", "aa:bb:cc:dd:ee:ff")]));
    let coordinator = ScanCoordinator::new(prober);

    let result = coordinator.run(targets, 1, PROBE_TIMEOUT).await.unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(&"192.168.1.5".parse().unwrap()));
}

#[tokio::test]
async fn empty_entries_are_dropped_without_rejection() {
    let (targets, rejected) = target::expand(&["  ".to_string()]);
    assert!(targets.is_empty());
    assert!(rejected.is_empty());
}

#[tokio::test]
async fn transport_failure_aborts_the_run() {
    let prober = Arc::new(SimulatedProber::broken());
    let coordinator = ScanCoordinator::new(prober);

    let outcome = coordinator
        .run(parse_targets("10.0.0.1, 10.0.0.2, 10.0.0.3"), 1, PROBE_TIMEOUT)
        .await;

    assert!(matches!(outcome, Err(ScanError::Transport(_))));
}

#[tokio::test]
async fn partial_results_are_discarded_on_transport_failure() {
    // The first target answers before the second hits the broken
    // transport; the collected partial must not surface as a result.
    let prober = Arc::new(
        SimulatedProber::new(&[("10.0.0.1", "aa:bb:cc:dd:ee:01")]).failing_on("10.0.0.2"),
    );
    let coordinator = ScanCoordinator::new(prober.clone());

    let outcome = coordinator
        .run(parse_targets("10.0.0.1, 10.0.0.2"), 1, PROBE_TIMEOUT)
        .await;

    assert!(matches!(outcome, Err(ScanError::Transport(_))));
    assert_eq!(prober.probe_calls(), 2);
}

#[tokio::test]
async fn cancellation_abandons_pending_targets() {
    let prober = Arc::new(
        SimulatedProber::new(&[("10.0.0.1", "aa:bb:cc:dd:ee:01")])
            .with_delay(Duration::from_millis(200)),
    );
    let coordinator = ScanCoordinator::new(prober.clone());

    let cancel = coordinator.cancel_flag();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.store(true, Ordering::Relaxed);
    });

    let outcome = coordinator
        .run(
            parse_targets("10.0.0.1, 10.0.0.2, 10.0.0.3, 10.0.0.4"),
            1,
            PROBE_TIMEOUT,
        )
        .await;

    assert!(matches!(outcome, Err(ScanError::Cancelled)));
    // The flag was raised during the first probe, so the tail of the
    // queue must never have been scheduled.
    assert!(prober.probe_calls() < 4);
}
