//! Smoke tests against the live system source.
//!
//! Actual connectivity depends on the host environment, so these assert
//! shape and non-panic behavior rather than specific statuses.

use std::net::SocketAddr;

use reachwatch::{
    FlagSource, ReachabilityMonitor, ReachabilityStatus, SystemFlagSource, Target, classify,
};

#[test]
fn test_default_route_snapshot_classifies() {
    let source = SystemFlagSource::default_route();
    let status = classify(source.current_flags());
    // The classifier is total; a live snapshot never yields Unknown.
    assert_ne!(status, ReachabilityStatus::Unknown);
}

#[test]
fn test_loopback_address_source() {
    let addr: SocketAddr = "127.0.0.1:80".parse().unwrap();
    let source = SystemFlagSource::for_address(addr);
    assert_eq!(source.target(), Target::Address(addr));
    let _ = source.current_flags();
}

#[test]
fn test_unresolvable_domain_produces_no_monitor() {
    let result = ReachabilityMonitor::for_domain("unresolvable.invalid");
    assert!(result.is_err());
}

#[test]
fn test_default_route_monitor_start_stop() {
    let monitor = ReachabilityMonitor::new();
    assert_eq!(monitor.current_status(), ReachabilityStatus::Unknown);

    // Platform watchers may be unavailable in sandboxed environments; when
    // they are available the full start/stop cycle must hold.
    match monitor.start_monitoring() {
        Ok(()) => {
            assert!(monitor.is_running());
            assert_ne!(monitor.current_status(), ReachabilityStatus::Unknown);
            monitor.stop_monitoring();
            assert!(!monitor.is_running());
        }
        Err(e) => {
            eprintln!("watcher unavailable here: {e}");
            assert!(!monitor.is_running());
        }
    }
}
