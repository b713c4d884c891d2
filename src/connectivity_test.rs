use super::*;

#[test]
fn starts_offline() {
    let monitor = ConnectivityMonitor::new();
    assert_eq!(monitor.state(), ConnectivityState::Offline);
    assert!(!monitor.is_online());
}

#[test]
fn reports_edges_once() {
    let monitor = ConnectivityMonitor::new();
    assert_eq!(monitor.record(ConnectivityState::Online), Transition::WentOnline);
    assert_eq!(monitor.record(ConnectivityState::Online), Transition::Unchanged);
    assert_eq!(monitor.record(ConnectivityState::Offline), Transition::WentOffline);
    assert_eq!(monitor.record(ConnectivityState::Offline), Transition::Unchanged);
}

#[test]
fn repeated_failures_from_start_never_report_an_edge() {
    let monitor = ConnectivityMonitor::new();
    for _ in 0..3 {
        assert_eq!(monitor.record(ConnectivityState::Offline), Transition::Unchanged);
    }
}

#[test]
fn force_offline_applies_immediately() {
    let monitor = ConnectivityMonitor::new();
    monitor.record(ConnectivityState::Online);
    assert_eq!(monitor.force_offline(), Transition::WentOffline);
    assert_eq!(monitor.state(), ConnectivityState::Offline);
    assert_eq!(monitor.force_offline(), Transition::Unchanged);
}

#[test]
fn poll_interval_is_thirty_seconds() {
    assert_eq!(STATUS_POLL_INTERVAL.as_secs(), 30);
}
