use super::*;
use crate::state::test_helpers::FakeRecorder;

struct FixedMetrics(Result<(f64, f64), String>);

impl HostMetrics for FixedMetrics {
    fn sample(&self) -> Result<(f64, f64), String> {
        self.0.clone()
    }
}

fn monitor(metrics: FixedMetrics, healthy: bool) -> (HealthMonitor, ActivityLog) {
    let activity = ActivityLog::new();
    let recorder = Arc::new(FakeRecorder::new());
    recorder.set_healthy(healthy);
    (HealthMonitor::new(Arc::new(metrics), recorder, activity.clone()), activity)
}

#[test]
fn classify_thresholds() {
    assert_eq!(UsageLevel::classify(0.0), UsageLevel::Healthy);
    assert_eq!(UsageLevel::classify(69.9), UsageLevel::Healthy);
    assert_eq!(UsageLevel::classify(70.0), UsageLevel::Elevated);
    assert_eq!(UsageLevel::classify(84.9), UsageLevel::Elevated);
    assert_eq!(UsageLevel::classify(85.0), UsageLevel::Critical);
}

#[test]
fn usage_percent_rounds_and_handles_zero_total() {
    assert_eq!(usage_percent(652, 1000), Some(65.2));
    assert_eq!(usage_percent(1, 3), Some(33.3));
    assert_eq!(usage_percent(5, 0), None);
}

#[tokio::test]
async fn refresh_builds_snapshot_with_levels_and_messages() {
    let (monitor, activity) = monitor(FixedMetrics(Ok((65.2, 87.0))), true);
    activity.record("Session recording completed successfully");

    let state = monitor.refresh().await;
    let health = state.health.unwrap();
    assert!(!state.loading);
    assert!(health.api_status);
    assert_eq!(health.disk_level, UsageLevel::Healthy);
    assert_eq!(health.memory_level, UsageLevel::Critical);
    assert_eq!(health.system_messages, vec!["Session recording completed successfully"]);
}

#[tokio::test]
async fn unreachable_backend_reports_api_down() {
    let (monitor, _) = monitor(FixedMetrics(Ok((10.0, 10.0))), false);
    let health = monitor.refresh().await.health.unwrap();
    assert!(!health.api_status);
}

#[tokio::test]
async fn metrics_failure_sets_error() {
    let (monitor, _) = monitor(FixedMetrics(Err("host reports no disks".into())), true);
    let state = monitor.refresh().await;
    assert_eq!(state.error.as_deref(), Some("host reports no disks"));
    assert!(state.health.is_none());
    assert!(!state.loading);
}

#[test]
fn sysinfo_metrics_sample_is_in_range() {
    // Hosts without any mounted disk (some containers) legitimately fail.
    if let Ok((disk, memory)) = SysinfoMetrics::new().sample() {
        assert!((0.0..=100.0).contains(&disk));
        assert!((0.0..=100.0).contains(&memory));
    }
}
