//! Service wiring for the dashboard.
//!
//! `AppState` bundles the config service, the KPI and health pollers, the
//! recording lifecycle, toasts, the activity log, and the fixture catalog.
//! Each service clones into the background pollers and the handlers alike,
//! and they all see the same underlying state.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::clients::analytics::RealtimeSource;
use crate::clients::recording::RecordingBackend;
use crate::services::activity::ActivityLog;
use crate::services::health::{HealthMonitor, HostMetrics};
use crate::services::kpi_monitor::KpiMonitor;
use crate::services::recording::RecordingService;
use crate::services::toast::ToastCenter;
use crate::settings::Settings;
use crate::store::LocalStore;
use crate::teacher_config::ConfigService;

/// Everything a handler or poller needs; handed to routes via `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: ConfigService,
    pub kpis: KpiMonitor,
    pub health: HealthMonitor,
    pub recording: RecordingService,
    pub toasts: ToastCenter,
    pub activity: ActivityLog,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    #[must_use]
    pub fn new(
        settings: &Settings,
        store: LocalStore,
        config: ConfigService,
        source: Arc<dyn RealtimeSource>,
        recorder: Arc<dyn RecordingBackend>,
        metrics: Arc<dyn HostMetrics>,
    ) -> Self {
        let activity = ActivityLog::new();
        Self {
            kpis: KpiMonitor::new(source, config.clone(), activity.clone()),
            health: HealthMonitor::new(metrics, recorder.clone(), activity.clone()),
            recording: RecordingService::load(recorder, store, activity.clone()),
            toasts: ToastCenter::new(settings.toast_duration),
            catalog: Arc::new(Catalog::fixtures()),
            config,
            activity,
        }
    }
}
