//! KPI monitor: periodic real-time polling.
//!
//! DESIGN
//! ======
//! A background task wakes every poll interval (5 seconds by default),
//! fetches a snapshot for the current subject, and derives KPIs against the
//! configured class size. It also wakes immediately when `totalStudents`
//! changes. A failed fetch records its message and keeps the last good
//! KPIs; there is no retry beyond the next tick.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::clients::analytics::RealtimeSource;
use crate::kpi::{RealTimeKpis, derive_kpis};
use crate::services::activity::ActivityLog;
use crate::teacher_config::ConfigService;

#[derive(Debug, Clone, Serialize)]
pub struct KpiState {
    pub kpis: Option<RealTimeKpis>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for KpiState {
    fn default() -> Self {
        Self { kpis: None, loading: true, error: None }
    }
}

#[derive(Clone)]
pub struct KpiMonitor {
    state: Arc<RwLock<KpiState>>,
    source: Arc<dyn RealtimeSource>,
    config: ConfigService,
    activity: ActivityLog,
}

impl KpiMonitor {
    #[must_use]
    pub fn new(source: Arc<dyn RealtimeSource>, config: ConfigService, activity: ActivityLog) -> Self {
        Self { state: Arc::new(RwLock::new(KpiState::default())), source, config, activity }
    }

    pub async fn snapshot(&self) -> KpiState {
        self.state.read().await.clone()
    }

    /// Fetch once and fold the outcome into the shared state.
    pub async fn refresh(&self) -> KpiState {
        let config = self.config.config().await;
        // Fetch outside the lock; only the merge holds it.
        let fetched = self.source.fetch(&config.current_subject).await;

        let mut state = self.state.write().await;
        match fetched {
            Ok(snapshot) => {
                let kpis = derive_kpis(
                    config.total_students,
                    &snapshot,
                    state.kpis.as_ref(),
                    OffsetDateTime::now_utc(),
                );
                debug!(
                    attendance = %kpis.attendance.value,
                    engagement = %kpis.engagement.value,
                    in_frame = kpis.students_in_frame,
                    "kpis refreshed"
                );
                state.kpis = Some(kpis);
                state.error = None;
            }
            Err(e) => {
                warn!(error = %e, "real-time kpi fetch failed");
                self.activity.record(format!("Real-time feed unavailable: {e}"));
                state.error = Some(e.to_string());
            }
        }
        state.loading = false;
        state.clone()
    }

    /// Spawn the polling task. Returns a handle for shutdown.
    pub fn spawn(&self, every: Duration) -> JoinHandle<()> {
        let monitor = self.clone();
        let mut changes = self.config.subscribe();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            let mut total_students = changes.borrow_and_update().total_students;
            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    changed = changes.changed() => {
                        if changed.is_err() {
                            // Config service dropped; keep ticking on the interval alone.
                            interval.tick().await;
                        } else {
                            let latest = changes.borrow_and_update().total_students;
                            if latest == total_students {
                                continue;
                            }
                            total_students = latest;
                            interval.reset();
                        }
                    }
                }
                monitor.refresh().await;
            }
        })
    }
}

#[cfg(test)]
#[path = "kpi_monitor_test.rs"]
mod tests;
