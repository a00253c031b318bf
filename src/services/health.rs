//! System health: host disk/memory usage plus backend reachability.
//!
//! DESIGN
//! ======
//! Polled every 10 seconds by a background task and on demand from the
//! refresh route. Host metrics come from `sysinfo`; `apiStatus` is the
//! recording backend's health probe. `systemMessages` mirrors the newest
//! entries of the activity log.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use sysinfo::{Disks, System};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::clients::recording::RecordingBackend;
use crate::services::activity::ActivityLog;

pub const ELEVATED_USAGE_PERCENT: f64 = 70.0;
pub const CRITICAL_USAGE_PERCENT: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Healthy,
    Elevated,
    Critical,
}

impl UsageLevel {
    #[must_use]
    pub fn classify(percent: f64) -> Self {
        if percent < ELEVATED_USAGE_PERCENT {
            Self::Healthy
        } else if percent < CRITICAL_USAGE_PERCENT {
            Self::Elevated
        } else {
            Self::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub api_status: bool,
    pub disk_usage: f64,
    pub disk_level: UsageLevel,
    pub memory_usage: f64,
    pub memory_level: UsageLevel,
    pub system_messages: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthState {
    pub health: Option<SystemHealth>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Host usage percentages.
pub trait HostMetrics: Send + Sync {
    /// `(disk_percent, memory_percent)`, or a message when unreadable.
    ///
    /// # Errors
    ///
    /// Returns a message if the host reports no memory or no disks.
    fn sample(&self) -> Result<(f64, f64), String>;
}

/// `sysinfo`-backed host metrics.
pub struct SysinfoMetrics {
    sys: std::sync::Mutex<System>,
}

impl SysinfoMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self { sys: std::sync::Mutex::new(System::new()) }
    }
}

impl Default for SysinfoMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl HostMetrics for SysinfoMetrics {
    fn sample(&self) -> Result<(f64, f64), String> {
        let (total_mem, used_mem) = {
            let mut sys = self.sys.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            sys.refresh_memory();
            (sys.total_memory(), sys.used_memory())
        };
        let disks = Disks::new_with_refreshed_list();
        let (total_disk, available_disk) = disks
            .iter()
            .fold((0u64, 0u64), |(t, a), d| (t + d.total_space(), a + d.available_space()));

        let memory = usage_percent(used_mem, total_mem).ok_or("host reports no memory")?;
        let disk = usage_percent(total_disk.saturating_sub(available_disk), total_disk)
            .ok_or("host reports no disks")?;
        Ok((disk, memory))
    }
}

/// `used / total × 100`, one decimal. `None` for a zero total.
#[must_use]
pub fn usage_percent(used: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = used as f64 / total as f64 * 100.0;
    Some((pct.min(100.0) * 10.0).round() / 10.0)
}

#[derive(Clone)]
pub struct HealthMonitor {
    state: Arc<RwLock<HealthState>>,
    metrics: Arc<dyn HostMetrics>,
    backend: Arc<dyn RecordingBackend>,
    activity: ActivityLog,
}

impl HealthMonitor {
    #[must_use]
    pub fn new(metrics: Arc<dyn HostMetrics>, backend: Arc<dyn RecordingBackend>, activity: ActivityLog) -> Self {
        let state = HealthState { health: None, loading: true, error: None };
        Self { state: Arc::new(RwLock::new(state)), metrics, backend, activity }
    }

    pub async fn snapshot(&self) -> HealthState {
        self.state.read().await.clone()
    }

    pub async fn refresh(&self) -> HealthState {
        let api_status = self.backend.health().await;
        let metrics = self.metrics.clone();
        let sampled = tokio::task::spawn_blocking(move || metrics.sample())
            .await
            .unwrap_or_else(|e| Err(format!("metrics task failed: {e}")));

        let mut state = self.state.write().await;
        match sampled {
            Ok((disk, memory)) => {
                debug!(api_status, disk, memory, "system health refreshed");
                state.health = Some(SystemHealth {
                    api_status,
                    disk_usage: disk,
                    disk_level: UsageLevel::classify(disk),
                    memory_usage: memory,
                    memory_level: UsageLevel::classify(memory),
                    system_messages: self.activity.recent(),
                });
                state.error = None;
            }
            Err(e) => {
                warn!(error = %e, "system health sample failed");
                state.error = Some(e);
            }
        }
        state.loading = false;
        state.clone()
    }

    /// Spawn the polling task. Returns a handle for shutdown.
    pub fn spawn(&self, every: Duration) -> JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                monitor.refresh().await;
            }
        })
    }
}

#[cfg(test)]
#[path = "health_test.rs"]
mod tests;
