//! Toast notifications with timed auto-dismissal.
//!
//! DESIGN
//! ======
//! Toasts live in memory with an absolute expiry. Reads prune expired
//! entries, so a toast disappears once its duration elapses without any
//! timer task per toast. Time-dependent paths take an explicit `Instant`
//! (`*_at`) so tests can step the clock.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastRequest {
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl ToastRequest {
    #[must_use]
    pub fn new(kind: ToastKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, title: title.into(), message: Some(message.into()), duration_ms: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub duration_ms: u64,
    #[serde(skip)]
    expires_at: Option<Instant>,
}

#[derive(Clone)]
pub struct ToastCenter {
    toasts: Arc<Mutex<Vec<Toast>>>,
    default_duration: Duration,
}

impl ToastCenter {
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self { toasts: Arc::new(Mutex::new(Vec::new())), default_duration }
    }

    pub fn show(&self, request: ToastRequest) -> Toast {
        self.show_at(request, Instant::now())
    }

    pub(crate) fn show_at(&self, request: ToastRequest, now: Instant) -> Toast {
        let duration = request
            .duration_ms
            .map_or(self.default_duration, Duration::from_millis);
        let toast = Toast {
            id: Uuid::new_v4(),
            kind: request.kind,
            title: request.title,
            message: request.message,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            expires_at: now.checked_add(duration),
        };
        self.lock().push(toast.clone());
        toast
    }

    /// Remove a toast before its timeout. Returns whether it was still shown.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    /// Toasts still on screen, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.active_at(Instant::now())
    }

    pub(crate) fn active_at(&self, now: Instant) -> Vec<Toast> {
        let mut toasts = self.lock();
        toasts.retain(|t| t.expires_at.is_none_or(|at| at > now));
        toasts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "toast_test.rs"]
mod tests;
