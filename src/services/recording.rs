//! Recording session hand-off.
//!
//! DESIGN
//! ======
//! Tracks whether analytics recording is live and for which session, and
//! keeps the artifact URLs from the last successful stop. The live flag and
//! session id are persisted (`isAnalyticsActive`, `analyticsSessionId`) so a
//! restart can still stop the session.
//!
//! Local state only moves after the backend confirms: a failed start stays
//! inactive, a failed stop stays active and can be retried.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::recording::{RecordingBackend, RecordingError, RecordingResult};
use crate::services::activity::ActivityLog;
use crate::store::{ANALYTICS_ACTIVE_KEY, ANALYTICS_SESSION_KEY, LocalStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingStatus {
    pub active: bool,
    pub session_id: Option<String>,
    pub last_result: Option<RecordingResult>,
}

#[derive(Clone)]
pub struct RecordingService {
    // Held across the backend call so start/stop never interleave.
    status: Arc<Mutex<RecordingStatus>>,
    backend: Arc<dyn RecordingBackend>,
    store: LocalStore,
    activity: ActivityLog,
}

impl RecordingService {
    /// Restore persisted state. An active flag without a session id is
    /// treated as inactive since it could never be stopped.
    #[must_use]
    pub fn load(backend: Arc<dyn RecordingBackend>, store: LocalStore, activity: ActivityLog) -> Self {
        let active = store.get::<bool>(ANALYTICS_ACTIVE_KEY).unwrap_or(false);
        let session_id = store.get::<String>(ANALYTICS_SESSION_KEY);
        let status = match (active, session_id) {
            (true, Some(id)) => {
                info!(session_id = %id, "restored active recording session");
                RecordingStatus { active: true, session_id: Some(id), last_result: None }
            }
            (true, None) => {
                warn!("analytics flagged active without a session id; resetting");
                RecordingStatus::default()
            }
            (false, _) => RecordingStatus::default(),
        };
        Self { status: Arc::new(Mutex::new(status)), backend, store, activity }
    }

    pub async fn status(&self) -> RecordingStatus {
        self.status.lock().await.clone()
    }

    /// Start recording `session_id`, or a fresh UUID when none is given.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyActive` if a session is live, the backend error if
    /// the start is refused, or `Persist` if the flag cannot be stored.
    pub async fn start(&self, session_id: Option<String>) -> Result<RecordingStatus, RecordingError> {
        let mut status = self.status.lock().await;
        if let (true, Some(id)) = (status.active, status.session_id.as_ref()) {
            return Err(RecordingError::AlreadyActive(id.clone()));
        }

        let session_id = session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        if let Err(e) = self.backend.start(&session_id).await {
            warn!(%session_id, error = %e, "failed to start recording");
            self.activity.record(format!("Recording failed to start: {e}"));
            return Err(e);
        }

        status.active = true;
        status.session_id = Some(session_id.clone());
        self.persist(&status)?;
        info!(%session_id, "recording started");
        self.activity.record("Session recording started");
        Ok(status.clone())
    }

    /// Stop the live session and keep the returned artifact URLs.
    ///
    /// # Errors
    ///
    /// Returns `NotActive` if nothing is recording, the backend error if the
    /// stop is refused (the session stays active), or `Persist`.
    pub async fn stop(&self) -> Result<RecordingStatus, RecordingError> {
        let mut status = self.status.lock().await;
        let Some(session_id) = status.session_id.clone().filter(|_| status.active) else {
            return Err(RecordingError::NotActive);
        };

        let result = match self.backend.stop(&session_id).await {
            Ok(result) => result,
            Err(e) => {
                warn!(%session_id, error = %e, "failed to stop recording; session left active");
                self.activity.record(format!("Recording failed to stop: {e}"));
                return Err(e);
            }
        };

        status.active = false;
        status.session_id = None;
        if let Some(result) = result {
            info!(%session_id, video_url = %result.video_url, "recording artifacts ready");
            self.activity.record("Session recording completed successfully");
            self.activity.record("Transcript generation completed");
            status.last_result = Some(result);
        } else {
            self.activity.record("Session recording stopped without artifacts");
        }
        self.persist(&status)?;
        Ok(status.clone())
    }

    fn persist(&self, status: &RecordingStatus) -> Result<(), RecordingError> {
        self.store
            .set(ANALYTICS_ACTIVE_KEY, &status.active)
            .and_then(|()| match &status.session_id {
                Some(id) => self.store.set(ANALYTICS_SESSION_KEY, id),
                None => self.store.remove(ANALYTICS_SESSION_KEY),
            })
            .map_err(|e| RecordingError::Persist(e.to_string()))
    }
}

#[cfg(test)]
#[path = "recording_test.rs"]
mod tests;
