//! Teacher configuration: class size, subject, and display preferences.
//!
//! DESIGN
//! ======
//! `ConfigService` owns the current `TeacherConfig` and mirrors every change
//! into the `teacherConfig` store key. Updates are partial merges with
//! last-write-wins semantics; nothing is validated. Subscribers get a
//! `watch` notification after each change so pollers can react to a new
//! class size without waiting for their next tick.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, watch};
use tracing::{info, warn};

use crate::store::{LocalStore, StoreError, TEACHER_CONFIG_KEY};

pub const DEFAULT_TOTAL_STUDENTS: u32 = 30;
pub const DEFAULT_SUBJECT: &str = "Mathematics";
pub const DEFAULT_VIDEO_QUALITY: &str = "HD";
pub const DEFAULT_ANIMATION_STYLE: &str = "Smooth";
pub const DEFAULT_AUTO_SAVE_FREQUENCY: u32 = 5;
pub const DEFAULT_ENGAGEMENT_SENSITIVITY: u32 = 75;
pub const DEFAULT_SESSION_DURATION_MINUTES: u32 = 45;

/// Subjects offered by the configuration panel. Free text is still accepted.
pub const SUBJECTS: &[&str] = &[
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "English",
    "History",
    "Geography",
    "Computer Science",
    "Other",
];

pub const VIDEO_QUALITIES: &[&str] = &["SD", "HD", "FHD", "4K"];
pub const ANIMATION_STYLES: &[&str] = &["None", "Smooth", "Bounce"];

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherConfig {
    pub total_students: u32,
    pub current_subject: String,
    pub video_quality: String,
    pub animation_style: String,
    pub auto_save_frequency: u32,
    pub engagement_sensitivity: u32,
    pub session_duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_url: Option<String>,
    /// Legacy class size; kept so older records survive a round trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_strength: Option<u32>,
    /// Legacy subject; kept so older records survive a round trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Default for TeacherConfig {
    fn default() -> Self {
        Self {
            total_students: DEFAULT_TOTAL_STUDENTS,
            current_subject: DEFAULT_SUBJECT.to_string(),
            video_quality: DEFAULT_VIDEO_QUALITY.to_string(),
            animation_style: DEFAULT_ANIMATION_STYLE.to_string(),
            auto_save_frequency: DEFAULT_AUTO_SAVE_FREQUENCY,
            engagement_sensitivity: DEFAULT_ENGAGEMENT_SENSITIVITY,
            session_duration_minutes: DEFAULT_SESSION_DURATION_MINUTES,
            video_url: None,
            transcript_url: None,
            total_strength: None,
            subject: None,
        }
    }
}

/// Partial update. Absent fields leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherConfigPatch {
    pub total_students: Option<u32>,
    pub current_subject: Option<String>,
    pub video_quality: Option<String>,
    pub animation_style: Option<String>,
    pub auto_save_frequency: Option<u32>,
    pub engagement_sensitivity: Option<u32>,
    pub session_duration_minutes: Option<u32>,
    pub video_url: Option<String>,
    pub transcript_url: Option<String>,
    pub total_strength: Option<u32>,
    pub subject: Option<String>,
}

impl TeacherConfig {
    /// Merge `patch` into `self`, field by field.
    pub fn apply(&mut self, patch: TeacherConfigPatch) {
        let TeacherConfigPatch {
            total_students,
            current_subject,
            video_quality,
            animation_style,
            auto_save_frequency,
            engagement_sensitivity,
            session_duration_minutes,
            video_url,
            transcript_url,
            total_strength,
            subject,
        } = patch;

        merge(&mut self.total_students, total_students);
        merge(&mut self.current_subject, current_subject);
        merge(&mut self.video_quality, video_quality);
        merge(&mut self.animation_style, animation_style);
        merge(&mut self.auto_save_frequency, auto_save_frequency);
        merge(&mut self.engagement_sensitivity, engagement_sensitivity);
        merge(&mut self.session_duration_minutes, session_duration_minutes);
        if video_url.is_some() {
            self.video_url = video_url;
        }
        if transcript_url.is_some() {
            self.transcript_url = transcript_url;
        }
        if total_strength.is_some() {
            self.total_strength = total_strength;
        }
        if subject.is_some() {
            self.subject = subject;
        }
    }

    /// Decode a stored record, filling gaps with defaults and promoting the
    /// legacy `totalStrength`/`subject` fields when their modern
    /// counterparts are missing. Returns `None` if `raw` is not an object.
    #[must_use]
    pub fn from_stored(raw: &serde_json::Value) -> Option<Self> {
        let stored: TeacherConfigPatch = serde_json::from_value(raw.clone()).ok()?;
        let mut config = Self::default();
        let legacy_students = stored.total_strength.filter(|_| stored.total_students.is_none());
        let legacy_subject = stored.subject.clone().filter(|_| stored.current_subject.is_none());
        config.apply(stored);
        if let Some(n) = legacy_students {
            config.total_students = n;
        }
        if let Some(s) = legacy_subject {
            config.current_subject = s;
        }
        Some(config)
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Clone)]
pub struct ConfigService {
    current: Arc<RwLock<TeacherConfig>>,
    store: LocalStore,
    changes: Arc<watch::Sender<TeacherConfig>>,
}

impl ConfigService {
    /// Load the persisted config, or the defaults when nothing usable is stored.
    #[must_use]
    pub fn load(store: LocalStore) -> Self {
        let config = match store.get_raw(TEACHER_CONFIG_KEY) {
            Some(raw) => TeacherConfig::from_stored(&raw).unwrap_or_else(|| {
                warn!("stored teacher config is unreadable; using defaults");
                TeacherConfig::default()
            }),
            None => TeacherConfig::default(),
        };
        let (tx, _rx) = watch::channel(config.clone());
        Self { current: Arc::new(RwLock::new(config)), store, changes: Arc::new(tx) }
    }

    pub async fn config(&self) -> TeacherConfig {
        self.current.read().await.clone()
    }

    /// Merge `patch` into the current config and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails. The in-memory config is
    /// updated regardless; there is no rollback.
    pub async fn update_config(&self, patch: TeacherConfigPatch) -> Result<TeacherConfig, StoreError> {
        let updated = {
            let mut current = self.current.write().await;
            current.apply(patch);
            current.clone()
        };
        self.publish(&updated)?;
        Ok(updated)
    }

    /// Restore the defaults and persist them.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub async fn reset_config(&self) -> Result<TeacherConfig, StoreError> {
        let defaults = TeacherConfig::default();
        *self.current.write().await = defaults.clone();
        info!("teacher config reset to defaults");
        self.publish(&defaults)?;
        Ok(defaults)
    }

    /// Receiver that observes every config change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TeacherConfig> {
        self.changes.subscribe()
    }

    fn publish(&self, config: &TeacherConfig) -> Result<(), StoreError> {
        self.changes.send_replace(config.clone());
        self.store.set(TEACHER_CONFIG_KEY, config)
    }
}

#[cfg(test)]
#[path = "teacher_config_test.rs"]
mod tests;
