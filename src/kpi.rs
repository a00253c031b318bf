//! Real-time KPI derivation.
//!
//! Pure functions over a classroom snapshot: attendance against the
//! configured class size, engagement over the students marked present, and
//! emotion counts. No I/O happens here.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

// =============================================================================
// SNAPSHOT (wire shape of GET /api/classroom/realtime)
// =============================================================================

/// Tracker-assigned identifier. The vision backend emits numbers, older
/// builds emit strings; both normalise to the same text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TrackId(pub String);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TrackId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self(n.to_string()),
            Raw::Float(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

/// Per-track status from the tracker. New tracks report `Unknown` until
/// they have been seen facing forward; any label we do not recognise lands
/// there too and counts as not engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementStatus {
    Engaged,
    Disengaged,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetection {
    pub id: TrackId,
    #[serde(default)]
    pub emotion: String,
    pub engagement: EngagementStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeSnapshot {
    #[serde(default)]
    pub present_ids: Vec<TrackId>,
    #[serde(default)]
    pub engagement: Vec<StudentDetection>,
}

// =============================================================================
// DERIVED KPIS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    /// Display form, e.g. `"93.3%"`.
    pub value: String,
    pub percent: f64,
    /// Change in percentage points since the previous derivation.
    pub delta: f64,
}

impl Kpi {
    #[must_use]
    pub fn new(percent: f64, previous: Option<f64>) -> Self {
        let delta = previous.map_or(0.0, |p| round1(percent - p));
        Self { value: format!("{percent:.1}%"), percent, delta }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealTimeKpis {
    pub attendance: Kpi,
    pub engagement: Kpi,
    pub students_in_frame: u32,
    pub emotions: Vec<EmotionCount>,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

/// `present / total × 100`, clamped to 100. A zero class size yields 0.
#[must_use]
pub fn attendance_percent(present: usize, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = present as f64 / f64::from(total) * 100.0;
    pct.min(100.0)
}

/// `engaged / present × 100`, clamped to 100. Nobody present yields 0.
#[must_use]
pub fn engagement_percent(engaged: usize, present: usize) -> f64 {
    if present == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = engaged as f64 / present as f64 * 100.0;
    pct.min(100.0)
}

/// Distinct tracks in frame and how many of them are engaged. A track seen
/// twice in one frame counts once, with its last reported status.
#[must_use]
pub fn engagement_counts(snapshot: &RealtimeSnapshot) -> (usize, usize) {
    let mut latest: BTreeMap<&TrackId, EngagementStatus> = BTreeMap::new();
    for detection in &snapshot.engagement {
        latest.insert(&detection.id, detection.engagement);
    }
    let engaged = latest.values().filter(|s| **s == EngagementStatus::Engaged).count();
    (engaged, latest.len())
}

/// Group detections by emotion label (Title Case), most frequent first,
/// ties broken alphabetically. Empty labels are skipped.
#[must_use]
pub fn emotion_counts(snapshot: &RealtimeSnapshot) -> Vec<EmotionCount> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for detection in &snapshot.engagement {
        let label = title_case(detection.emotion.trim());
        if label.is_empty() {
            continue;
        }
        *counts.entry(label).or_default() += 1;
    }
    let mut out: Vec<EmotionCount> = counts
        .into_iter()
        .map(|(emotion, count)| EmotionCount { emotion, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.emotion.cmp(&b.emotion)));
    out
}

/// Derive the full KPI set for one snapshot. `previous` supplies the deltas.
#[must_use]
pub fn derive_kpis(
    total_students: u32,
    snapshot: &RealtimeSnapshot,
    previous: Option<&RealTimeKpis>,
    now: OffsetDateTime,
) -> RealTimeKpis {
    let present: HashSet<&TrackId> = snapshot.present_ids.iter().collect();
    let (engaged, detected) = engagement_counts(snapshot);

    let attendance = attendance_percent(present.len(), total_students);
    let engagement = engagement_percent(engaged, present.len());

    RealTimeKpis {
        attendance: Kpi::new(attendance, previous.map(|p| p.attendance.percent)),
        engagement: Kpi::new(engagement, previous.map(|p| p.engagement.percent)),
        students_in_frame: u32::try_from(detected).unwrap_or(u32::MAX),
        emotions: emotion_counts(snapshot),
        last_updated: now,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn title_case(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "kpi_test.rs"]
mod tests;
