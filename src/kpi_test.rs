use super::*;
use serde_json::json;

fn detection(id: &str, emotion: &str, engaged: bool) -> StudentDetection {
    StudentDetection {
        id: TrackId(id.into()),
        emotion: emotion.into(),
        engagement: if engaged { EngagementStatus::Engaged } else { EngagementStatus::Disengaged },
    }
}

fn ids(raw: &[&str]) -> Vec<TrackId> {
    raw.iter().map(|s| TrackId((*s).into())).collect()
}

// =============================================================================
// arithmetic
// =============================================================================

#[test]
fn attendance_is_present_over_total() {
    assert!((attendance_percent(15, 30) - 50.0).abs() < 1e-9);
    assert!((attendance_percent(28, 30) - 93.333_333).abs() < 1e-4);
}

#[test]
fn attendance_clamps_to_one_hundred() {
    assert!((attendance_percent(45, 30) - 100.0).abs() < f64::EPSILON);
}

#[test]
fn attendance_with_zero_total_is_zero() {
    assert!(attendance_percent(5, 0).abs() < f64::EPSILON);
}

#[test]
fn engagement_is_engaged_over_present() {
    assert!((engagement_percent(3, 4) - 75.0).abs() < 1e-9);
    assert!(engagement_percent(0, 0).abs() < f64::EPSILON);
}

#[test]
fn engagement_counts_dedupes_tracks_keeping_last_status() {
    let snapshot = RealtimeSnapshot {
        present_ids: vec![],
        engagement: vec![
            detection("1", "happy", false),
            detection("1", "happy", true),
            detection("2", "sad", false),
        ],
    };
    assert_eq!(engagement_counts(&snapshot), (1, 2));
}

#[test]
fn engagement_counts_treats_unknown_as_not_engaged() {
    let snapshot = RealtimeSnapshot {
        present_ids: vec![],
        engagement: vec![
            detection("1", "happy", true),
            StudentDetection { id: TrackId("2".into()), emotion: "fear".into(), engagement: EngagementStatus::Unknown },
        ],
    };
    assert_eq!(engagement_counts(&snapshot), (1, 2));
}

// =============================================================================
// emotions
// =============================================================================

#[test]
fn emotion_counts_groups_by_label() {
    let snapshot = RealtimeSnapshot {
        present_ids: vec![],
        engagement: vec![
            detection("1", "happy", true),
            detection("2", "Happy", true),
            detection("3", "neutral", true),
            detection("4", "sad", false),
            detection("5", "NEUTRAL", true),
            detection("6", "happy", true),
        ],
    };
    let counts = emotion_counts(&snapshot);
    assert_eq!(
        counts,
        vec![
            EmotionCount { emotion: "Happy".into(), count: 3 },
            EmotionCount { emotion: "Neutral".into(), count: 2 },
            EmotionCount { emotion: "Sad".into(), count: 1 },
        ]
    );
}

#[test]
fn emotion_counts_breaks_ties_alphabetically_and_skips_blank() {
    let snapshot = RealtimeSnapshot {
        present_ids: vec![],
        engagement: vec![
            detection("1", "surprise", true),
            detection("2", "anger", false),
            detection("3", "  ", true),
        ],
    };
    let labels: Vec<String> = emotion_counts(&snapshot).into_iter().map(|e| e.emotion).collect();
    assert_eq!(labels, vec!["Anger", "Surprise"]);
}

// =============================================================================
// derive_kpis
// =============================================================================

#[test]
fn derive_kpis_first_snapshot_has_zero_delta() {
    let snapshot = RealtimeSnapshot {
        present_ids: ids(&["1", "2", "3"]),
        engagement: vec![detection("1", "happy", true), detection("2", "neutral", false)],
    };
    let kpis = derive_kpis(4, &snapshot, None, OffsetDateTime::UNIX_EPOCH);

    assert_eq!(kpis.attendance.value, "75.0%");
    assert_eq!(kpis.engagement.value, "33.3%");
    assert!(kpis.attendance.delta.abs() < f64::EPSILON);
    assert_eq!(kpis.students_in_frame, 2);
    assert_eq!(kpis.emotions.len(), 2);
}

#[test]
fn derive_kpis_delta_is_change_in_points() {
    let first = RealtimeSnapshot { present_ids: ids(&["1", "2"]), engagement: vec![detection("1", "happy", true)] };
    let second = RealtimeSnapshot {
        present_ids: ids(&["1", "2", "3"]),
        engagement: vec![detection("1", "happy", true), detection("2", "sad", false)],
    };
    let prev = derive_kpis(10, &first, None, OffsetDateTime::UNIX_EPOCH);
    let next = derive_kpis(10, &second, Some(&prev), OffsetDateTime::UNIX_EPOCH);

    assert!((next.attendance.delta - 10.0).abs() < 1e-9);
    assert!((next.engagement.delta - -16.7).abs() < 1e-9);
}

#[test]
fn derive_kpis_engagement_is_over_present_not_in_frame() {
    let snapshot = RealtimeSnapshot {
        present_ids: ids(&["1", "2", "3", "4"]),
        engagement: vec![detection("1", "happy", true), detection("2", "neutral", true)],
    };
    let kpis = derive_kpis(4, &snapshot, None, OffsetDateTime::UNIX_EPOCH);

    assert_eq!(kpis.engagement.value, "50.0%");
    assert_eq!(kpis.students_in_frame, 2);
}

#[test]
fn derive_kpis_engagement_clamps_when_in_frame_exceeds_present() {
    let snapshot = RealtimeSnapshot {
        present_ids: ids(&["1"]),
        engagement: vec![detection("1", "happy", true), detection("2", "happy", true)],
    };
    let kpis = derive_kpis(4, &snapshot, None, OffsetDateTime::UNIX_EPOCH);
    assert_eq!(kpis.engagement.value, "100.0%");
}

#[test]
fn derive_kpis_ignores_duplicate_present_ids() {
    let snapshot = RealtimeSnapshot { present_ids: ids(&["7", "7", "8"]), engagement: vec![] };
    let kpis = derive_kpis(4, &snapshot, None, OffsetDateTime::UNIX_EPOCH);
    assert!((kpis.attendance.percent - 50.0).abs() < 1e-9);
}

// =============================================================================
// wire shape
// =============================================================================

#[test]
fn snapshot_parses_numeric_and_string_ids() {
    let snapshot: RealtimeSnapshot = serde_json::from_value(json!({
        "present_ids": [1, "2"],
        "engagement": [
            { "id": 1, "emotion": "happy", "engagement": "Engaged" },
            { "id": "2", "emotion": "fear", "engagement": "Disengaged" }
        ]
    }))
    .unwrap();
    assert_eq!(snapshot.present_ids, ids(&["1", "2"]));
    assert_eq!(snapshot.engagement[1].engagement, EngagementStatus::Disengaged);
}

#[test]
fn snapshot_parses_unknown_engagement_status() {
    let snapshot: RealtimeSnapshot = serde_json::from_value(json!({
        "present_ids": [1, 2],
        "engagement": [
            { "id": 1, "emotion": "happy", "engagement": "Engaged" },
            { "id": 2, "emotion": "fear", "engagement": "Unknown" }
        ]
    }))
    .unwrap();
    assert_eq!(snapshot.engagement[1].engagement, EngagementStatus::Unknown);

    let kpis = derive_kpis(2, &snapshot, None, OffsetDateTime::UNIX_EPOCH);
    assert_eq!(kpis.engagement.value, "50.0%");
}

#[test]
fn snapshot_tolerates_missing_fields() {
    let snapshot: RealtimeSnapshot = serde_json::from_value(json!({})).unwrap();
    assert!(snapshot.present_ids.is_empty());
    assert!(snapshot.engagement.is_empty());
}

#[test]
fn kpis_serialize_camel_case_with_rfc3339_timestamp() {
    let kpis = derive_kpis(1, &RealtimeSnapshot::default(), None, OffsetDateTime::UNIX_EPOCH);
    let value = serde_json::to_value(&kpis).unwrap();
    assert_eq!(value["studentsInFrame"], json!(0));
    assert_eq!(value["lastUpdated"], json!("1970-01-01T00:00:00Z"));
}
