use super::*;
use serde_json::json;

#[test]
fn defaults_match_panel_defaults() {
    let cfg = TeacherConfig::default();
    assert_eq!(cfg.total_students, 30);
    assert_eq!(cfg.current_subject, "Mathematics");
    assert_eq!(cfg.video_quality, "HD");
    assert_eq!(cfg.animation_style, "Smooth");
    assert_eq!(cfg.auto_save_frequency, 5);
    assert_eq!(cfg.engagement_sensitivity, 75);
    assert!(cfg.video_url.is_none());
}

#[test]
fn serializes_with_camel_case_keys() {
    let value = serde_json::to_value(TeacherConfig::default()).unwrap();
    assert_eq!(value["totalStudents"], json!(30));
    assert_eq!(value["currentSubject"], json!("Mathematics"));
    assert!(value.get("videoUrl").is_none(), "absent optionals are skipped");
}

#[test]
fn apply_merges_only_present_fields() {
    let mut cfg = TeacherConfig::default();
    cfg.apply(TeacherConfigPatch {
        total_students: Some(42),
        video_url: Some("http://videos/1.mp4".into()),
        ..TeacherConfigPatch::default()
    });
    assert_eq!(cfg.total_students, 42);
    assert_eq!(cfg.video_url.as_deref(), Some("http://videos/1.mp4"));
    assert_eq!(cfg.current_subject, "Mathematics");
    assert_eq!(cfg.engagement_sensitivity, 75);
}

#[test]
fn apply_accepts_values_without_validation() {
    let mut cfg = TeacherConfig::default();
    cfg.apply(TeacherConfigPatch {
        total_students: Some(0),
        video_quality: Some("8K".into()),
        ..TeacherConfigPatch::default()
    });
    assert_eq!(cfg.total_students, 0);
    assert_eq!(cfg.video_quality, "8K");
}

#[test]
fn from_stored_fills_missing_fields_with_defaults() {
    let cfg = TeacherConfig::from_stored(&json!({ "currentSubject": "Physics" })).unwrap();
    assert_eq!(cfg.current_subject, "Physics");
    assert_eq!(cfg.total_students, DEFAULT_TOTAL_STUDENTS);
}

#[test]
fn from_stored_promotes_legacy_fields() {
    let cfg = TeacherConfig::from_stored(&json!({ "totalStrength": 44, "subject": "History" })).unwrap();
    assert_eq!(cfg.total_students, 44);
    assert_eq!(cfg.current_subject, "History");
    assert_eq!(cfg.total_strength, Some(44));
}

#[test]
fn from_stored_prefers_modern_fields_over_legacy() {
    let cfg = TeacherConfig::from_stored(&json!({
        "totalStudents": 25,
        "totalStrength": 44,
        "currentSubject": "Biology",
        "subject": "History"
    }))
    .unwrap();
    assert_eq!(cfg.total_students, 25);
    assert_eq!(cfg.current_subject, "Biology");
}

#[test]
fn from_stored_rejects_non_objects() {
    assert!(TeacherConfig::from_stored(&json!("hello")).is_none());
    assert!(TeacherConfig::from_stored(&json!({ "totalStudents": "many" })).is_none());
}

#[tokio::test]
async fn load_without_stored_value_uses_defaults() {
    let svc = ConfigService::load(LocalStore::in_memory());
    assert_eq!(svc.config().await, TeacherConfig::default());
}

#[tokio::test]
async fn load_with_unreadable_value_uses_defaults() {
    let store = LocalStore::in_memory();
    store.set(TEACHER_CONFIG_KEY, &json!(["bad"])).unwrap();
    let svc = ConfigService::load(store);
    assert_eq!(svc.config().await, TeacherConfig::default());
}

#[tokio::test]
async fn update_persists_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let svc = ConfigService::load(LocalStore::open(&path).unwrap());
    svc.update_config(TeacherConfigPatch {
        total_students: Some(35),
        current_subject: Some("Chemistry".into()),
        ..TeacherConfigPatch::default()
    })
    .await
    .unwrap();

    let reloaded = ConfigService::load(LocalStore::open(&path).unwrap());
    let cfg = reloaded.config().await;
    assert_eq!(cfg.total_students, 35);
    assert_eq!(cfg.current_subject, "Chemistry");
}

#[tokio::test]
async fn last_write_wins() {
    let svc = ConfigService::load(LocalStore::in_memory());
    let first = TeacherConfigPatch { total_students: Some(10), ..TeacherConfigPatch::default() };
    let second = TeacherConfigPatch { total_students: Some(20), ..TeacherConfigPatch::default() };
    svc.update_config(first).await.unwrap();
    svc.update_config(second).await.unwrap();
    assert_eq!(svc.config().await.total_students, 20);
}

#[tokio::test]
async fn reset_restores_defaults_and_persists() {
    let store = LocalStore::in_memory();
    let svc = ConfigService::load(store.clone());
    svc.update_config(TeacherConfigPatch { engagement_sensitivity: Some(10), ..TeacherConfigPatch::default() })
        .await
        .unwrap();

    let cfg = svc.reset_config().await.unwrap();
    assert_eq!(cfg, TeacherConfig::default());
    let stored: TeacherConfig = store.get(TEACHER_CONFIG_KEY).unwrap();
    assert_eq!(stored, TeacherConfig::default());
}

#[tokio::test]
async fn subscribers_observe_changes() {
    let svc = ConfigService::load(LocalStore::in_memory());
    let mut rx = svc.subscribe();
    svc.update_config(TeacherConfigPatch { total_students: Some(12), ..TeacherConfigPatch::default() })
        .await
        .unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().total_students, 12);
}
