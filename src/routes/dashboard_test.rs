use super::*;
use crate::state::test_helpers::{app_state, snapshot};

#[tokio::test]
async fn dashboard_uses_fallback_kpis_before_first_poll() {
    let (state, _) = app_state(Ok(snapshot(3, 3)));
    let Json(resp) = dashboard(State(state)).await;

    assert!(!resp.live);
    assert_eq!(resp.kpis.attendance.value, "93.3%");
    assert_eq!(resp.kpis.sessions.value, "4");
    assert_eq!(resp.kpis.transcripts.value, "4");
    assert_eq!(resp.video_session.unwrap().video.id, "v1");
    assert_eq!(resp.charts.engagement.len(), 7);
    assert_eq!(resp.charts.emotions.len(), 5);
}

#[tokio::test]
async fn dashboard_uses_polled_kpis_once_available() {
    let (state, _) = app_state(Ok(snapshot(15, 12)));
    let Json(refreshed) = refresh_kpis(State(state.clone())).await;
    assert!(refreshed.error.is_none());

    let Json(resp) = dashboard(State(state)).await;
    assert!(resp.live);
    assert_eq!(resp.kpis.attendance.value, "50.0%");
    assert_eq!(resp.kpis.engagement.value, "80.0%");
}

#[tokio::test]
async fn realtime_reports_error_string() {
    let (state, _) = app_state(Err("connection refused".into()));
    refresh_kpis(State(state.clone())).await;

    let Json(kpis) = realtime_kpis(State(state)).await;
    assert!(!kpis.loading);
    assert!(kpis.kpis.is_none());
    assert!(kpis.error.unwrap().contains("connection refused"));
}

#[tokio::test]
async fn dashboard_serializes_front_end_shape() {
    let (state, _) = app_state(Ok(snapshot(1, 1)));
    let resp = build_dashboard(&state).await;
    let value = serde_json::to_value(&resp).unwrap();
    assert!(value["kpis"]["attendance"]["value"].is_string());
    assert!(value["videoSession"]["topicPreview"].is_array());
    assert!(value["charts"]["emotions"][0]["name"].is_string());
}
