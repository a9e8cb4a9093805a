//! Integration tests for the status update endpoint.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::common::{submission, TestHarness};

fn timestamp(body: &Value, key: &str) -> DateTime<Utc> {
    body["enquiry"][key]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .expect("timestamp parses")
}

#[tokio::test]
async fn test_update_unknown_id_returns_404_and_leaves_table_unchanged() {
    let harness = TestHarness::new().await;
    harness.submit(&submission("Ada", "Audit")).await;

    let (status, body) = harness
        .patch_json("/api/enquiries/999/status", &json!({ "status": "closed" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Enquiry not found");

    let (_, list) = harness.get("/api/enquiries?status=new").await;
    assert_eq!(list["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_unrecognized_status_is_rejected_before_any_write() {
    let harness = TestHarness::new().await;
    let id = harness.submit(&submission("Ada", "Audit")).await;

    let (status, body) = harness
        .patch_json(
            &format!("/api/enquiries/{id}/status"),
            &json!({ "status": "archived" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid status value");

    let (_, fetched) = harness.get(&format!("/api/enquiries/{id}")).await;
    assert_eq!(fetched["enquiry"]["status"], "new");
}

#[tokio::test]
async fn test_missing_status_is_rejected() {
    let harness = TestHarness::new().await;
    let id = harness.submit(&submission("Ada", "Audit")).await;

    let (status, _) = harness
        .patch_json(
            &format!("/api/enquiries/{id}/status"),
            &json!({ "admin_notes": "no status here" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_notes_coalesce_and_updated_at_advances() {
    let harness = TestHarness::new().await;
    let id = harness.submit(&submission("Ada", "Audit")).await;
    let uri = format!("/api/enquiries/{id}/status");

    let (status, noted) = harness
        .patch_json(
            &uri,
            &json!({ "status": "in_progress", "admin_notes": "Called back" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(noted["enquiry"]["admin_notes"], "Called back");

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    // Omitting admin_notes preserves the stored value.
    let (_, closed) = harness.patch_json(&uri, &json!({ "status": "closed" })).await;
    assert_eq!(closed["enquiry"]["admin_notes"], "Called back");
    assert_eq!(closed["enquiry"]["status"], "closed");
    assert!(timestamp(&closed, "updated_at") > timestamp(&noted, "updated_at"));

    // Supplying a new value overwrites.
    let (_, renoted) = harness
        .patch_json(
            &uri,
            &json!({ "status": "responded", "admin_notes": "Sent quote" }),
        )
        .await;
    assert_eq!(renoted["enquiry"]["admin_notes"], "Sent quote");
}

#[tokio::test]
async fn test_submit_fetch_close_refetch_scenario() {
    let harness = TestHarness::new().await;

    let (status, created) = harness
        .post_json(
            "/api/enquiries/submit",
            &json!({ "name": "A", "email": "a@b.com", "subject": "S", "message": "M" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["enquiryId"].as_i64().unwrap();

    let (status, fetched) = harness.get(&format!("/api/enquiries/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["enquiry"]["subject"], "S");
    assert_eq!(fetched["enquiry"]["message"], "M");
    let created_at = timestamp(&fetched, "created_at");

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, updated) = harness
        .patch_json(
            &format!("/api/enquiries/{id}/status"),
            &json!({ "status": "closed" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Enquiry status updated");

    let (_, refetched) = harness.get(&format!("/api/enquiries/{id}")).await;
    assert_eq!(refetched["enquiry"]["status"], "closed");
    assert!(timestamp(&refetched, "updated_at") > created_at);
    assert_eq!(timestamp(&refetched, "created_at"), created_at);
}
