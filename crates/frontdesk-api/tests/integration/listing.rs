//! Integration tests for the listing endpoint.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{submission, TestHarness};

#[tokio::test]
async fn test_listing_defaults_and_order() {
    let harness = TestHarness::new().await;
    for name in ["First", "Second", "Third"] {
        harness.submit(&submission(name, "Subject")).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (status, body) = harness.get("/api/enquiries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let enquiries = body["enquiries"].as_array().unwrap();
    assert_eq!(enquiries.len(), 3);
    // Newest first.
    assert_eq!(enquiries[0]["name"], "Third");
    assert_eq!(enquiries[2]["name"], "First");

    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 20);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_page_two_limit_one_of_three_rows() {
    let harness = TestHarness::new().await;
    for name in ["First", "Second", "Third"] {
        harness.submit(&submission(name, "Subject")).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (status, body) = harness.get("/api/enquiries?page=2&limit=1").await;
    assert_eq!(status, StatusCode::OK);

    let enquiries = body["enquiries"].as_array().unwrap();
    assert_eq!(enquiries.len(), 1);
    // Second most recent.
    assert_eq!(enquiries[0]["name"], "Second");
    assert_eq!(body["pagination"]["totalPages"], 3);
}

#[tokio::test]
async fn test_status_filter_returns_only_matching_rows() {
    let harness = TestHarness::new().await;
    let first = harness.submit(&submission("Ada", "Audit")).await;
    harness.submit(&submission("Grace", "Training")).await;

    harness
        .patch_json(
            &format!("/api/enquiries/{first}/status"),
            &json!({ "status": "closed" }),
        )
        .await;

    let (_, filtered) = harness.get("/api/enquiries?status=new").await;
    let enquiries = filtered["enquiries"].as_array().unwrap();
    assert_eq!(enquiries.len(), 1);
    assert!(enquiries.iter().all(|e| e["status"] == "new"));
    assert_eq!(filtered["pagination"]["total"], 1);

    let (_, all) = harness.get("/api/enquiries").await;
    assert_eq!(all["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_unrecognized_status_filter_is_ignored() {
    let harness = TestHarness::new().await;
    harness.submit(&submission("Ada", "Audit")).await;

    let (status, body) = harness.get("/api/enquiries?status=archived").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_listing_empty_table() {
    let harness = TestHarness::new().await;
    let (status, body) = harness.get("/api/enquiries").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["enquiries"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["totalPages"], 0);
}
