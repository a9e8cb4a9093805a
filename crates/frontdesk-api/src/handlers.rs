//! Request handlers for the enquiry endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use frontdesk_core::{
    validate_submission, Enquiry, EnquirySubmission, ListFilter, Pagination, Statistics,
    StatusUpdate,
};

use crate::error::ApiError;
use crate::extract::ClientDetails;
use crate::state::AppState;

// ============================================================================
// Response shapes
// ============================================================================

/// Body of a successful submission.
#[derive(Serialize)]
pub struct SubmitResponse {
    success: bool,
    message: &'static str,
    #[serde(rename = "enquiryId")]
    enquiry_id: i64,
    timestamp: DateTime<Utc>,
}

/// Body of a listing page.
#[derive(Serialize)]
pub struct ListResponse {
    success: bool,
    enquiries: Vec<Enquiry>,
    pagination: Pagination,
}

/// Body of a single-enquiry fetch.
#[derive(Serialize)]
pub struct EnquiryResponse {
    success: bool,
    enquiry: Enquiry,
}

/// Body of a status update.
#[derive(Serialize)]
pub struct UpdateResponse {
    success: bool,
    message: &'static str,
    enquiry: Enquiry,
}

/// Body of the statistics endpoint.
#[derive(Serialize)]
pub struct StatsResponse {
    success: bool,
    statistics: Statistics,
}

/// Body of the liveness endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
    service: &'static str,
}

// ============================================================================
// Request shapes
// ============================================================================

/// Query parameters for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Status filter; ignored unless it names one of the four values.
    pub status: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Rows per page.
    pub limit: Option<u32>,
}

/// Body of the status update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// The new status; anything but the four values is a 400.
    pub status: Option<String>,
    /// Replacement operator notes; omitted preserves the stored value.
    pub admin_notes: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/enquiries/submit — public submission.
pub async fn submit_enquiry(
    State(state): State<AppState>,
    ClientDetails(client): ClientDetails,
    Json(payload): Json<EnquirySubmission>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let submission = payload.trimmed();
    validate_submission(&submission).map_err(|e| ApiError::Validation(e.to_string()))?;

    let enquiry = state
        .store
        .insert(&submission, &client)
        .await
        .map_err(|e| ApiError::from_storage(e, "Failed to submit enquiry", state.dev_mode))?;

    info!(id = enquiry.id, email = %enquiry.email, "Enquiry submitted");

    // Two independent best-effort sends. Each task owns its failure;
    // neither can touch the response or the stored row.
    let mailer = state.mailer.clone();
    let for_confirmation = enquiry.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_confirmation(&for_confirmation).await {
            error!(id = for_confirmation.id, error = %err, "Failed to send confirmation email");
        }
    });
    let mailer = state.mailer.clone();
    let for_admin = enquiry.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_admin_notification(&for_admin).await {
            error!(id = for_admin.id, error = %err, "Failed to send admin notification");
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: "Enquiry submitted successfully",
            enquiry_id: enquiry.id,
            timestamp: enquiry.created_at,
        }),
    ))
}

/// GET /api/enquiries — admin listing with optional status filter.
pub async fn list_enquiries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let filter = ListFilter {
        status: params.status.as_deref().and_then(|s| s.parse().ok()),
        page: params.page.unwrap_or(1).max(1),
        limit: params.limit.unwrap_or(20).max(1),
    };

    let (enquiries, total) = state
        .store
        .list(&filter)
        .await
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch enquiries", state.dev_mode))?;

    Ok(Json(ListResponse {
        success: true,
        pagination: Pagination::new(&filter, total),
        enquiries,
    }))
}

/// GET /api/enquiries/{id} — fetch one enquiry.
pub async fn get_enquiry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EnquiryResponse>, ApiError> {
    let enquiry = state
        .store
        .fetch(id)
        .await
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch enquiry", state.dev_mode))?
        .ok_or_else(|| ApiError::NotFound("Enquiry not found".to_string()))?;

    Ok(Json(EnquiryResponse {
        success: true,
        enquiry,
    }))
}

/// PATCH /api/enquiries/{id}/status — admin status update.
pub async fn update_enquiry_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let status = payload
        .status
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ApiError::Validation("Invalid status value".to_string()))?;

    let update = StatusUpdate {
        status,
        admin_notes: payload.admin_notes,
    };
    let enquiry = state
        .store
        .update_status(id, &update)
        .await
        .map_err(|e| ApiError::from_storage(e, "Failed to update enquiry", state.dev_mode))?;

    Ok(Json(UpdateResponse {
        success: true,
        message: "Enquiry status updated",
        enquiry,
    }))
}

/// GET /api/enquiries/stats — trailing-30-day aggregates.
pub async fn enquiry_stats(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, ApiError> {
    let statistics = state
        .store
        .statistics()
        .await
        .map_err(|e| ApiError::from_storage(e, "Failed to fetch statistics", state.dev_mode))?;

    Ok(Json(StatsResponse {
        success: true,
        statistics,
    }))
}

/// GET /api/health — liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        service: "Frontdesk Enquiry API",
    })
}

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Route not found" })),
    )
}
