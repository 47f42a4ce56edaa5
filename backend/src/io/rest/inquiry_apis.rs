use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use log::{error, info, warn};
use serde::Deserialize;

use crate::domain::InquiryOutcome;
use crate::AppState;
use shared::{
    InquiryListResponse, InquiryStatus, SubmitInquiryRequest, SubmitInquiryResponse,
    UpdateInquiryStatusRequest, UpdateInquiryStatusResponse,
};

// Query parameters for the inquiry list API
#[derive(Debug, Deserialize)]
pub struct InquiryListQuery {
    pub status: Option<InquiryStatus>,
}

/// Create a router for contact inquiry related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inquiries).post(submit_inquiry))
        .route("/:id/status", put(update_inquiry_status))
}

/// File a new contact inquiry
async fn submit_inquiry(
    State(state): State<AppState>,
    Json(request): Json<SubmitInquiryRequest>,
) -> impl IntoResponse {
    info!("POST /api/inquiries");

    match state.inquiry_service.submit(request).await {
        Ok(InquiryOutcome::Accepted(inquiry)) => {
            let response = SubmitInquiryResponse {
                inquiry,
                success_message: "Inquiry submitted successfully".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Ok(InquiryOutcome::Rejected(errors)) => {
            warn!("Rejected inquiry submission: {} error(s)", errors.len());
            (StatusCode::BAD_REQUEST, Json(errors)).into_response()
        }
        Err(e) => {
            error!("Failed to store inquiry: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error storing inquiry").into_response()
        }
    }
}

/// List inquiries for the admin screen, optionally filtered by status
async fn list_inquiries(
    State(state): State<AppState>,
    Query(query): Query<InquiryListQuery>,
) -> impl IntoResponse {
    info!("GET /api/inquiries - query: {:?}", query);

    match state.inquiry_service.list(query.status).await {
        Ok(inquiries) => {
            let response = InquiryListResponse { inquiries };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list inquiries: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing inquiries").into_response()
        }
    }
}

/// Update the workflow status of one inquiry
async fn update_inquiry_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateInquiryStatusRequest>,
) -> impl IntoResponse {
    info!("PUT /api/inquiries/{}/status - status: {:?}", id, request.status);

    match state
        .inquiry_service
        .update_status(&id, request.status)
        .await
    {
        Ok(Some(updated)) => {
            let response = UpdateInquiryStatusResponse {
                success_message: format!("Inquiry status updated to {}", updated.status.as_str()),
                inquiry: updated,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => {
            warn!("Inquiry not found for status update: {}", id);
            (StatusCode::NOT_FOUND, "Inquiry not found").into_response()
        }
        Err(e) => {
            error!("Failed to update inquiry status: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating inquiry status").into_response()
        }
    }
}
