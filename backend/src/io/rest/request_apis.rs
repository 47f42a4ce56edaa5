use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use log::{error, info, warn};
use serde::Deserialize;

use crate::domain::{dates, SubmitOutcome};
use crate::AppState;
use shared::{
    RequestStatus, SubmitRequestRequest, SubmitRequestResponse, UpdateRequestStatusRequest,
    UpdateRequestStatusResponse, ValidateStepRequest,
};

// Query parameters for the request list API
#[derive(Debug, Deserialize)]
pub struct RequestListQuery {
    pub status: Option<RequestStatus>,
}

/// Create a router for purchase request related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests).post(submit_request))
        .route("/validate", post(validate_step))
        .route("/available-dates", get(get_available_dates))
        .route("/export", get(export_requests))
        .route("/:id/status", put(update_request_status))
}

/// Validate a single wizard step of an in-progress draft
async fn validate_step(
    State(state): State<AppState>,
    Json(request): Json<ValidateStepRequest>,
) -> impl IntoResponse {
    info!("POST /api/requests/validate - step: {:?}", request.step);

    let response = state
        .intake_service
        .validate(&request.draft, request.step, dates::today_jst());

    (StatusCode::OK, Json(response)).into_response()
}

/// Submit a completed draft as a new purchase request
async fn submit_request(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequestRequest>,
) -> impl IntoResponse {
    info!("POST /api/requests");

    match state
        .intake_service
        .submit_draft(request.draft, dates::today_jst())
        .await
    {
        Ok(SubmitOutcome::Accepted(stored)) => {
            let response = SubmitRequestResponse {
                request: stored,
                success_message: "Purchase request submitted successfully".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Ok(SubmitOutcome::Rejected(errors)) => {
            warn!("Rejected purchase request submission: {} error(s)", errors.len());
            (StatusCode::BAD_REQUEST, Json(errors)).into_response()
        }
        Err(e) => {
            error!("Failed to store purchase request: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error storing purchase request").into_response()
        }
    }
}

/// List stored requests for the admin screen, optionally filtered by status
async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<RequestListQuery>,
) -> impl IntoResponse {
    info!("GET /api/requests - query: {:?}", query);

    match state.request_admin_service.list(query.status).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list purchase requests: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing purchase requests").into_response()
        }
    }
}

/// Update the triage status of one request
async fn update_request_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRequestStatusRequest>,
) -> impl IntoResponse {
    info!("PUT /api/requests/{}/status - status: {:?}", id, request.status);

    match state
        .request_admin_service
        .update_status(&id, request.status)
        .await
    {
        Ok(Some(updated)) => {
            let response = UpdateRequestStatusResponse {
                success_message: format!("Request status updated to {}", updated.status.as_str()),
                request: updated,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => {
            warn!("Request not found for status update: {}", id);
            (StatusCode::NOT_FOUND, "Request not found").into_response()
        }
        Err(e) => {
            error!("Failed to update request status: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating request status").into_response()
        }
    }
}

/// Download every stored request as a CSV attachment
async fn export_requests(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/requests/export");

    match state.request_admin_service.export_csv(dates::today_jst()).await {
        Ok(export) => {
            let headers = [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export.filename),
                ),
            ];
            (StatusCode::OK, headers, export.csv_content).into_response()
        }
        Err(e) => {
            error!("Failed to export purchase requests: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error exporting purchase requests").into_response()
        }
    }
}

/// List the pickup dates the scheduling step may offer
async fn get_available_dates(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/requests/available-dates");

    let response = state.intake_service.available_dates(dates::today_jst());
    (StatusCode::OK, Json(response)).into_response()
}
