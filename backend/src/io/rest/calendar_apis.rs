use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use log::{error, info, warn};
use serde::Deserialize;

use crate::domain::dates::{self, CalendarError};
use crate::AppState;
use shared::{
    BulkCommitRequest, BulkPlanRequest, BusinessDateListResponse, DeleteBusinessDateResponse,
    FilterPeriod, UpsertBusinessDateRequest, UpsertBusinessDateResponse,
};

// Query parameters for the business date list API
#[derive(Debug, Deserialize)]
pub struct CalendarListQuery {
    pub period: Option<FilterPeriod>,
}

// Query parameters for the month grid API
#[derive(Debug, Deserialize)]
pub struct MonthGridQuery {
    pub year: i32,
    pub month: u32,
}

/// Create a router for business calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_business_dates).post(upsert_business_date))
        .route("/grid", get(get_month_grid))
        .route("/bulk/plan", post(plan_bulk_generation))
        .route("/bulk/commit", post(commit_bulk_generation))
        .route("/:date", delete(delete_business_date))
}

/// List business date records, optionally restricted to an upcoming window
async fn list_business_dates(
    State(state): State<AppState>,
    Query(query): Query<CalendarListQuery>,
) -> impl IntoResponse {
    info!("GET /api/calendar - query: {:?}", query);

    let period = query.period.unwrap_or(FilterPeriod::All);

    match state
        .calendar_service
        .list_filtered(period, dates::today_jst())
        .await
    {
        Ok(records) => {
            let response = BusinessDateListResponse { dates: records };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list business dates: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing business dates").into_response()
        }
    }
}

/// Project one month onto the fixed 42-cell grid
async fn get_month_grid(
    State(state): State<AppState>,
    Query(query): Query<MonthGridQuery>,
) -> impl IntoResponse {
    info!("GET /api/calendar/grid - query: {:?}", query);

    match state
        .calendar_service
        .month_grid(query.year, query.month, dates::today_jst())
        .await
    {
        Ok(grid) => (StatusCode::OK, Json(grid)).into_response(),
        Err(e) => {
            if let Some(calendar_error) = e.downcast_ref::<CalendarError>() {
                warn!("Rejected month grid request: {}", calendar_error);
                return (StatusCode::BAD_REQUEST, calendar_error.to_string()).into_response();
            }
            error!("Failed to build month grid: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error building month grid").into_response()
        }
    }
}

/// Create or fully overwrite one business date record
async fn upsert_business_date(
    State(state): State<AppState>,
    Json(request): Json<UpsertBusinessDateRequest>,
) -> impl IntoResponse {
    info!("POST /api/calendar - date: {}", request.date);

    match state.calendar_service.upsert(request).await {
        Ok(business_date) => {
            let response = UpsertBusinessDateResponse {
                success_message: format!("Business date {} saved", business_date.date),
                business_date,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            if let Some(calendar_error) = e.downcast_ref::<CalendarError>() {
                warn!("Rejected business date upsert: {}", calendar_error);
                return (StatusCode::BAD_REQUEST, calendar_error.to_string()).into_response();
            }
            error!("Failed to save business date: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error saving business date").into_response()
        }
    }
}

/// Delete one business date record; deleting an absent date is not an error
async fn delete_business_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/calendar/{}", date);

    match state.calendar_service.delete(&date).await {
        Ok(deleted) => {
            let success_message = if deleted {
                format!("Business date {} deleted", date)
            } else {
                format!("No business date record for {}", date)
            };
            let response = DeleteBusinessDateResponse {
                deleted,
                success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to delete business date: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting business date").into_response()
        }
    }
}

/// Preview a bulk generation over a closed date range
async fn plan_bulk_generation(
    State(state): State<AppState>,
    Json(request): Json<BulkPlanRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/calendar/bulk/plan - range: {} to {}",
        request.start_date, request.end_date
    );

    match state
        .calendar_service
        .plan_bulk(&request.start_date, &request.end_date)
    {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => {
            warn!("Rejected bulk generation plan: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Apply a template to every selected date, independently per date
async fn commit_bulk_generation(
    State(state): State<AppState>,
    Json(request): Json<BulkCommitRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/calendar/bulk/commit - {} dates",
        request.dates.len()
    );

    let outcome = state
        .calendar_service
        .commit_bulk(&request.dates, &request.template)
        .await;

    (StatusCode::OK, Json(outcome)).into_response()
}
