//! # Request Administration
//!
//! Back-office triage over submitted purchase requests: status tallies for
//! the dashboard badges, status transitions, and a CSV download of the
//! whole book. Requests are cancelled by status, never deleted.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;

use shared::{
    DecodedItems, RequestExportResponse, RequestListResponse, RequestStatus, RequestStatusCounts,
    ServiceRequest, TimeBand,
};

use super::dates;
use crate::storage::ServiceRequestStorage;

const EXPORT_HEADER: [&str; 16] = [
    "id",
    "status",
    "customer_name",
    "customer_name_kana",
    "email",
    "phone",
    "postal_code",
    "prefecture",
    "city",
    "street_number",
    "building",
    "preferred_slot_1",
    "preferred_slot_2",
    "preferred_slot_3",
    "items",
    "created_at",
];

/// Service for administering submitted purchase requests
#[derive(Clone)]
pub struct RequestAdminService {
    store: Arc<dyn ServiceRequestStorage>,
}

impl RequestAdminService {
    /// Create a new RequestAdminService
    pub fn new(store: Arc<dyn ServiceRequestStorage>) -> Self {
        Self { store }
    }

    /// List requests newest first, optionally filtered by status. The
    /// per-status tallies always cover the unfiltered set, so the tab
    /// badges stay stable while filtering.
    pub async fn list(&self, status_filter: Option<RequestStatus>) -> Result<RequestListResponse> {
        info!("Listing service requests: status_filter={:?}", status_filter);

        let mut requests = self.store.list_requests().await?;

        let status_counts = count_statuses(&requests);

        if let Some(status) = status_filter {
            requests.retain(|r| r.status == status);
        }

        // Newest first; the id carries the creation timestamp
        requests.sort_by_key(|r| std::cmp::Reverse(r.extract_timestamp().unwrap_or(0)));

        info!("Found {} requests", requests.len());

        Ok(RequestListResponse {
            requests,
            status_counts,
        })
    }

    /// Move a request to a new status, restamping `updated_at`.
    /// Returns `Ok(None)` when the id is unknown; storage failures are errors.
    pub async fn update_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<Option<ServiceRequest>> {
        info!("Updating request {} to status {}", id, status.as_str());

        let mut request = match self.store.get_request(id).await? {
            Some(request) => request,
            None => {
                warn!("Service request not found: {}", id);
                return Ok(None);
            }
        };

        request.status = status;
        request.updated_at = dates::now_jst().to_rfc3339();

        self.store.update_request(&request).await?;

        info!("Updated request: {}", request.id);

        Ok(Some(request))
    }

    /// Render every request into a CSV download, newest first.
    pub async fn export_csv(&self, today: NaiveDate) -> Result<RequestExportResponse> {
        info!("Exporting service requests to CSV");

        let mut requests = self.store.list_requests().await?;
        requests.sort_by_key(|r| std::cmp::Reverse(r.extract_timestamp().unwrap_or(0)));

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&EXPORT_HEADER)?;

        for request in &requests {
            writer.write_record(&[
                request.id.clone(),
                request.status.as_str().to_string(),
                request.customer_name.clone(),
                request.customer_name_kana.clone(),
                request.customer_email.clone(),
                request.customer_phone.clone(),
                request.postal_code.clone(),
                request
                    .prefecture
                    .map(|p| p.label().to_string())
                    .unwrap_or_default(),
                request.city.clone(),
                request.street_number.clone(),
                request.building.clone(),
                render_slot(&request.preferred_date_1, &request.preferred_time_1),
                render_slot(&request.preferred_date_2, &request.preferred_time_2),
                render_slot(&request.preferred_date_3, &request.preferred_time_3),
                render_items(request),
                request.created_at.clone(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Finalizing CSV export failed: {}", e))?;
        let csv_content = String::from_utf8(bytes)?;

        let export = RequestExportResponse {
            csv_content,
            filename: format!("purchase_requests_{}.csv", dates::format_date(today)),
            request_count: requests.len(),
        };

        info!("Exported {} requests to {}", export.request_count, export.filename);

        Ok(export)
    }
}

/// Tally every stored request by status.
fn count_statuses(requests: &[ServiceRequest]) -> RequestStatusCounts {
    let mut counts = RequestStatusCounts {
        total: requests.len(),
        ..Default::default()
    };

    for request in requests {
        match request.status {
            RequestStatus::New => counts.new += 1,
            RequestStatus::Pending => counts.pending += 1,
            RequestStatus::InProgress => counts.in_progress += 1,
            RequestStatus::Completed => counts.completed += 1,
            RequestStatus::Cancelled => counts.cancelled += 1,
        }
    }

    counts
}

/// One preferred slot as "YYYY-MM-DD HH:MM-HH:MM". A date stored without a
/// band renders alone; an empty slot renders empty.
fn render_slot(date: &Option<String>, band: &Option<TimeBand>) -> String {
    match (date, band) {
        (Some(date), Some(band)) => format!("{} {}", date, band.as_range()),
        (Some(date), None) => date.clone(),
        _ => String::new(),
    }
}

/// The item list as a short human summary, e.g. "Refrigerator x1; Sofa x2".
fn render_items(request: &ServiceRequest) -> String {
    match request.decode_items() {
        DecodedItems::Items(items) => items
            .iter()
            .map(|item| format!("{} x{}", item.item_name, item.quantity))
            .collect::<Vec<_>>()
            .join("; "),
        DecodedItems::Unparseable => {
            warn!("Request {} has an unparseable item list", request.id);
            String::new()
        }
    }
}
