//! # Contact Inquiries
//!
//! Customer questions filed outside the purchase flow. Inquiries carry
//! their own status workflow and never touch the request pipeline.

use anyhow::{anyhow, Result};
use log::{info, warn};
use std::sync::Arc;

use shared::{
    ContactInquiry, InquiryStatus, SubmitInquiryRequest, ValidationErrors,
};

use super::{dates, validation};
use crate::storage::InquiryStorage;

/// What became of an inquiry submission. Validation failures are an
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum InquiryOutcome {
    Accepted(ContactInquiry),
    Rejected(ValidationErrors),
}

/// Service for managing contact inquiries
#[derive(Clone)]
pub struct InquiryService {
    store: Arc<dyn InquiryStorage>,
}

impl InquiryService {
    /// Create a new InquiryService
    pub fn new(store: Arc<dyn InquiryStorage>) -> Self {
        Self { store }
    }

    /// Validate and file a new inquiry. Name, email, subject, and message
    /// are required; phone is optional and never validated.
    pub async fn submit(&self, request: SubmitInquiryRequest) -> Result<InquiryOutcome> {
        info!("Submitting contact inquiry");

        let errors = validate_inquiry(&request);
        if !errors.is_empty() {
            warn!("Inquiry rejected with {} validation errors", errors.len());
            return Ok(InquiryOutcome::Rejected(errors));
        }

        let now = dates::now_jst();
        let timestamp_millis = now.timestamp_millis() as u64;
        let timestamp_rfc3339 = now.to_rfc3339();

        let inquiry = ContactInquiry {
            id: ContactInquiry::generate_id(timestamp_millis),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            subject: request
                .subject
                .ok_or_else(|| anyhow!("Inquiry subject missing after validation"))?,
            message: request.message.trim().to_string(),
            status: InquiryStatus::New,
            created_at: timestamp_rfc3339.clone(),
            updated_at: timestamp_rfc3339,
        };

        self.store.store_inquiry(&inquiry).await?;

        info!("Accepted contact inquiry: {}", inquiry.id);

        Ok(InquiryOutcome::Accepted(inquiry))
    }

    /// List inquiries newest first, optionally filtered by status.
    pub async fn list(&self, status_filter: Option<InquiryStatus>) -> Result<Vec<ContactInquiry>> {
        info!("Listing inquiries: status_filter={:?}", status_filter);

        let mut inquiries = self.store.list_inquiries().await?;

        if let Some(status) = status_filter {
            inquiries.retain(|i| i.status == status);
        }

        // Newest first; the id carries the creation timestamp
        inquiries.sort_by_key(|i| std::cmp::Reverse(i.extract_timestamp().unwrap_or(0)));

        info!("Found {} inquiries", inquiries.len());

        Ok(inquiries)
    }

    /// Move an inquiry to a new status, restamping `updated_at`.
    /// Returns `Ok(None)` when the id is unknown; storage failures are errors.
    pub async fn update_status(
        &self,
        id: &str,
        status: InquiryStatus,
    ) -> Result<Option<ContactInquiry>> {
        info!("Updating inquiry {} to status {}", id, status.as_str());

        let mut inquiry = match self.store.get_inquiry(id).await? {
            Some(inquiry) => inquiry,
            None => {
                warn!("Inquiry not found: {}", id);
                return Ok(None);
            }
        };

        inquiry.status = status;
        inquiry.updated_at = dates::now_jst().to_rfc3339();

        self.store.update_inquiry(&inquiry).await?;

        info!("Updated inquiry: {}", inquiry.id);

        Ok(Some(inquiry))
    }
}

fn validate_inquiry(request: &SubmitInquiryRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if request.name.trim().is_empty() {
        errors.add("name", "Name is required");
    }

    let email = request.email.trim();
    if email.is_empty() {
        errors.add("email", "Email address is required");
    } else if !validation::email_is_valid(email) {
        errors.add("email", "Enter a valid email address");
    }

    if request.subject.is_none() {
        errors.add("subject", "Select a subject");
    }

    if request.message.trim().is_empty() {
        errors.add("message", "Message is required");
    }

    errors
}
