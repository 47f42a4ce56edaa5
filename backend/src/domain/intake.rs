//! # Intake Wizard
//!
//! The four-step purchase request intake flow: address, items, schedule,
//! customer details. The wizard owns one draft and the step the customer is
//! on; every forward move is gated by that step's validator, and submission
//! turns the draft into a stored [`ServiceRequest`].

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;

use shared::{
    AvailableDatesResponse, DraftRequest, ItemDraft, PreferredSlot, RequestCategory, RequestItem,
    RequestStatus, ServiceRequest, ValidateStepResponse, ValidationErrors, WizardStep,
};

use super::{dates, validation};
use crate::storage::ServiceRequestStorage;

/// What became of a submission attempt. Validation failures are an outcome,
/// not an error; only storage trouble surfaces as `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The draft passed final validation and was persisted.
    Accepted(ServiceRequest),
    /// The draft failed validation; nothing was written.
    Rejected(ValidationErrors),
}

/// State machine for one customer's intake session. Steps are linear with
/// no skipping; the only exit past `Customer` is a successful submission,
/// which resets the wizard to an empty draft.
#[derive(Debug, Clone)]
pub struct IntakeWizard {
    draft: DraftRequest,
    step: WizardStep,
}

impl IntakeWizard {
    /// A fresh session: empty draft, first step.
    pub fn new() -> Self {
        Self {
            draft: DraftRequest::new(),
            step: WizardStep::Address,
        }
    }

    /// Resume over an already-filled draft, back at the first step.
    pub fn with_draft(draft: DraftRequest) -> Self {
        Self {
            draft,
            step: WizardStep::Address,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &DraftRequest {
        &self.draft
    }

    /// Mutable access for form bindings on the current step.
    pub fn draft_mut(&mut self) -> &mut DraftRequest {
        &mut self.draft
    }

    /// Append an empty item row (quantity 1) and return its index.
    pub fn add_item(&mut self) -> usize {
        self.draft.items.push(ItemDraft::new());
        self.draft.items.len() - 1
    }

    /// Remove an item row. Out-of-range indexes are ignored; an emptied
    /// list is reported by the items-step validation.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.draft.items.len() {
            self.draft.items.remove(index);
        }
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut ItemDraft> {
        self.draft.items.get_mut(index)
    }

    /// Run the current step's validator without moving.
    pub fn validate_step(&self, today: NaiveDate) -> ValidationErrors {
        validation::validate_step(&self.draft, self.step, today)
    }

    /// Validate the current step and move forward on success. `Customer` is
    /// the last step; advancing from it revalidates but stays put, since
    /// submission is the only way out.
    pub fn advance(&mut self, today: NaiveDate) -> Result<WizardStep, ValidationErrors> {
        let errors = self.validate_step(today);
        if !errors.is_empty() {
            return Err(errors);
        }

        self.step = match self.step {
            WizardStep::Address => WizardStep::Items,
            WizardStep::Items => WizardStep::Schedule,
            WizardStep::Schedule => WizardStep::Customer,
            WizardStep::Customer => WizardStep::Customer,
        };

        Ok(self.step)
    }

    /// Move back one step. Never validates, keeps all drafted input,
    /// refuses only at the first step.
    pub fn retreat(&mut self) -> Option<WizardStep> {
        self.step = match self.step {
            WizardStep::Address => return None,
            WizardStep::Items => WizardStep::Address,
            WizardStep::Schedule => WizardStep::Items,
            WizardStep::Customer => WizardStep::Schedule,
        };
        Some(self.step)
    }

    /// Abandon the session: empty draft, back to the first step.
    pub fn reset(&mut self) {
        self.draft = DraftRequest::new();
        self.step = WizardStep::Address;
    }

    /// Submit the draft. Only reachable at `Customer`; re-runs the final
    /// step's validation and persists the assembled request. On success the
    /// wizard resets; on a storage failure the draft and step survive so
    /// the customer can retry.
    pub async fn submit(
        &mut self,
        today: NaiveDate,
        store: &dyn ServiceRequestStorage,
    ) -> Result<SubmitOutcome> {
        if self.step != WizardStep::Customer {
            return Err(anyhow!(
                "Submission is only possible from the customer step"
            ));
        }

        let errors = self.validate_step(today);
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Rejected(errors));
        }

        let request = build_request(&self.draft)?;
        store.store_request(&request).await?;

        self.reset();

        Ok(SubmitOutcome::Accepted(request))
    }
}

impl Default for IntakeWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble the stored record from a validated draft. Fields the validators
/// guarantee are treated as internal errors here, not customer feedback.
fn build_request(draft: &DraftRequest) -> Result<ServiceRequest> {
    let now = dates::now_jst();
    let timestamp_millis = now.timestamp_millis() as u64;
    let timestamp_rfc3339 = now.to_rfc3339();

    let mut items = Vec::with_capacity(draft.items.len());
    for (index, item) in draft.items.iter().enumerate() {
        items.push(RequestItem {
            item_name: item.item_name.trim().to_string(),
            category: item
                .category
                .ok_or_else(|| anyhow!("Item {} has no category after validation", index + 1))?,
            quantity: item.quantity,
            years_since_purchase: item.years_since_purchase.ok_or_else(|| {
                anyhow!("Item {} has no age bucket after validation", index + 1)
            })?,
            size: item
                .size
                .ok_or_else(|| anyhow!("Item {} has no size after validation", index + 1))?,
        });
    }

    // Only fully populated slots are stored; validation has already turned
    // half-filled pairs into errors.
    let stored_slot = |slot: &PreferredSlot| {
        if slot.is_complete() {
            (slot.date_value().map(str::to_string), slot.time_band)
        } else {
            (None, None)
        }
    };
    let (preferred_date_1, preferred_time_1) = stored_slot(&draft.preferred_slots[0]);
    let (preferred_date_2, preferred_time_2) = stored_slot(&draft.preferred_slots[1]);
    let (preferred_date_3, preferred_time_3) = stored_slot(&draft.preferred_slots[2]);

    Ok(ServiceRequest {
        id: ServiceRequest::generate_id(timestamp_millis),
        category: RequestCategory::PurchaseRequest,
        status: RequestStatus::New,
        postal_code: draft.postal_code.trim().to_string(),
        prefecture: draft.prefecture,
        city: draft.city.trim().to_string(),
        street_number: draft.street_number.trim().to_string(),
        housing_type: draft.housing_type,
        building: draft.building.trim().to_string(),
        elevator_available: draft.elevator_available,
        item_list: ServiceRequest::encode_items(&items),
        preferred_date_1,
        preferred_time_1,
        preferred_date_2,
        preferred_time_2,
        preferred_date_3,
        preferred_time_3,
        customer_name: draft.customer_name.trim().to_string(),
        customer_name_kana: draft.customer_name_kana.trim().to_string(),
        customer_email: draft.customer_email.trim().to_string(),
        customer_phone: draft.customer_phone.trim().to_string(),
        reason_for_use: draft.reason_for_use,
        other_notes: draft.other_notes.trim().to_string(),
        privacy_policy_agreed: draft.privacy_policy_agreed,
        created_at: timestamp_rfc3339.clone(),
        updated_at: timestamp_rfc3339,
    })
}

/// REST-facing facade over the wizard. The server keeps no per-session
/// state; each call rebuilds a wizard from the submitted draft.
#[derive(Clone)]
pub struct IntakeService {
    store: Arc<dyn ServiceRequestStorage>,
}

impl IntakeService {
    /// Create a new IntakeService
    pub fn new(store: Arc<dyn ServiceRequestStorage>) -> Self {
        Self { store }
    }

    /// Validate one wizard step of a submitted draft.
    pub fn validate(
        &self,
        draft: &DraftRequest,
        step: WizardStep,
        today: NaiveDate,
    ) -> ValidateStepResponse {
        info!("Validating wizard step: {:?}", step);

        let errors = validation::validate_step(draft, step, today);

        if !errors.is_empty() {
            info!("Step {:?} has {} validation errors", step, errors.len());
        }

        ValidateStepResponse {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The pickup dates the scheduling step may offer, earliest first.
    pub fn available_dates(&self, today: NaiveDate) -> AvailableDatesResponse {
        AvailableDatesResponse {
            dates: dates::available_dates(today),
        }
    }

    /// Run a submitted draft through every step and store it when clean.
    /// The caller sends the draft in one piece, so earlier steps are
    /// enforced here rather than trusted.
    pub async fn submit_draft(
        &self,
        draft: DraftRequest,
        today: NaiveDate,
    ) -> Result<SubmitOutcome> {
        info!("Submitting purchase request draft");

        let mut wizard = IntakeWizard::with_draft(draft);

        while wizard.current_step() != WizardStep::Customer {
            let step = wizard.current_step();
            if let Err(errors) = wizard.advance(today) {
                warn!("Draft rejected at step {:?} with {} errors", step, errors.len());
                return Ok(SubmitOutcome::Rejected(errors));
            }
        }

        let outcome = wizard.submit(today, self.store.as_ref()).await?;

        match &outcome {
            SubmitOutcome::Accepted(request) => {
                info!("Accepted purchase request: {}", request.id);
            }
            SubmitOutcome::Rejected(errors) => {
                warn!("Draft rejected at customer step with {} errors", errors.len());
            }
        }

        Ok(outcome)
    }
}
