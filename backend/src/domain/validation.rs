//! # Intake Validation
//!
//! Per-step validators for the purchase request wizard. Every rule reports
//! through [`ValidationErrors`], keyed by the serialized field name, so
//! violations travel back to the form as data rather than errors.
//!
//! Required-ness is checked before format, and length caps count characters
//! rather than bytes because most input is Japanese text.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use shared::{DraftRequest, ValidationErrors, WizardStep};

use crate::domain::dates::{self, MAX_LEAD_DAYS, MIN_LEAD_DAYS};

// [0-9] rather than \d: the upstream forms accept ASCII digits only, while
// the regex crate's \d would also match full-width digits.
static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{4}$").unwrap());
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2,4}-[0-9]{2,4}-[0-9]{4}$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
// \s is Unicode-aware and so also covers the ideographic space.
static KATAKANA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ァ-ヶー\s]+$").unwrap());

const ADDRESS_FIELD_MAX_CHARS: usize = 50;
const ITEM_NAME_MAX_CHARS: usize = 50;
const NAME_MAX_CHARS: usize = 30;
const QUANTITY_MIN: u32 = 1;
const QUANTITY_MAX: u32 = 99;

/// Validate one wizard step against the draft. Pure given the draft and
/// `today`; an empty map means the step passes.
pub fn validate_step(draft: &DraftRequest, step: WizardStep, today: NaiveDate) -> ValidationErrors {
    match step {
        WizardStep::Address => validate_address(draft),
        WizardStep::Items => validate_items(draft),
        WizardStep::Schedule => validate_schedule(draft, today),
        WizardStep::Customer => validate_customer(draft),
    }
}

/// Step 1: pickup address.
pub fn validate_address(draft: &DraftRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let postal_code = draft.postal_code.trim();
    if postal_code.is_empty() {
        errors.add("postalCode", "Postal code is required");
    } else if !POSTAL_CODE_RE.is_match(postal_code) {
        errors.add("postalCode", "Enter a valid postal code (e.g. 123-4567)");
    }

    if draft.prefecture.is_none() {
        errors.add("prefecture", "Prefecture is required");
    }

    let city = draft.city.trim();
    if city.is_empty() {
        errors.add("city", "City is required");
    } else if city.chars().count() > ADDRESS_FIELD_MAX_CHARS {
        errors.add("city", "City must be 50 characters or fewer");
    }

    let street_number = draft.street_number.trim();
    if street_number.is_empty() {
        errors.add("streetNumber", "Street number is required");
    } else if street_number.chars().count() > ADDRESS_FIELD_MAX_CHARS {
        errors.add("streetNumber", "Street number must be 50 characters or fewer");
    }

    let building = draft.building.trim();
    match draft.housing_type {
        None => {
            errors.add("housingType", "Housing type is required");
        }
        Some(housing_type) => {
            if housing_type.requires_building() && building.is_empty() {
                errors.add(
                    "building",
                    "Building name and room number are required for apartment housing",
                );
            }
        }
    }
    // The cap applies whenever something was entered, whatever the housing type.
    if building.chars().count() > ADDRESS_FIELD_MAX_CHARS {
        errors.add("building", "Building name must be 50 characters or fewer");
    }

    errors
}

/// Step 2: items offered for buyback. Fields are keyed per item index so a
/// bad third item never blames the first.
pub fn validate_items(draft: &DraftRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.items.is_empty() {
        errors.add("itemList", "Add at least one item");
        return errors;
    }

    for (index, item) in draft.items.iter().enumerate() {
        let item_name = item.item_name.trim();
        if item_name.is_empty() {
            errors.add(format!("item_{}_itemName", index), "Item name is required");
        } else if item_name.chars().count() > ITEM_NAME_MAX_CHARS {
            errors.add(
                format!("item_{}_itemName", index),
                "Item name must be 50 characters or fewer",
            );
        }

        if item.category.is_none() {
            errors.add(format!("item_{}_category", index), "Category is required");
        }

        if item.quantity < QUANTITY_MIN || item.quantity > QUANTITY_MAX {
            errors.add(
                format!("item_{}_quantity", index),
                "Quantity must be between 1 and 99",
            );
        }

        if item.years_since_purchase.is_none() {
            errors.add(
                format!("item_{}_yearsSincePurchase", index),
                "Years since purchase is required",
            );
        }

        if item.size.is_none() {
            errors.add(format!("item_{}_size", index), "Size is required");
        }
    }

    errors
}

/// Step 3: preferred pickup slots. The offerable window is
/// [today + 7, today + 30], compared date-only, and a half-filled slot is an
/// error rather than something to drop silently.
pub fn validate_schedule(draft: &DraftRequest, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let (earliest, latest) = dates::scheduling_window(today);

    if !draft.preferred_slots.iter().any(|slot| slot.is_complete()) {
        errors.add("preferredDate", "Select at least one preferred date and time");
    }

    for (index, slot) in draft.preferred_slots.iter().enumerate() {
        let n = index + 1;
        match (slot.date_value(), slot.time_band) {
            (Some(raw), band) => {
                match dates::parse_date(raw) {
                    Ok(date) if date < earliest => {
                        errors.add(
                            format!("preferredDate{}", n),
                            format!("Preferred date must be at least {} days from today", MIN_LEAD_DAYS),
                        );
                    }
                    Ok(date) if date > latest => {
                        errors.add(
                            format!("preferredDate{}", n),
                            format!("Preferred date must be within {} days from today", MAX_LEAD_DAYS),
                        );
                    }
                    Ok(_) => {}
                    Err(_) => {
                        errors.add(format!("preferredDate{}", n), "Enter a valid date (YYYY-MM-DD)");
                    }
                }
                if band.is_none() {
                    errors.add(format!("preferredTime{}", n), "Select a time band for this date");
                }
            }
            (None, Some(_)) => {
                errors.add(format!("preferredDate{}", n), "Select a date for this time band");
            }
            (None, None) => {}
        }
    }

    errors
}

/// Step 4: customer details. The privacy agreement is the only boolean gate
/// and blocks submission unconditionally when unchecked.
pub fn validate_customer(draft: &DraftRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let name = draft.customer_name.trim();
    if name.is_empty() {
        errors.add("customerName", "Name is required");
    } else if name.chars().count() > NAME_MAX_CHARS {
        errors.add("customerName", "Name must be 30 characters or fewer");
    }

    let kana = draft.customer_name_kana.trim();
    if kana.is_empty() {
        errors.add("customerNameKana", "Name reading is required");
    } else if kana.chars().count() > NAME_MAX_CHARS {
        errors.add("customerNameKana", "Name reading must be 30 characters or fewer");
    } else if !KATAKANA_RE.is_match(kana) {
        errors.add("customerNameKana", "Enter the name reading in katakana");
    }

    let email = draft.customer_email.trim();
    if email.is_empty() {
        errors.add("customerEmail", "Email address is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.add("customerEmail", "Enter a valid email address");
    }

    let phone = draft.customer_phone.trim();
    if phone.is_empty() {
        errors.add("customerPhone", "Phone number is required");
    } else if !PHONE_RE.is_match(phone) {
        errors.add("customerPhone", "Enter a valid phone number (e.g. 090-1234-5678)");
    }

    if !draft.privacy_policy_agreed {
        errors.add("privacyPolicyAgreed", "You must agree to the privacy policy");
    }

    errors
}

/// RFC-like shape check shared with the inquiry form.
pub(crate) fn email_is_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
