//! # Domain Module
//!
//! Contains all business logic for the buyback desk backend.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how purchase requests are taken in, how the availability
//! calendar is maintained, and how the back office works through submitted
//! records. It operates independently of the REST layer and the storage
//! mechanism.
//!
//! ## Module Organization
//!
//! - **intake**: The four-step purchase request wizard and its submission path
//! - **validation**: Per-step field validators shared by the wizard and the REST surface
//! - **business_calendar**: Availability calendar management, bulk generation, month grid
//! - **inquiry_service**: Contact inquiry intake and triage
//! - **request_admin**: Request triage, status transitions, and CSV export
//! - **dates**: The shared date policy (parsing, windows, JST clock)
//!
//! ## Key Responsibilities
//!
//! - **Intake**: Walking a draft through every wizard step before anything persists
//! - **Validation**: One ordered field-key to message map per step, computed per step
//! - **Scheduling Policy**: The single [today+7, today+30] pickup window everywhere
//! - **Calendar Management**: Full-overwrite upserts keyed by date, bulk plan and commit
//! - **Triage**: Status workflows for requests and inquiries, counts for the dashboard
//!
//! ## Business Rules
//!
//! - Drafts advance one step at a time and never skip validation
//! - A submission that fails to persist keeps the draft intact for retry
//! - Calendar records are overwritten whole; absent fields clear, never merge
//! - Bulk commits settle every date and report aggregate counts only
//! - Requests are cancelled by status, never deleted

pub mod business_calendar;
pub mod dates;
pub mod inquiry_service;
pub mod intake;
pub mod request_admin;
pub mod validation;

pub use business_calendar::*;
pub use inquiry_service::*;
pub use intake::*;
pub use request_admin::*;
