//! # Buyback Desk Backend
//!
//! Contains all non-UI logic for the buyback desk application.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Domain**: Business logic and rules for request intake, the business
//!   calendar and contact inquiries
//! - **Storage**: Data persistence mechanisms (CSV files)
//! - **IO**: Interface layer that exposes functionality to the UI
//!
//! The backend is designed to be UI-agnostic, meaning it could theoretically
//! support different frontend frameworks or even CLI interfaces without modification.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (public site, admin screens)
//!     |
//! IO Layer (REST API, handlers)
//!     |
//! Domain Layer (Business logic, services)
//!     |
//! Storage Layer (CSV files, persistence)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state
//! - Set up the REST API router with proper CORS configuration
//! - Coordinate between domain logic and data persistence
//! - Provide a clean separation of concerns for maintainability

pub mod storage;
pub mod domain;
pub mod io;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{
    BusinessCalendarService, InquiryService, IntakeService, RequestAdminService,
};
use crate::storage::{Connection, CsvConnection};

pub use storage::*;
pub use domain::*;
pub use io::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub intake_service: IntakeService,
    pub calendar_service: BusinessCalendarService,
    pub inquiry_service: InquiryService,
    pub request_admin_service: RequestAdminService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up CSV storage");
    let csv_conn = CsvConnection::new_default()?;

    info!("Setting up domain model");
    let request_store = Arc::new(csv_conn.create_service_request_repository());
    let intake_service = IntakeService::new(request_store.clone());
    let request_admin_service = RequestAdminService::new(request_store);
    let calendar_service =
        BusinessCalendarService::new(Arc::new(csv_conn.create_business_date_repository()));
    let inquiry_service = InquiryService::new(Arc::new(csv_conn.create_inquiry_repository()));

    info!("Setting up application state");
    let app_state = AppState {
        intake_service,
        calendar_service,
        inquiry_service,
        request_admin_service,
    };

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .nest("/requests", io::rest::request_apis::router())
        .nest("/calendar", io::rest::calendar_apis::router())
        .nest("/inquiries", io::rest::inquiry_apis::router());

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
