//! # IO Module
//!
//! Provides the interface layer between the user interface and the domain logic.
//!
//! This module serves as the adapter layer that translates UI requests into domain
//! operations and formats domain responses for UI consumption. It handles the
//! communication protocol (REST API), serialization/deserialization, and maintains
//! the boundary between the presentation layer and business logic.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: Exposing REST API endpoints for the public site and admin screens
//! - **Request/Response Handling**: Processing HTTP requests and formatting responses
//! - **Data Serialization**: Converting between JSON and domain objects
//! - **Error Translation**: Converting domain errors to appropriate HTTP status codes
//! - **CORS Management**: Handling cross-origin requests for web frontends
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum for high-performance async HTTP handling
//! - **Serialization**: Serde for JSON serialization/deserialization
//! - **State Management**: Axum extractors for dependency injection
//! - **Error Handling**: Structured error responses with appropriate HTTP codes
//!
//! ## Supported Operations
//!
//! - **/api/requests**: Purchase request intake, triage and CSV export
//! - **/api/calendar**: Business date records, month grid and bulk generation
//! - **/api/inquiries**: Contact inquiry intake and triage

pub mod rest;

pub use rest::*;
