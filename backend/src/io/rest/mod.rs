//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the buyback desk application.
//! This layer handles:
//! - HTTP request/response serialization and deserialization
//! - Error translation from domain to HTTP status codes
//! - CORS configuration for frontend integration
//! - Request logging
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: RESTful HTTP interfaces for intake, calendar and inquiry operations
//! - **Error Handling**: Converting domain errors to proper HTTP responses
//! - **Serialization**: JSON request/response handling
//! - **Logging**: Request logging for debugging and monitoring
//!
//! ## Design Principles
//!
//! - **REST Compliance**: Following RESTful design patterns
//! - **Validation As Data**: Field violations travel in 200/400 bodies, never as 500s
//! - **Domain Separation**: Pure translation layer without business logic

// Module declarations
pub mod calendar_apis;
pub mod inquiry_apis;
pub mod request_apis;
