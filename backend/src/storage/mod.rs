//! # Storage Module
//!
//! Handles all data persistence operations for the buyback desk backend.
//!
//! This module abstracts away the specific storage implementation details and provides
//! a consistent interface for persisting and retrieving data. The implementation can
//! be swapped out (CSV files, SQLite, cloud storage, etc.) without affecting the
//! domain logic or REST layer.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving purchase requests, business dates, and inquiries to disk
//! - **Data Retrieval**: Loading stored records back into memory
//! - **Storage Abstraction**: Providing a consistent API regardless of storage backend
//! - **Atomic Writes**: Rewriting files through a temp-and-rename so readers never see a partial file
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: One CSV file per record type under a data directory
//! - **Human Readable**: Files open directly in a spreadsheet for manual inspection
//! - **Testability**: Repositories point at any directory, so tests run against temp dirs
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Interface Segregation**: Focused traits for each record type
//! - **Dependency Inversion**: Domain services depend on the traits, not the CSV types

pub mod csv;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

// Re-export the main types that other modules need
pub use csv::{
    BusinessDateRepository, CsvConnection, InquiryRepository, ServiceRequestRepository,
};
pub use traits::{
    BusinessDateStorage, Connection, InquiryStorage, ServiceRequestStorage,
};
