//! # Storage Traits
//!
//! Storage abstraction for the domain layer. Services talk to these traits
//! only, so the CSV backing store can be swapped (or faked in tests)
//! without touching business logic.

use anyhow::Result;
use async_trait::async_trait;
use shared::{BusinessDate, ContactInquiry, ServiceRequest};

/// Interface for business calendar persistence.
///
/// The calendar is keyed by date: at most one record per YYYY-MM-DD string.
#[async_trait]
pub trait BusinessDateStorage: Send + Sync {
    /// List every stored business date, in storage order.
    async fn list_business_dates(&self) -> Result<Vec<BusinessDate>>;

    /// Look up the record for one date, if any.
    async fn get_business_date(&self, date: &str) -> Result<Option<BusinessDate>>;

    /// Store a record for a date that has none.
    async fn create_business_date(&self, record: &BusinessDate) -> Result<()>;

    /// Replace the record for a date that already has one.
    async fn update_business_date(&self, record: &BusinessDate) -> Result<()>;

    /// Remove the record for a date.
    /// Returns true if a record was found and deleted, false otherwise.
    async fn delete_business_date(&self, date: &str) -> Result<bool>;
}

/// Interface for service request persistence.
///
/// There is no delete: requests leave the workflow by being cancelled, so
/// the record trail stays intact.
#[async_trait]
pub trait ServiceRequestStorage: Send + Sync {
    /// List every stored request, in storage order.
    async fn list_requests(&self) -> Result<Vec<ServiceRequest>>;

    /// Look up a request by ID.
    async fn get_request(&self, id: &str) -> Result<Option<ServiceRequest>>;

    /// Store a new request.
    async fn store_request(&self, request: &ServiceRequest) -> Result<()>;

    /// Update an existing request.
    async fn update_request(&self, request: &ServiceRequest) -> Result<()>;
}

/// Interface for contact inquiry persistence.
#[async_trait]
pub trait InquiryStorage: Send + Sync {
    /// List every stored inquiry, in storage order.
    async fn list_inquiries(&self) -> Result<Vec<ContactInquiry>>;

    /// Look up an inquiry by ID.
    async fn get_inquiry(&self, id: &str) -> Result<Option<ContactInquiry>>;

    /// Store a new inquiry.
    async fn store_inquiry(&self, inquiry: &ContactInquiry) -> Result<()>;

    /// Update an existing inquiry.
    async fn update_inquiry(&self, inquiry: &ContactInquiry) -> Result<()>;
}

/// Factory trait tying a storage backend to the repositories it produces.
pub trait Connection: Send + Sync + Clone {
    /// The type of BusinessDateStorage this connection creates
    type BusinessDateRepository: BusinessDateStorage;

    /// The type of ServiceRequestStorage this connection creates
    type ServiceRequestRepository: ServiceRequestStorage;

    /// The type of InquiryStorage this connection creates
    type InquiryRepository: InquiryStorage;

    /// Create a new business date repository for this connection
    fn create_business_date_repository(&self) -> Self::BusinessDateRepository;

    /// Create a new service request repository for this connection
    fn create_service_request_repository(&self) -> Self::ServiceRequestRepository;

    /// Create a new inquiry repository for this connection
    fn create_inquiry_repository(&self) -> Self::InquiryRepository;
}
