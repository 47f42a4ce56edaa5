//! In-memory storage fakes for service-level tests.
//!
//! Each fake shares its record list across clones, so a test can hold one
//! handle for assertions while the service under test holds another. Write
//! failures can be injected to exercise the error paths a real CSV file
//! rarely produces on demand.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{BusinessDate, ContactInquiry, ServiceRequest};
use std::sync::{Arc, Mutex};

use super::{BusinessDateStorage, InquiryStorage, ServiceRequestStorage};

/// In-memory business date store with per-date failure injection.
#[derive(Clone, Default)]
pub struct MemoryBusinessDates {
    records: Arc<Mutex<Vec<BusinessDate>>>,
    failing_dates: Arc<Mutex<Vec<String>>>,
}

impl MemoryBusinessDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write touching this date fail.
    pub fn fail_on(&self, date: &str) {
        self.failing_dates.lock().unwrap().push(date.to_string());
    }

    pub fn records(&self) -> Vec<BusinessDate> {
        self.records.lock().unwrap().clone()
    }

    fn check_injected_failure(&self, date: &str) -> Result<()> {
        if self.failing_dates.lock().unwrap().iter().any(|d| d == date) {
            return Err(anyhow!("Injected write failure for {}", date));
        }
        Ok(())
    }
}

#[async_trait]
impl BusinessDateStorage for MemoryBusinessDates {
    async fn list_business_dates(&self) -> Result<Vec<BusinessDate>> {
        Ok(self.records())
    }

    async fn get_business_date(&self, date: &str) -> Result<Option<BusinessDate>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.date == date)
            .cloned())
    }

    async fn create_business_date(&self, record: &BusinessDate) -> Result<()> {
        self.check_injected_failure(&record.date)?;

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.date == record.date) {
            return Err(anyhow!("Business date already exists: {}", record.date));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn update_business_date(&self, record: &BusinessDate) -> Result<()> {
        self.check_injected_failure(&record.date)?;

        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.date == record.date) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(anyhow!("Business date not found: {}", record.date)),
        }
    }

    async fn delete_business_date(&self, date: &str) -> Result<bool> {
        let mut records = self.records.lock().unwrap();
        let initial_len = records.len();
        records.retain(|r| r.date != date);
        Ok(records.len() < initial_len)
    }
}

/// In-memory service request store with an all-writes failure switch.
#[derive(Clone, Default)]
pub struct MemoryRequests {
    records: Arc<Mutex<Vec<ServiceRequest>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    pub fn records(&self) -> Vec<ServiceRequest> {
        self.records.lock().unwrap().clone()
    }

    fn check_write_failure(&self) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(anyhow!("Injected write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceRequestStorage for MemoryRequests {
    async fn list_requests(&self) -> Result<Vec<ServiceRequest>> {
        Ok(self.records())
    }

    async fn get_request(&self, id: &str) -> Result<Option<ServiceRequest>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn store_request(&self, request: &ServiceRequest) -> Result<()> {
        self.check_write_failure()?;

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.id == request.id) {
            return Err(anyhow!("Service request already exists: {}", request.id));
        }
        records.push(request.clone());
        Ok(())
    }

    async fn update_request(&self, request: &ServiceRequest) -> Result<()> {
        self.check_write_failure()?;

        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == request.id) {
            Some(existing) => {
                *existing = request.clone();
                Ok(())
            }
            None => Err(anyhow!("Service request not found: {}", request.id)),
        }
    }
}

/// In-memory contact inquiry store with an all-writes failure switch.
#[derive(Clone, Default)]
pub struct MemoryInquiries {
    records: Arc<Mutex<Vec<ContactInquiry>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryInquiries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    pub fn records(&self) -> Vec<ContactInquiry> {
        self.records.lock().unwrap().clone()
    }

    fn check_write_failure(&self) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(anyhow!("Injected write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl InquiryStorage for MemoryInquiries {
    async fn list_inquiries(&self) -> Result<Vec<ContactInquiry>> {
        Ok(self.records())
    }

    async fn get_inquiry(&self, id: &str) -> Result<Option<ContactInquiry>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn store_inquiry(&self, inquiry: &ContactInquiry) -> Result<()> {
        self.check_write_failure()?;

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|i| i.id == inquiry.id) {
            return Err(anyhow!("Inquiry already exists: {}", inquiry.id));
        }
        records.push(inquiry.clone());
        Ok(())
    }

    async fn update_inquiry(&self, inquiry: &ContactInquiry) -> Result<()> {
        self.check_write_failure()?;

        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|i| i.id == inquiry.id) {
            Some(existing) => {
                *existing = inquiry.clone();
                Ok(())
            }
            None => Err(anyhow!("Inquiry not found: {}", inquiry.id)),
        }
    }
}
