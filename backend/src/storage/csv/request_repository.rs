use anyhow::{anyhow, Result};
use async_trait::async_trait;
use csv::{Reader, Writer};
use log::{info, warn};
use shared::{RequestCategory, RequestStatus, ServiceRequest};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use super::{enum_from_cell, enum_to_cell, non_empty};
use crate::storage::ServiceRequestStorage;

const HEADER: [&str; 26] = [
    "id",
    "category",
    "status",
    "postal_code",
    "prefecture",
    "city",
    "street_number",
    "housing_type",
    "building",
    "elevator_available",
    "item_list",
    "preferred_date_1",
    "preferred_time_1",
    "preferred_date_2",
    "preferred_time_2",
    "preferred_date_3",
    "preferred_time_3",
    "customer_name",
    "customer_name_kana",
    "customer_email",
    "customer_phone",
    "reason_for_use",
    "other_notes",
    "privacy_policy_agreed",
    "created_at",
    "updated_at",
];

/// CSV-based service request repository
#[derive(Clone)]
pub struct ServiceRequestRepository {
    connection: CsvConnection,
}

impl ServiceRequestRepository {
    /// Create a new CSV service request repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every service request from the CSV file
    async fn read_requests(&self) -> Result<Vec<ServiceRequest>> {
        let file_path = self.connection.requests_file_path();
        self.connection.ensure_file_exists(&file_path, &HEADER)?;

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut requests = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            let request = ServiceRequest {
                id: record.get(0).unwrap_or("").to_string(),
                category: record
                    .get(1)
                    .and_then(enum_from_cell)
                    .unwrap_or(RequestCategory::PurchaseRequest),
                status: record
                    .get(2)
                    .and_then(enum_from_cell)
                    .unwrap_or(RequestStatus::New),
                postal_code: record.get(3).unwrap_or("").to_string(),
                prefecture: record.get(4).and_then(enum_from_cell),
                city: record.get(5).unwrap_or("").to_string(),
                street_number: record.get(6).unwrap_or("").to_string(),
                housing_type: record.get(7).and_then(enum_from_cell),
                building: record.get(8).unwrap_or("").to_string(),
                elevator_available: record
                    .get(9)
                    .unwrap_or("false")
                    .parse::<bool>()
                    .unwrap_or(false),
                item_list: record.get(10).unwrap_or("").to_string(),
                preferred_date_1: non_empty(record.get(11)),
                preferred_time_1: record.get(12).and_then(enum_from_cell),
                preferred_date_2: non_empty(record.get(13)),
                preferred_time_2: record.get(14).and_then(enum_from_cell),
                preferred_date_3: non_empty(record.get(15)),
                preferred_time_3: record.get(16).and_then(enum_from_cell),
                customer_name: record.get(17).unwrap_or("").to_string(),
                customer_name_kana: record.get(18).unwrap_or("").to_string(),
                customer_email: record.get(19).unwrap_or("").to_string(),
                customer_phone: record.get(20).unwrap_or("").to_string(),
                reason_for_use: record.get(21).and_then(enum_from_cell),
                other_notes: record.get(22).unwrap_or("").to_string(),
                privacy_policy_agreed: record
                    .get(23)
                    .unwrap_or("false")
                    .parse::<bool>()
                    .unwrap_or(false),
                created_at: record.get(24).unwrap_or("").to_string(),
                updated_at: record.get(25).unwrap_or("").to_string(),
            };

            requests.push(request);
        }

        Ok(requests)
    }

    /// Write every service request to the CSV file
    async fn write_requests(&self, requests: &[ServiceRequest]) -> Result<()> {
        let file_path = self.connection.requests_file_path();

        // Write to a temporary file and rename for an atomic replace
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            csv_writer.write_record(&HEADER)?;

            for request in requests {
                csv_writer.write_record(&[
                    &request.id,
                    &enum_to_cell(&request.category),
                    &enum_to_cell(&request.status),
                    &request.postal_code,
                    &request.prefecture.as_ref().map(enum_to_cell).unwrap_or_default(),
                    &request.city,
                    &request.street_number,
                    &request.housing_type.as_ref().map(enum_to_cell).unwrap_or_default(),
                    &request.building,
                    &request.elevator_available.to_string(),
                    &request.item_list,
                    &request.preferred_date_1.clone().unwrap_or_default(),
                    &request.preferred_time_1.as_ref().map(enum_to_cell).unwrap_or_default(),
                    &request.preferred_date_2.clone().unwrap_or_default(),
                    &request.preferred_time_2.as_ref().map(enum_to_cell).unwrap_or_default(),
                    &request.preferred_date_3.clone().unwrap_or_default(),
                    &request.preferred_time_3.as_ref().map(enum_to_cell).unwrap_or_default(),
                    &request.customer_name,
                    &request.customer_name_kana,
                    &request.customer_email,
                    &request.customer_phone,
                    &request.reason_for_use.as_ref().map(enum_to_cell).unwrap_or_default(),
                    &request.other_notes,
                    &request.privacy_policy_agreed.to_string(),
                    &request.created_at,
                    &request.updated_at,
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }
}

#[async_trait]
impl ServiceRequestStorage for ServiceRequestRepository {
    async fn list_requests(&self) -> Result<Vec<ServiceRequest>> {
        self.read_requests().await
    }

    async fn get_request(&self, id: &str) -> Result<Option<ServiceRequest>> {
        let requests = self.read_requests().await?;

        Ok(requests.into_iter().find(|r| r.id == id))
    }

    async fn store_request(&self, request: &ServiceRequest) -> Result<()> {
        info!("Storing service request in CSV: {}", request.id);

        let mut requests = self.read_requests().await?;

        if requests.iter().any(|r| r.id == request.id) {
            return Err(anyhow!("Service request already exists: {}", request.id));
        }

        requests.push(request.clone());

        // Keep the file in submission order
        requests.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        self.write_requests(&requests).await?;

        info!("Successfully stored service request: {}", request.id);
        Ok(())
    }

    async fn update_request(&self, request: &ServiceRequest) -> Result<()> {
        info!("Updating service request in CSV: {}", request.id);

        let mut requests = self.read_requests().await?;

        if let Some(existing) = requests.iter_mut().find(|r| r.id == request.id) {
            *existing = request.clone();

            self.write_requests(&requests).await?;

            info!("Successfully updated service request: {}", request.id);
            Ok(())
        } else {
            warn!("Service request not found for update: {}", request.id);
            Err(anyhow!("Service request not found: {}", request.id))
        }
    }
}
