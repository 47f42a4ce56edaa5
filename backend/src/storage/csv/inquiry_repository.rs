use anyhow::{anyhow, Result};
use async_trait::async_trait;
use csv::{Reader, Writer};
use log::{info, warn};
use shared::{ContactInquiry, InquiryStatus, InquirySubject};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use super::{enum_from_cell, enum_to_cell, non_empty};
use crate::storage::InquiryStorage;

const HEADER: [&str; 9] = [
    "id",
    "name",
    "email",
    "phone",
    "subject",
    "message",
    "status",
    "created_at",
    "updated_at",
];

/// CSV-based contact inquiry repository
#[derive(Clone)]
pub struct InquiryRepository {
    connection: CsvConnection,
}

impl InquiryRepository {
    /// Create a new CSV inquiry repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every inquiry from the CSV file
    async fn read_inquiries(&self) -> Result<Vec<ContactInquiry>> {
        let file_path = self.connection.inquiries_file_path();
        self.connection.ensure_file_exists(&file_path, &HEADER)?;

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut inquiries = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            let inquiry = ContactInquiry {
                id: record.get(0).unwrap_or("").to_string(),
                name: record.get(1).unwrap_or("").to_string(),
                email: record.get(2).unwrap_or("").to_string(),
                phone: non_empty(record.get(3)),
                subject: record
                    .get(4)
                    .and_then(enum_from_cell)
                    .unwrap_or(InquirySubject::Other),
                message: record.get(5).unwrap_or("").to_string(),
                status: record
                    .get(6)
                    .and_then(enum_from_cell)
                    .unwrap_or(InquiryStatus::New),
                created_at: record.get(7).unwrap_or("").to_string(),
                updated_at: record.get(8).unwrap_or("").to_string(),
            };

            inquiries.push(inquiry);
        }

        Ok(inquiries)
    }

    /// Write every inquiry to the CSV file
    async fn write_inquiries(&self, inquiries: &[ContactInquiry]) -> Result<()> {
        let file_path = self.connection.inquiries_file_path();

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

            for inquiry in inquiries {
                csv_writer.write_record(&[
                    &inquiry.id,
                    &inquiry.name,
                    &inquiry.email,
                    &inquiry.phone.clone().unwrap_or_default(),
                    &enum_to_cell(&inquiry.subject),
                    &inquiry.message,
                    &enum_to_cell(&inquiry.status),
                    &inquiry.created_at,
                    &inquiry.updated_at,
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }
}

#[async_trait]
impl InquiryStorage for InquiryRepository {
    async fn list_inquiries(&self) -> Result<Vec<ContactInquiry>> {
        self.read_inquiries().await
    }

    async fn get_inquiry(&self, id: &str) -> Result<Option<ContactInquiry>> {
        let inquiries = self.read_inquiries().await?;

        Ok(inquiries.into_iter().find(|i| i.id == id))
    }

    async fn store_inquiry(&self, inquiry: &ContactInquiry) -> Result<()> {
        info!("Storing inquiry in CSV: {}", inquiry.id);

        let mut inquiries = self.read_inquiries().await?;

        if inquiries.iter().any(|i| i.id == inquiry.id) {
            return Err(anyhow!("Inquiry already exists: {}", inquiry.id));
        }

        inquiries.push(inquiry.clone());

        // Keep the file in submission order
        inquiries.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        self.write_inquiries(&inquiries).await?;

        info!("Successfully stored inquiry: {}", inquiry.id);
        Ok(())
    }

    async fn update_inquiry(&self, inquiry: &ContactInquiry) -> Result<()> {
        info!("Updating inquiry in CSV: {}", inquiry.id);

        let mut inquiries = self.read_inquiries().await?;

        if let Some(existing) = inquiries.iter_mut().find(|i| i.id == inquiry.id) {
            *existing = inquiry.clone();

            self.write_inquiries(&inquiries).await?;

            info!("Successfully updated inquiry: {}", inquiry.id);
            Ok(())
        } else {
            warn!("Inquiry not found for update: {}", inquiry.id);
            Err(anyhow!("Inquiry not found: {}", inquiry.id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (InquiryRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (InquiryRepository::new(connection), temp_dir)
    }

    fn sample_inquiry(id: &str, created_at: &str) -> ContactInquiry {
        ContactInquiry {
            id: id.to_string(),
            name: "Hanako Sato".to_string(),
            email: "hanako@example.com".to_string(),
            phone: Some("090-1234-5678".to_string()),
            subject: InquirySubject::Buyback,
            message: "Do you collect pianos?".to_string(),
            status: InquiryStatus::New,
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_and_retrieve_inquiry() {
        let (repo, _temp_dir) = setup_test_repo();

        let inquiry = sample_inquiry("inquiry::1700000000000", "2025-01-06T10:00:00+09:00");
        repo.store_inquiry(&inquiry).await.unwrap();

        let retrieved = repo.get_inquiry("inquiry::1700000000000").await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap(), inquiry);
    }

    #[tokio::test]
    async fn test_missing_phone_round_trips_as_none() {
        let (repo, _temp_dir) = setup_test_repo();

        let mut inquiry = sample_inquiry("inquiry::1700000000000", "2025-01-06T10:00:00+09:00");
        inquiry.phone = None;
        repo.store_inquiry(&inquiry).await.unwrap();

        let retrieved = repo
            .get_inquiry("inquiry::1700000000000")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retrieved.phone, None);
    }

    #[tokio::test]
    async fn test_store_rejects_duplicate_id() {
        let (repo, _temp_dir) = setup_test_repo();

        let inquiry = sample_inquiry("inquiry::1700000000000", "2025-01-06T10:00:00+09:00");
        repo.store_inquiry(&inquiry).await.unwrap();

        let result = repo.store_inquiry(&inquiry).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_changes_status() {
        let (repo, _temp_dir) = setup_test_repo();

        let inquiry = sample_inquiry("inquiry::1700000000000", "2025-01-06T10:00:00+09:00");
        repo.store_inquiry(&inquiry).await.unwrap();

        let mut updated = inquiry.clone();
        updated.status = InquiryStatus::Resolved;
        updated.updated_at = "2025-01-08T15:00:00+09:00".to_string();
        repo.update_inquiry(&updated).await.unwrap();

        let retrieved = repo
            .get_inquiry("inquiry::1700000000000")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retrieved.status, InquiryStatus::Resolved);

        // Updating an unknown inquiry is an error
        let mut unknown = inquiry.clone();
        unknown.id = "inquiry::999".to_string();
        assert!(repo.update_inquiry(&unknown).await.is_err());
    }
}
