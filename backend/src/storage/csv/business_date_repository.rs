use anyhow::{anyhow, Result};
use async_trait::async_trait;
use csv::{Reader, Writer};
use log::{info, warn};
use shared::BusinessDate;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use super::non_empty;
use crate::storage::BusinessDateStorage;

const HEADER: [&str; 9] = [
    "date",
    "day_of_week",
    "is_holiday",
    "special_day_label",
    "memo",
    "business_hours",
    "deleted_flag",
    "created_at",
    "updated_at",
];

/// CSV-based business date repository
#[derive(Clone)]
pub struct BusinessDateRepository {
    connection: CsvConnection,
}

impl BusinessDateRepository {
    /// Create a new CSV business date repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every business date record from the CSV file
    async fn read_business_dates(&self) -> Result<Vec<BusinessDate>> {
        let file_path = self.connection.business_dates_file_path();
        self.connection.ensure_file_exists(&file_path, &HEADER)?;

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut records = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            let business_date = BusinessDate {
                date: record.get(0).unwrap_or("").to_string(),
                day_of_week: record.get(1).unwrap_or("0").parse::<u32>().unwrap_or(0),
                is_holiday: record.get(2).unwrap_or("false").parse::<bool>().unwrap_or(false),
                special_day_label: non_empty(record.get(3)),
                memo: non_empty(record.get(4)),
                business_hours: non_empty(record.get(5)),
                deleted_flag: record.get(6).unwrap_or("0").parse::<u8>().unwrap_or(0),
                created_at: record.get(7).unwrap_or("").to_string(),
                updated_at: record.get(8).unwrap_or("").to_string(),
            };

            records.push(business_date);
        }

        Ok(records)
    }

    /// Write every business date record to the CSV file
    async fn write_business_dates(&self, records: &[BusinessDate]) -> Result<()> {
        let file_path = self.connection.business_dates_file_path();

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

            for record in records {
                csv_writer.write_record(&[
                    &record.date,
                    &record.day_of_week.to_string(),
                    &record.is_holiday.to_string(),
                    &record.special_day_label.clone().unwrap_or_default(),
                    &record.memo.clone().unwrap_or_default(),
                    &record.business_hours.clone().unwrap_or_default(),
                    &record.deleted_flag.to_string(),
                    &record.created_at,
                    &record.updated_at,
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }
}

#[async_trait]
impl BusinessDateStorage for BusinessDateRepository {
    async fn list_business_dates(&self) -> Result<Vec<BusinessDate>> {
        let mut records = self.read_business_dates().await?;

        // Keep the file order stable for callers: ascending by date
        records.sort_by(|a, b| a.date.cmp(&b.date));

        Ok(records)
    }

    async fn get_business_date(&self, date: &str) -> Result<Option<BusinessDate>> {
        let records = self.read_business_dates().await?;

        Ok(records.into_iter().find(|r| r.date == date))
    }

    async fn create_business_date(&self, record: &BusinessDate) -> Result<()> {
        info!("Storing business date in CSV: {}", record.date);

        let mut records = self.read_business_dates().await?;

        if records.iter().any(|r| r.date == record.date) {
            return Err(anyhow!("Business date already exists: {}", record.date));
        }

        records.push(record.clone());

        // Keep the file sorted by date
        records.sort_by(|a, b| a.date.cmp(&b.date));

        self.write_business_dates(&records).await?;

        info!("Successfully stored business date: {}", record.date);
        Ok(())
    }

    async fn update_business_date(&self, record: &BusinessDate) -> Result<()> {
        info!("Updating business date in CSV: {}", record.date);

        let mut records = self.read_business_dates().await?;

        if let Some(existing) = records.iter_mut().find(|r| r.date == record.date) {
            *existing = record.clone();

            self.write_business_dates(&records).await?;

            info!("Successfully updated business date: {}", record.date);
            Ok(())
        } else {
            warn!("Business date not found for update: {}", record.date);
            Err(anyhow!("Business date not found: {}", record.date))
        }
    }

    async fn delete_business_date(&self, date: &str) -> Result<bool> {
        info!("Deleting business date from CSV: {}", date);

        let mut records = self.read_business_dates().await?;
        let initial_len = records.len();

        records.retain(|r| r.date != date);

        if records.len() < initial_len {
            self.write_business_dates(&records).await?;
            info!("Successfully deleted business date: {}", date);
            Ok(true)
        } else {
            warn!("Business date not found for deletion: {}", date);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::BusinessHour;
    use tempfile::TempDir;

    fn setup_test_repo() -> (BusinessDateRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (BusinessDateRepository::new(connection), temp_dir)
    }

    fn sample_record(date: &str) -> BusinessDate {
        BusinessDate {
            date: date.to_string(),
            day_of_week: 1,
            is_holiday: false,
            special_day_label: None,
            memo: None,
            business_hours: Some(BusinessDate::encode_business_hours(&[BusinessHour {
                start_time: "09:00".to_string(),
                end_time: "18:00".to_string(),
            }])),
            deleted_flag: 0,
            created_at: "2025-01-01T09:00:00+09:00".to_string(),
            updated_at: "2025-01-01T09:00:00+09:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_and_retrieve_business_date() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.create_business_date(&sample_record("2025-01-06"))
            .await
            .unwrap();

        let retrieved = repo.get_business_date("2025-01-06").await.unwrap();
        assert!(retrieved.is_some());

        let retrieved = retrieved.unwrap();
        assert_eq!(retrieved.date, "2025-01-06");
        assert_eq!(retrieved.day_of_week, 1);
        assert!(!retrieved.is_holiday);
        assert_eq!(
            retrieved.business_hours.as_deref(),
            Some(r#"[{"startTime":"09:00","endTime":"18:00"}]"#)
        );
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_date() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.create_business_date(&sample_record("2025-01-06"))
            .await
            .unwrap();

        let result = repo.create_business_date(&sample_record("2025-01-06")).await;
        assert!(result.is_err());

        let records = repo.list_business_dates().await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_update_overwrites_existing_record() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.create_business_date(&sample_record("2025-01-06"))
            .await
            .unwrap();

        let mut updated = sample_record("2025-01-06");
        updated.is_holiday = true;
        updated.special_day_label = Some("Maintenance".to_string());
        updated.business_hours = None;
        repo.update_business_date(&updated).await.unwrap();

        let retrieved = repo.get_business_date("2025-01-06").await.unwrap().unwrap();
        assert!(retrieved.is_holiday);
        assert_eq!(retrieved.special_day_label.as_deref(), Some("Maintenance"));
        assert_eq!(retrieved.business_hours, None);
    }

    #[tokio::test]
    async fn test_update_missing_record_is_an_error() {
        let (repo, _temp_dir) = setup_test_repo();

        let result = repo.update_business_date(&sample_record("2025-02-01")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_business_date() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.create_business_date(&sample_record("2025-01-06"))
            .await
            .unwrap();

        let deleted = repo.delete_business_date("2025-01-06").await.unwrap();
        assert!(deleted);

        let retrieved = repo.get_business_date("2025-01-06").await.unwrap();
        assert!(retrieved.is_none());

        // Deleting again reports that nothing was removed
        let deleted = repo.delete_business_date("2025-01-06").await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_list_returns_dates_ascending() {
        let (repo, _temp_dir) = setup_test_repo();

        for date in ["2025-03-10", "2025-01-06", "2025-02-14"] {
            repo.create_business_date(&sample_record(date)).await.unwrap();
        }

        let records = repo.list_business_dates().await.unwrap();
        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-06", "2025-02-14", "2025-03-10"]);
    }

    #[tokio::test]
    async fn test_optional_cells_survive_round_trip() {
        let (repo, _temp_dir) = setup_test_repo();

        let mut record = sample_record("2025-01-13");
        record.special_day_label = Some("Inventory day".to_string());
        record.memo = Some("Short-staffed, afternoon only".to_string());
        repo.create_business_date(&record).await.unwrap();

        let retrieved = repo.get_business_date("2025-01-13").await.unwrap().unwrap();
        assert_eq!(retrieved.special_day_label.as_deref(), Some("Inventory day"));
        assert_eq!(
            retrieved.memo.as_deref(),
            Some("Short-staffed, afternoon only")
        );

        // Empty optional cells come back as None, not Some("")
        let bare = sample_record("2025-01-14");
        repo.create_business_date(&bare).await.unwrap();
        let retrieved = repo.get_business_date("2025-01-14").await.unwrap().unwrap();
        assert_eq!(retrieved.special_day_label, None);
        assert_eq!(retrieved.memo, None);
    }
}
