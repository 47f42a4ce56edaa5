use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::storage::traits::Connection;

/// CsvConnection manages the data directory and the CSV files inside it.
/// All repositories created from one connection share the same directory.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<Mutex<PathBuf>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: Arc::new(Mutex::new(base_path)),
        })
    }

    /// Create a new CSV connection in the default data directory.
    /// `BUYBACK_DESK_DATA_DIR` overrides; otherwise ~/Documents/Buyback Desk.
    pub fn new_default() -> Result<Self> {
        if let Ok(dir) = std::env::var("BUYBACK_DESK_DATA_DIR") {
            info!("Using data directory from BUYBACK_DESK_DATA_DIR: {}", dir);
            return Self::new(dir);
        }

        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Buyback Desk");
        info!("Using default data directory: {}", data_dir.display());

        Self::new(data_dir)
    }

    /// Get the current base directory
    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.lock().unwrap().clone()
    }

    /// Path of the business calendar file
    pub fn business_dates_file_path(&self) -> PathBuf {
        self.base_directory().join("business_dates.csv")
    }

    /// Path of the service requests file
    pub fn requests_file_path(&self) -> PathBuf {
        self.base_directory().join("service_requests.csv")
    }

    /// Path of the contact inquiries file
    pub fn inquiries_file_path(&self) -> PathBuf {
        self.base_directory().join("inquiries.csv")
    }

    /// Create a CSV file with its header row if it doesn't exist yet
    pub fn ensure_file_exists(&self, path: &Path, header: &[&str]) -> Result<()> {
        if path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(header)?;
        writer.flush()?;

        Ok(())
    }
}

impl Connection for CsvConnection {
    type BusinessDateRepository = super::business_date_repository::BusinessDateRepository;
    type ServiceRequestRepository = super::request_repository::ServiceRequestRepository;
    type InquiryRepository = super::inquiry_repository::InquiryRepository;

    fn create_business_date_repository(&self) -> Self::BusinessDateRepository {
        super::business_date_repository::BusinessDateRepository::new(self.clone())
    }

    fn create_service_request_repository(&self) -> Self::ServiceRequestRepository {
        super::request_repository::ServiceRequestRepository::new(self.clone())
    }

    fn create_inquiry_repository(&self) -> Self::InquiryRepository {
        super::inquiry_repository::InquiryRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("nested").join("data");

        let connection = CsvConnection::new(&data_dir).unwrap();

        assert!(data_dir.exists());
        assert_eq!(connection.base_directory(), data_dir);
    }

    #[test]
    fn test_file_paths_live_under_the_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        assert_eq!(
            connection.business_dates_file_path(),
            temp_dir.path().join("business_dates.csv")
        );
        assert_eq!(
            connection.requests_file_path(),
            temp_dir.path().join("service_requests.csv")
        );
        assert_eq!(
            connection.inquiries_file_path(),
            temp_dir.path().join("inquiries.csv")
        );
    }

    #[test]
    fn test_ensure_file_exists_writes_header_once() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let path = connection.business_dates_file_path();

        connection.ensure_file_exists(&path, &["date", "memo"]).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert!(first.starts_with("date,memo"));

        // A second call leaves the existing file alone
        fs::write(&path, "date,memo\n2025-01-06,hello\n").unwrap();
        connection.ensure_file_exists(&path, &["date", "memo"]).unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert!(second.contains("2025-01-06"));
    }
}
