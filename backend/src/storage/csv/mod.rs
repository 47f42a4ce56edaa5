//! # CSV Storage Module
//!
//! File-based storage for the buyback desk. Each record type lives in one
//! CSV file inside the data directory, read in full on every list and
//! rewritten in full through a temp file on every mutation.
//!
//! ## File Format
//!
//! Every file carries a header row. Cells holding enums store the serde
//! name of the variant; the item-list and business-hours cells store JSON
//! verbatim and are decoded defensively by the domain layer:
//! ```csv
//! date,day_of_week,is_holiday,special_day_label,memo,business_hours,deleted_flag,created_at,updated_at
//! 2025-01-06,1,false,,,,"[{""startTime"":""09:00"",""endTime"":""18:00""}]",0,2025-01-01T09:00:00+09:00,2025-01-01T09:00:00+09:00
//! ```

pub mod business_date_repository;
pub mod connection;
pub mod inquiry_repository;
pub mod request_repository;

pub use business_date_repository::BusinessDateRepository;
pub use connection::CsvConnection;
pub use inquiry_repository::InquiryRepository;
pub use request_repository::ServiceRequestRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Render a serde unit-variant enum as its bare name for a CSV cell.
pub(crate) fn enum_to_cell<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Parse a CSV cell back into an enum by its serde name.
pub(crate) fn enum_from_cell<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(raw.to_string())).ok()
}

/// An optional string cell: empty means unset.
pub(crate) fn non_empty(cell: Option<&str>) -> Option<String> {
    cell.map(str::to_string).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{RequestStatus, TimeBand};

    #[test]
    fn test_enum_cells_round_trip_serde_names() {
        assert_eq!(enum_to_cell(&RequestStatus::InProgress), "IN_PROGRESS");
        assert_eq!(
            enum_from_cell::<RequestStatus>("IN_PROGRESS"),
            Some(RequestStatus::InProgress)
        );

        // Renamed variants round-trip through their literal form
        assert_eq!(enum_to_cell(&TimeBand::Morning), "09:00-12:00");
        assert_eq!(
            enum_from_cell::<TimeBand>("09:00-12:00"),
            Some(TimeBand::Morning)
        );

        assert_eq!(enum_from_cell::<RequestStatus>("NOT_A_STATUS"), None);
    }

    #[test]
    fn test_non_empty_cell() {
        assert_eq!(non_empty(Some("memo")), Some("memo".to_string()));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
    }
}
