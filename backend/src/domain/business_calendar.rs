//! # Business Calendar
//!
//! Back-office management of the availability calendar: one record per
//! configured date, keyed by the date itself. Dates with no record are
//! simply unconfigured, not closed. Single-date edits are full overwrites;
//! bulk generation previews a closed range and commits a shared template
//! one date at a time.

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use log::{error, info, warn};
use std::sync::Arc;

use shared::{
    BulkCommitOutcome, BulkGenerationPlan, BusinessDate, BusinessDayTemplate, CandidateDate,
    FilterPeriod, GridCell, MonthGrid, UpsertBusinessDateRequest,
};

use super::dates::{self, CalendarError};
use crate::storage::BusinessDateStorage;

/// Service for managing business availability dates
#[derive(Clone)]
pub struct BusinessCalendarService {
    store: Arc<dyn BusinessDateStorage>,
}

impl BusinessCalendarService {
    /// Create a new BusinessCalendarService
    pub fn new(store: Arc<dyn BusinessDateStorage>) -> Self {
        Self { store }
    }

    /// Create or fully overwrite the record for one date. The weekday is
    /// always recomputed from the date; fields absent from the request are
    /// cleared, never merged. `created_at` survives an overwrite.
    pub async fn upsert(&self, request: UpsertBusinessDateRequest) -> Result<BusinessDate> {
        info!("Upserting business date: {}", request.date);

        let date = dates::parse_date(&request.date)?;

        let existing = self.store.get_business_date(&request.date).await?;
        let timestamp_rfc3339 = dates::now_jst().to_rfc3339();

        let record = BusinessDate {
            date: dates::format_date(date),
            day_of_week: dates::weekday_index(date),
            is_holiday: request.is_holiday,
            special_day_label: request.special_day_label,
            memo: request.memo,
            business_hours: Some(BusinessDate::encode_business_hours(&request.business_hours)),
            deleted_flag: 0,
            created_at: existing
                .as_ref()
                .map(|e| e.created_at.clone())
                .unwrap_or_else(|| timestamp_rfc3339.clone()),
            updated_at: timestamp_rfc3339,
        };

        if existing.is_some() {
            self.store.update_business_date(&record).await?;
            info!("Overwrote business date: {}", record.date);
        } else {
            self.store.create_business_date(&record).await?;
            info!("Created business date: {}", record.date);
        }

        Ok(record)
    }

    /// Remove the record for one date. A date with no record is a clean
    /// no-op, reported through the returned flag.
    pub async fn delete(&self, date: &str) -> Result<bool> {
        info!("Deleting business date: {}", date);

        let deleted = self.store.delete_business_date(date).await?;

        if !deleted {
            info!("No business date record to delete for {}", date);
        }

        Ok(deleted)
    }

    /// Preview a bulk generation over the closed interval [start, end].
    /// Reversed bounds fail with no candidates; nothing is written until
    /// the plan is committed.
    pub fn plan_bulk(&self, start: &str, end: &str) -> Result<BulkGenerationPlan, CalendarError> {
        let start_date = dates::parse_date(start)?;
        let end_date = dates::parse_date(end)?;

        let candidates = dates::date_range(start_date, end_date)?
            .into_iter()
            .map(|date| CandidateDate {
                date: dates::format_date(date),
                day_of_week: dates::weekday_index(date),
                selected: true,
            })
            .collect();

        Ok(BulkGenerationPlan {
            start_date: dates::format_date(start_date),
            end_date: dates::format_date(end_date),
            candidates,
        })
    }

    /// Write the template to every listed date, one independent upsert per
    /// date. A failing date never blocks the rest; the outcome carries
    /// aggregate counts once every date has settled.
    pub async fn commit_bulk(
        &self,
        selected_dates: &[String],
        template: &BusinessDayTemplate,
    ) -> BulkCommitOutcome {
        info!("Committing bulk generation for {} dates", selected_dates.len());

        let mut succeeded = 0;
        let mut failed = 0;

        for date in selected_dates {
            let request = UpsertBusinessDateRequest {
                date: date.clone(),
                is_holiday: template.is_holiday,
                special_day_label: template.special_day_label.clone(),
                memo: template.memo.clone(),
                business_hours: template.business_hours.clone(),
            };

            match self.upsert(request).await {
                Ok(_) => succeeded += 1,
                Err(e) => {
                    // Per-date detail stays in the log; callers get counts
                    error!("Bulk upsert failed for {}: {:#}", date, e);
                    failed += 1;
                }
            }
        }

        info!(
            "Bulk generation finished: {} succeeded, {} failed",
            succeeded, failed
        );

        BulkCommitOutcome {
            succeeded,
            failed,
            success_message: format!("Created or updated {} business dates", succeeded),
        }
    }

    /// List configured dates ascending, optionally windowed to
    /// [today, today+N). Records whose stored date no longer parses are
    /// kept by the unbounded filter and dropped by windowed ones.
    pub async fn list_filtered(
        &self,
        period: FilterPeriod,
        today: NaiveDate,
    ) -> Result<Vec<BusinessDate>> {
        info!("Listing business dates: period={:?}", period);

        let mut records = self.store.list_business_dates().await?;

        if let Some(days) = period.days() {
            let end = today + Duration::days(days);
            records.retain(|record| match dates::parse_date(&record.date) {
                Ok(date) => date >= today && date < end,
                Err(_) => {
                    warn!("Excluding business date with unparseable date: {}", record.date);
                    false
                }
            });
        }

        records.sort_by(|a, b| a.date.cmp(&b.date));

        info!("Found {} business dates", records.len());

        Ok(records)
    }

    /// Project a month onto a fixed 42-cell grid starting on the Sunday on
    /// or before the 1st, with each cell carrying its record if one exists.
    pub async fn month_grid(&self, year: i32, month: u32, today: NaiveDate) -> Result<MonthGrid> {
        info!("Building month grid: {}-{:02}", year, month);

        let origin = dates::grid_origin(year, month)?;
        let records = self.store.list_business_dates().await?;

        let mut cells = Vec::with_capacity(42);
        for offset in 0..42i64 {
            let date = origin + Duration::days(offset);
            let date_string = dates::format_date(date);
            let record = records.iter().find(|r| r.date == date_string).cloned();

            cells.push(GridCell {
                date: date_string,
                day: date.day(),
                day_of_week: dates::weekday_index(date),
                in_current_month: date.year() == year && date.month() == month,
                is_today: date == today,
                record,
            });
        }

        Ok(MonthGrid { year, month, cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::MemoryBusinessDates;
    use shared::BusinessHour;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    fn service() -> (BusinessCalendarService, MemoryBusinessDates) {
        let store = MemoryBusinessDates::new();
        (BusinessCalendarService::new(Arc::new(store.clone())), store)
    }

    fn upsert_request(date: &str) -> UpsertBusinessDateRequest {
        UpsertBusinessDateRequest {
            date: date.to_string(),
            is_holiday: false,
            special_day_label: None,
            memo: Some("Regular hours".to_string()),
            business_hours: vec![BusinessHour {
                start_time: "09:00".to_string(),
                end_time: "18:00".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_and_stamps_weekday() {
        let (service, store) = service();

        let record = service.upsert(upsert_request("2025-01-06")).await.unwrap();

        // 2025-01-06 is a Monday
        assert_eq!(record.day_of_week, 1);
        assert_eq!(record.day_name(), "Monday");
        assert_eq!(record.deleted_flag, 0);
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_twice_is_idempotent() {
        let (service, store) = service();

        let first = service.upsert(upsert_request("2025-01-06")).await.unwrap();
        let second = service.upsert(upsert_request("2025-01-06")).await.unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].memo.as_deref(), Some("Regular hours"));
        assert_eq!(records[0].business_hours, first.business_hours);

        // The original creation stamp survives the overwrite
        assert_eq!(second.created_at, first.created_at);
    }

    #[tokio::test]
    async fn test_upsert_overwrite_drops_unmentioned_fields() {
        let (service, store) = service();

        service.upsert(upsert_request("2025-01-06")).await.unwrap();

        let mut overwrite = upsert_request("2025-01-06");
        overwrite.is_holiday = true;
        overwrite.memo = None;
        overwrite.business_hours = Vec::new();
        service.upsert(overwrite).await.unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_holiday);
        assert_eq!(records[0].memo, None);
        assert_eq!(records[0].business_hours.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_upsert_rejects_malformed_date() {
        let (service, store) = service();

        let err = service
            .upsert(upsert_request("January 6th"))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CalendarError>(),
            Some(&CalendarError::InvalidDate("January 6th".to_string()))
        );
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_delete_absent_date_is_a_clean_no_op() {
        let (service, _store) = service();

        assert!(!service.delete("2025-01-06").await.unwrap());

        service.upsert(upsert_request("2025-01-06")).await.unwrap();
        assert!(service.delete("2025-01-06").await.unwrap());
        assert!(!service.delete("2025-01-06").await.unwrap());
    }

    #[test]
    fn test_plan_bulk_rejects_reversed_range() {
        let (service, _store) = service();

        let err = service.plan_bulk("2025-01-08", "2025-01-06").unwrap_err();
        assert_eq!(
            err,
            CalendarError::InvalidRange {
                start: "2025-01-08".to_string(),
                end: "2025-01-06".to_string(),
            }
        );
    }

    #[test]
    fn test_plan_bulk_expands_the_closed_interval() {
        let (service, _store) = service();

        let plan = service.plan_bulk("2025-01-06", "2025-01-08").unwrap();

        assert_eq!(plan.candidates.len(), 3);
        let dates: Vec<&str> = plan.candidates.iter().map(|c| c.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-06", "2025-01-07", "2025-01-08"]);

        let names: Vec<&str> = plan.candidates.iter().map(|c| c.day_name()).collect();
        assert_eq!(names, vec!["Monday", "Tuesday", "Wednesday"]);

        assert!(plan.candidates.iter().all(|c| c.selected));
    }

    #[test]
    fn test_plan_toggle_controls_selection() {
        let (service, _store) = service();

        let mut plan = service.plan_bulk("2025-01-06", "2025-01-08").unwrap();
        plan.toggle("2025-01-07");

        assert_eq!(plan.selected_dates(), vec!["2025-01-06", "2025-01-08"]);

        // Unknown dates are ignored
        plan.toggle("2025-02-01");
        assert_eq!(plan.selected_dates().len(), 2);
    }

    #[tokio::test]
    async fn test_commit_bulk_applies_the_template() {
        let (service, store) = service();

        let plan = service.plan_bulk("2025-01-06", "2025-01-08").unwrap();
        let template = BusinessDayTemplate::default();

        let outcome = service
            .commit_bulk(&plan.selected_dates(), &template)
            .await;

        assert_eq!(outcome.succeeded, 3);
        assert_eq!(outcome.failed, 0);

        let records = store.records();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| !r.is_holiday));
    }

    #[tokio::test]
    async fn test_commit_bulk_counts_per_date_failures() {
        let (service, store) = service();
        store.fail_on("2025-01-07");

        let plan = service.plan_bulk("2025-01-06", "2025-01-08").unwrap();
        let outcome = service
            .commit_bulk(&plan.selected_dates(), &BusinessDayTemplate::default())
            .await;

        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed, 1);

        // The failing date never blocked its neighbors
        let stored: Vec<String> = store.records().into_iter().map(|r| r.date).collect();
        assert_eq!(stored, vec!["2025-01-06", "2025-01-08"]);
    }

    #[tokio::test]
    async fn test_list_filtered_window_boundaries() {
        let (service, _store) = service();

        for date in ["2025-01-06", "2025-01-12", "2025-01-13", "2025-03-01"] {
            service.upsert(upsert_request(date)).await.unwrap();
        }

        // [today, today+7): today and today+6 in, today+7 out
        let week = service
            .list_filtered(FilterPeriod::Next7Days, today())
            .await
            .unwrap();
        let dates: Vec<&str> = week.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-06", "2025-01-12"]);

        let all = service
            .list_filtered(FilterPeriod::All, today())
            .await
            .unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_list_filtered_drops_unparseable_dates_from_windows() {
        let (service, store) = service();

        service.upsert(upsert_request("2025-01-06")).await.unwrap();

        let mut broken = store.records()[0].clone();
        broken.date = "not-a-date".to_string();
        store
            .create_business_date(&broken)
            .await
            .unwrap();

        let all = service
            .list_filtered(FilterPeriod::All, today())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let windowed = service
            .list_filtered(FilterPeriod::Next90Days, today())
            .await
            .unwrap();
        assert_eq!(windowed.len(), 1);
        assert_eq!(windowed[0].date, "2025-01-06");
    }

    #[tokio::test]
    async fn test_month_grid_shape() {
        let (service, _store) = service();

        service.upsert(upsert_request("2025-01-01")).await.unwrap();

        let grid = service.month_grid(2025, 1, today()).await.unwrap();

        assert_eq!(grid.cells.len(), 42);

        // January 2025 starts on a Wednesday, so the grid leads with three
        // December cells
        assert!(!grid.cells[0].in_current_month);
        assert!(!grid.cells[1].in_current_month);
        assert!(!grid.cells[2].in_current_month);
        assert_eq!(grid.cells[0].date, "2024-12-29");

        assert_eq!(grid.cells[3].date, "2025-01-01");
        assert!(grid.cells[3].in_current_month);
        assert_eq!(grid.cells[3].day, 1);
        assert!(grid.cells[3].record.is_some());

        // 2025-01-06 sits at index 8 (second row, Monday column)
        assert!(grid.cells[8].is_today);
        assert_eq!(grid.cells[8].day_of_week, 1);
    }

    #[tokio::test]
    async fn test_month_grid_rejects_invalid_month() {
        let (service, _store) = service();

        let err = service.month_grid(2025, 13, today()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<CalendarError>(),
            Some(&CalendarError::InvalidMonth(13))
        );
    }
}
