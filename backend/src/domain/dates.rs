//! # Date Policy
//!
//! Pure calendar helpers shared by the intake wizard and the business
//! calendar. Everything here takes its reference date explicitly; only the
//! clock functions at the bottom touch the system time.
//!
//! The desk operates in Japan Standard Time, so "today" and record
//! timestamps are always taken at UTC+9 regardless of server locale.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use thiserror::Error;

/// Days from today until the earliest offerable pickup date.
pub const MIN_LEAD_DAYS: i64 = 7;

/// Days from today until the latest offerable pickup date.
pub const MAX_LEAD_DAYS: i64 = 30;

/// Errors for calendar inputs that arrive as raw strings or numbers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid month: {0}")]
    InvalidMonth(u32),
}

/// Parse a YYYY-MM-DD string into a date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(raw.to_string()))
}

/// Render a date back into its YYYY-MM-DD form.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 0-based day of week with Sunday first, matching the stored records.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Every calendar day in the closed interval [start, end], ascending.
/// Reversed bounds fail as a whole; no partial range is produced.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, CalendarError> {
    if start > end {
        return Err(CalendarError::InvalidRange {
            start: format_date(start),
            end: format_date(end),
        });
    }

    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current += Duration::days(1);
    }
    Ok(dates)
}

/// The inclusive window of offerable pickup dates relative to today.
pub fn scheduling_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        today + Duration::days(MIN_LEAD_DAYS),
        today + Duration::days(MAX_LEAD_DAYS),
    )
}

/// All offerable pickup dates as YYYY-MM-DD strings, earliest first.
pub fn available_dates(today: NaiveDate) -> Vec<String> {
    let (first, last) = scheduling_window(today);
    // The window bounds are ordered by construction.
    date_range(first, last)
        .unwrap_or_default()
        .into_iter()
        .map(format_date)
        .collect()
}

/// First cell of the 6-week month grid: the Sunday on or before the 1st.
pub fn grid_origin(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidMonth(month))?;
    Ok(first - Duration::days(weekday_index(first) as i64))
}

fn jst() -> FixedOffset {
    // UTC+9 is always representable.
    FixedOffset::east_opt(9 * 3600).expect("JST offset")
}

/// Current wall-clock instant in JST.
pub fn now_jst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&jst())
}

/// Today's calendar date in JST.
pub fn today_jst() -> NaiveDate {
    now_jst().date_naive()
}
