use serde::{Deserialize, Serialize};
use std::fmt;

/// English weekday name for a 0-based day-of-week index (0 = Sunday).
pub fn weekday_name(day_of_week: u32) -> &'static str {
    match day_of_week {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Invalid",
    }
}

/// Prefectures the pickup service covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prefecture {
    Tokyo,
    Chiba,
    Saitama,
    Kanagawa,
    Ibaraki,
    Tochigi,
    Gunma,
    Yamanashi,
}

impl Prefecture {
    pub fn label(&self) -> &'static str {
        match self {
            Prefecture::Tokyo => "Tokyo",
            Prefecture::Chiba => "Chiba",
            Prefecture::Saitama => "Saitama",
            Prefecture::Kanagawa => "Kanagawa",
            Prefecture::Ibaraki => "Ibaraki",
            Prefecture::Tochigi => "Tochigi",
            Prefecture::Gunma => "Gunma",
            Prefecture::Yamanashi => "Yamanashi",
        }
    }
}

/// Housing type of the pickup address. Building name and room number are
/// mandatory for the two apartment variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HousingType {
    ApartmentBlock,
    Apartment,
    DetachedHouse,
}

impl HousingType {
    /// Whether this housing type requires a building name and room number.
    pub fn requires_building(&self) -> bool {
        matches!(self, HousingType::ApartmentBlock | HousingType::Apartment)
    }
}

/// Categories an item offered for buyback can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Appliance,
    Furniture,
    Clothing,
    BrandItem,
    PreciousMetal,
    Instrument,
    SportingGoods,
    Other,
}

/// Coarse age buckets for an item, counted from purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearsBucket {
    UnderOneYear,
    OneToTwo,
    TwoToThree,
    ThreeToFour,
    FourToFive,
    FivePlus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSize {
    Small,
    Medium,
    Large,
}

/// Pickup time bands offered by the scheduling step. Serialized as the
/// literal range string so stored requests read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBand {
    #[serde(rename = "09:00-12:00")]
    Morning,
    #[serde(rename = "13:00-15:00")]
    EarlyAfternoon,
    #[serde(rename = "15:00-17:00")]
    LateAfternoon,
    #[serde(rename = "17:00-19:00")]
    Evening,
}

impl TimeBand {
    pub fn as_range(&self) -> &'static str {
        match self {
            TimeBand::Morning => "09:00-12:00",
            TimeBand::EarlyAfternoon => "13:00-15:00",
            TimeBand::LateAfternoon => "15:00-17:00",
            TimeBand::Evening => "17:00-19:00",
        }
    }
}

/// Why the customer is selling. Informational only, never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonForUse {
    Moving,
    Renovation,
    NewFurniture,
    Decluttering,
    Other,
}

/// Category of a persisted service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestCategory {
    PurchaseRequest,
    Inquiry,
}

/// Triage status of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    New,
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "NEW",
            RequestStatus::Pending => "PENDING",
            RequestStatus::InProgress => "IN_PROGRESS",
            RequestStatus::Completed => "COMPLETED",
            RequestStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Workflow status of a contact inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryStatus {
    New,
    InProgress,
    Resolved,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "NEW",
            InquiryStatus::InProgress => "IN_PROGRESS",
            InquiryStatus::Resolved => "RESOLVED",
            InquiryStatus::Closed => "CLOSED",
        }
    }
}

/// Subject line options on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InquirySubject {
    Service,
    Buyback,
    Reservation,
    Pricing,
    SystemIssue,
    Other,
}

/// Time window selector for the business calendar list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterPeriod {
    All,
    Next7Days,
    Next30Days,
    Next90Days,
}

impl FilterPeriod {
    /// Window length in days, `None` for the unbounded filter.
    pub fn days(&self) -> Option<i64> {
        match self {
            FilterPeriod::All => None,
            FilterPeriod::Next7Days => Some(7),
            FilterPeriod::Next30Days => Some(30),
            FilterPeriod::Next90Days => Some(90),
        }
    }
}

/// Steps of the intake wizard, in order. Advancing past `Customer` is
/// submission, not a step change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    Address,
    Items,
    Schedule,
    Customer,
}

/// Ordered map of field key to validation message. One message per field;
/// the key is the serialized (camelCase) field name so callers can attach
/// messages to the inputs that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    entries: Vec<(String, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field. The first message for a field wins;
    /// later ones for the same key are dropped.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if !self.entries.iter().any(|(k, _)| *k == field) {
            self.entries.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field, message)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValidationErrors {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> serde::de::Visitor<'de> for MapVisitor {
            type Value = ValidationErrors;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to error messages")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<Self::Value, A::Error> {
                let mut errors = ValidationErrors::new();
                while let Some((field, message)) = access.next_entry::<String, String>()? {
                    errors.add(field, message);
                }
                Ok(errors)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

/// One item being offered while the draft is under edit. Everything except
/// the quantity starts empty; the validators decide what is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    /// Free-text item name (max 50 characters)
    pub item_name: String,
    pub category: Option<ItemCategory>,
    /// Number of identical items (1..=99)
    pub quantity: u32,
    pub years_since_purchase: Option<YearsBucket>,
    pub size: Option<ItemSize>,
}

impl ItemDraft {
    /// A freshly appended row: empty fields, quantity 1.
    pub fn new() -> Self {
        Self {
            item_name: String::new(),
            category: None,
            quantity: 1,
            years_since_purchase: None,
            size: None,
        }
    }
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// One of the three preferred pickup slots. A slot counts as populated only
/// when both halves are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferredSlot {
    /// Calendar date in YYYY-MM-DD
    pub date: Option<String>,
    pub time_band: Option<TimeBand>,
}

impl PreferredSlot {
    /// The date half, with blank strings treated as unset.
    pub fn date_value(&self) -> Option<&str> {
        self.date
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
    }

    pub fn is_complete(&self) -> bool {
        self.date_value().is_some() && self.time_band.is_some()
    }
}

/// The in-progress purchase request owned by the intake wizard. Created
/// empty, mutated in place, destroyed on submission or reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    // Step 1: pickup address
    /// Postal code in NNN-NNNN form
    pub postal_code: String,
    pub prefecture: Option<Prefecture>,
    /// City / ward (max 50 characters)
    pub city: String,
    /// Street number (max 50 characters)
    pub street_number: String,
    pub housing_type: Option<HousingType>,
    /// Building name and room number; mandatory for apartment housing
    pub building: String,
    /// Informational; only meaningful for apartment housing
    pub elevator_available: bool,

    // Step 2: items
    pub items: Vec<ItemDraft>,

    // Step 3: schedule
    pub preferred_slots: [PreferredSlot; 3],

    // Step 4: customer details
    /// Customer name (max 30 characters)
    pub customer_name: String,
    /// Reading in katakana (max 30 characters)
    pub customer_name_kana: String,
    pub customer_email: String,
    /// Phone number in NN(NN)-NN(NN)-NNNN form
    pub customer_phone: String,
    pub reason_for_use: Option<ReasonForUse>,
    pub other_notes: String,
    pub privacy_policy_agreed: bool,
}

impl DraftRequest {
    /// An empty draft, as the wizard hands it to a new session.
    pub fn new() -> Self {
        Self {
            postal_code: String::new(),
            prefecture: None,
            city: String::new(),
            street_number: String::new(),
            housing_type: None,
            building: String::new(),
            elevator_available: false,
            items: Vec::new(),
            preferred_slots: Default::default(),
            customer_name: String::new(),
            customer_name_kana: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            reason_for_use: None,
            other_notes: String::new(),
            privacy_policy_agreed: false,
        }
    }
}

impl Default for DraftRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated item as it is stored inside a request's item-list cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItem {
    pub item_name: String,
    pub category: ItemCategory,
    pub quantity: u32,
    pub years_since_purchase: YearsBucket,
    pub size: ItemSize,
}

/// Result of decoding a request's item-list cell. The cell is stored as a
/// JSON string; a cell that no longer parses is reported explicitly instead
/// of being silently coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedItems {
    Items(Vec<RequestItem>),
    Unparseable,
}

impl DecodedItems {
    /// Items for display. An unparseable cell renders as no items.
    pub fn items(&self) -> &[RequestItem] {
        match self {
            DecodedItems::Items(items) => items,
            DecodedItems::Unparseable => &[],
        }
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self, DecodedItems::Unparseable)
    }
}

/// Service request ID in format: "request::purchase::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: String,
    pub category: RequestCategory,
    pub status: RequestStatus,
    pub postal_code: String,
    pub prefecture: Option<Prefecture>,
    pub city: String,
    pub street_number: String,
    pub housing_type: Option<HousingType>,
    pub building: String,
    pub elevator_available: bool,
    /// JSON-encoded ordered item sequence; decode with [`ServiceRequest::decode_items`]
    pub item_list: String,
    pub preferred_date_1: Option<String>,
    pub preferred_time_1: Option<TimeBand>,
    pub preferred_date_2: Option<String>,
    pub preferred_time_2: Option<TimeBand>,
    pub preferred_date_3: Option<String>,
    pub preferred_time_3: Option<TimeBand>,
    pub customer_name: String,
    pub customer_name_kana: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub reason_for_use: Option<ReasonForUse>,
    pub other_notes: String,
    pub privacy_policy_agreed: bool,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

impl ServiceRequest {
    /// Generate a request ID from a timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("request::purchase::{}", epoch_millis)
    }

    /// Parse a request ID to extract its timestamp
    pub fn parse_id(id: &str) -> Result<u64, RequestIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "request" {
            return Err(RequestIdError::InvalidFormat);
        }
        if parts[1] != "purchase" {
            return Err(RequestIdError::InvalidCategory);
        }
        parts[2]
            .parse::<u64>()
            .map_err(|_| RequestIdError::InvalidTimestamp)
    }

    /// Extract epoch timestamp from the request ID for sorting
    pub fn extract_timestamp(&self) -> Result<u64, RequestIdError> {
        Self::parse_id(&self.id)
    }

    /// Encode an item sequence into the stored cell form.
    pub fn encode_items(items: &[RequestItem]) -> String {
        serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
    }

    /// Decode the item-list cell, reporting a cell that no longer parses.
    pub fn decode_items(&self) -> DecodedItems {
        match serde_json::from_str(&self.item_list) {
            Ok(items) => DecodedItems::Items(items),
            Err(_) => DecodedItems::Unparseable,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestIdError {
    InvalidFormat,
    InvalidCategory,
    InvalidTimestamp,
}

impl fmt::Display for RequestIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestIdError::InvalidFormat => write!(f, "Invalid request ID format"),
            RequestIdError::InvalidCategory => write!(f, "Invalid category in request ID"),
            RequestIdError::InvalidTimestamp => write!(f, "Invalid timestamp in request ID"),
        }
    }
}

impl std::error::Error for RequestIdError {}

/// One opening-hours range within a business day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHour {
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
}

/// Result of decoding a business date's hours cell.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedHours {
    Hours(Vec<BusinessHour>),
    Unparseable,
}

impl DecodedHours {
    /// Hour ranges for display. An unparseable cell renders as no hours.
    pub fn hours(&self) -> &[BusinessHour] {
        match self {
            DecodedHours::Hours(hours) => hours,
            DecodedHours::Unparseable => &[],
        }
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self, DecodedHours::Unparseable)
    }
}

/// One availability record of the business calendar. At most one record per
/// calendar date; a date with no record is simply unconfigured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDate {
    /// Calendar date in YYYY-MM-DD; the record key
    pub date: String,
    /// 0 = Sunday .. 6 = Saturday; always recomputed from `date` at write time
    pub day_of_week: u32,
    pub is_holiday: bool,
    pub special_day_label: Option<String>,
    pub memo: Option<String>,
    /// JSON-encoded hour ranges; decode with [`BusinessDate::decode_business_hours`].
    /// Empty or absent means open with unspecified hours.
    pub business_hours: Option<String>,
    /// Soft-delete marker, 0 for live records
    pub deleted_flag: u8,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

impl BusinessDate {
    /// English weekday name for the stored day-of-week index.
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }

    /// Encode an hour sequence into the stored cell form.
    pub fn encode_business_hours(hours: &[BusinessHour]) -> String {
        serde_json::to_string(hours).unwrap_or_else(|_| "[]".to_string())
    }

    /// Decode the hours cell, reporting a cell that no longer parses. An
    /// empty or absent cell decodes to zero hours, which is a valid state.
    pub fn decode_business_hours(&self) -> DecodedHours {
        let raw = match self.business_hours.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return DecodedHours::Hours(Vec::new()),
        };
        match serde_json::from_str(raw) {
            Ok(hours) => DecodedHours::Hours(hours),
            Err(_) => DecodedHours::Unparseable,
        }
    }
}

/// The per-day field set a bulk generation applies to every selected date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDayTemplate {
    pub is_holiday: bool,
    pub special_day_label: Option<String>,
    pub memo: Option<String>,
    pub business_hours: Vec<BusinessHour>,
}

impl Default for BusinessDayTemplate {
    fn default() -> Self {
        Self {
            is_holiday: false,
            special_day_label: None,
            memo: None,
            business_hours: vec![BusinessHour {
                start_time: "09:00".to_string(),
                end_time: "18:00".to_string(),
            }],
        }
    }
}

/// One date a bulk generation would write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDate {
    pub date: String,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u32,
    pub selected: bool,
}

impl CandidateDate {
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }
}

/// A previewed bulk generation: the closed date range expanded into
/// candidates, every one selected until toggled off. Abandoning the plan has
/// no side effects; only a commit writes anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkGenerationPlan {
    pub start_date: String,
    pub end_date: String,
    pub candidates: Vec<CandidateDate>,
}

impl BulkGenerationPlan {
    /// Flip a candidate in or out of the selection. Unknown dates are ignored.
    pub fn toggle(&mut self, date: &str) {
        if let Some(candidate) = self.candidates.iter_mut().find(|c| c.date == date) {
            candidate.selected = !candidate.selected;
        }
    }

    pub fn selected_dates(&self) -> Vec<String> {
        self.candidates
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.date.clone())
            .collect()
    }
}

/// Outcome of committing a bulk generation after every date has settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCommitOutcome {
    pub succeeded: usize,
    pub failed: usize,
    pub success_message: String,
}

/// One cell of the 6-week month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub date: String,
    /// Day-of-month number
    pub day: u32,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u32,
    pub in_current_month: bool,
    pub is_today: bool,
    pub record: Option<BusinessDate>,
}

/// A month projected onto a fixed 42-cell grid starting on the Sunday on or
/// before the 1st.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<GridCell>,
}

/// Contact inquiry ID in format: "inquiry::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: InquirySubject,
    pub message: String,
    pub status: InquiryStatus,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

impl ContactInquiry {
    /// Generate an inquiry ID from a timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("inquiry::{}", epoch_millis)
    }

    /// Parse an inquiry ID to extract its timestamp
    pub fn parse_id(id: &str) -> Result<u64, InquiryIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "inquiry" {
            return Err(InquiryIdError::InvalidFormat);
        }
        parts[1]
            .parse::<u64>()
            .map_err(|_| InquiryIdError::InvalidTimestamp)
    }

    /// Extract epoch timestamp from the inquiry ID for sorting
    pub fn extract_timestamp(&self) -> Result<u64, InquiryIdError> {
        Self::parse_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InquiryIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for InquiryIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InquiryIdError::InvalidFormat => write!(f, "Invalid inquiry ID format"),
            InquiryIdError::InvalidTimestamp => write!(f, "Invalid timestamp in inquiry ID"),
        }
    }
}

impl std::error::Error for InquiryIdError {}

/// Request to validate one wizard step against a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateStepRequest {
    pub draft: DraftRequest,
    pub step: WizardStep,
}

/// Validation result for one wizard step. Violations are data, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateStepResponse {
    pub valid: bool,
    pub errors: ValidationErrors,
}

/// Request to submit a completed draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequestRequest {
    pub draft: DraftRequest,
}

/// Response after a draft was accepted and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequestResponse {
    pub request: ServiceRequest,
    pub success_message: String,
}

/// Per-status request tallies for the admin dashboard, computed over the
/// unfiltered set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatusCounts {
    pub total: usize,
    pub new: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Response listing service requests, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListResponse {
    pub requests: Vec<ServiceRequest>,
    pub status_counts: RequestStatusCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestStatusRequest {
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestStatusResponse {
    pub request: ServiceRequest,
    pub success_message: String,
}

/// A rendered CSV export of the stored requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestExportResponse {
    pub csv_content: String,
    /// Suggested download name, e.g. "purchase_requests_2025-06-19.csv"
    pub filename: String,
    pub request_count: usize,
}

/// The dates the scheduling step may offer, ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDatesResponse {
    pub dates: Vec<String>,
}

/// Response listing business calendar records, ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDateListResponse {
    pub dates: Vec<BusinessDate>,
}

/// Request to create or fully overwrite one business date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertBusinessDateRequest {
    pub date: String,
    pub is_holiday: bool,
    pub special_day_label: Option<String>,
    pub memo: Option<String>,
    pub business_hours: Vec<BusinessHour>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertBusinessDateResponse {
    pub business_date: BusinessDate,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBusinessDateResponse {
    /// False when the date had no record; that is not an error
    pub deleted: bool,
    pub success_message: String,
}

/// Request to preview a bulk generation over a closed date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPlanRequest {
    pub start_date: String,
    pub end_date: String,
}

/// Request to write a template to every listed date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCommitRequest {
    pub dates: Vec<String>,
    pub template: BusinessDayTemplate,
}

/// Request to file a contact inquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInquiryRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<InquirySubject>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInquiryResponse {
    pub inquiry: ContactInquiry,
    pub success_message: String,
}

/// Response listing contact inquiries, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryListResponse {
    pub inquiries: Vec<ContactInquiry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInquiryStatusRequest {
    pub status: InquiryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInquiryStatusResponse {
    pub inquiry: ContactInquiry,
    pub success_message: String,
}
