use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRow {
    pub procedure_name: String,
    pub normalized_name: String,
    pub exam_type: String,
    pub regions: Vec<String>,
    pub region_count: u32,
    pub is_double: bool,
    pub is_triple: bool,
    pub billing_category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyData {
    pub rows: Vec<ClassificationRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShiftRow {
    pub date: String,
    pub weekday: String,
    pub is_holiday: bool,
    pub profile: String,
    pub start: String,
    pub end: String,
    pub hours: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShiftsData {
    pub config_path: Option<String>,
    pub shifts: Vec<ShiftRow>,
    pub total_hours: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSummary {
    pub source_used: String,
    pub rows_read: i64,
    pub rows_kept: i64,
    pub rows_skipped: i64,
    pub filtered_by_room: i64,
    pub outside_range: i64,
    pub forced: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyVolumeRow {
    pub date: String,
    pub exam_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    pub rank: usize,
    pub date: String,
    pub weekday: String,
    pub kind: String,
    pub total_volume: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateData {
    pub policy_version: String,
    pub config_path: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub input: InputSummary,
    pub mean: Option<f64>,
    pub threshold: Option<f64>,
    pub daily_volumes: Vec<DailyVolumeRow>,
    pub candidates: Vec<CandidateRow>,
    pub insufficient_evidence: bool,
    pub issues: Vec<RowIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TariffsRow {
    pub hourly: i64,
    pub rx: i64,
    pub tac: i64,
    pub tac_double: i64,
    pub tac_triple: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryLine {
    pub category: String,
    pub count: i64,
    pub rate: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributionSummary {
    pub mode: String,
    pub billed_records: i64,
    pub outside_shifts: i64,
    pub untimed: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillData {
    pub config_path: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub tariffs: TariffsRow,
    pub input: InputSummary,
    pub attribution: AttributionSummary,
    pub lines: Vec<CategoryLine>,
    pub unbilled_count: i64,
    pub hours_worked: u32,
    pub hourly_total: i64,
    pub grand_total: i64,
    pub tac_study_count: i64,
    pub tac_billing_count: i64,
    pub reporting_count: i64,
    pub shifts: Vec<ShiftRow>,
    pub issues: Vec<RowIssue>,
    pub time_issues: Vec<RowIssue>,
    pub unmatched_force_ids: Vec<String>,
}
