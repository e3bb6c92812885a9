use std::collections::BTreeSet;

use chrono::NaiveTime;
use tracing::{debug, warn};

use crate::contracts::types::RowIssue;
use crate::engine::classify::ExamClassifier;
use crate::engine::date::{EmbeddedTime, parse_record_date, parse_time};
use crate::engine::plan::{AttributionMode, RoomFilter, RunPlan};
use crate::engine::types::ProcedureRecord;
use crate::engine::window::ShiftWindowCalculator;

/// A normalized input row, before any parsing of its cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcedureRow {
    pub row: i64,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub procedure_name: Option<String>,
    pub acquisition_room: Option<String>,
    pub appointment_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    pub rows_read: i64,
    pub records: Vec<ProcedureRecord>,
    pub forced: i64,
    pub filtered_by_room: i64,
    pub outside_range: i64,
    /// Rows dropped because their date could not be read.
    pub skipped: Vec<RowIssue>,
    /// Rows kept without a time because the time could not be read.
    pub time_issues: Vec<RowIssue>,
    pub unmatched_force_ids: Vec<String>,
}

/// Maps input rows to classified records, dropping unreadable rows.
pub fn build_records(
    rows: &[ProcedureRow],
    plan: &RunPlan,
    filter: &RoomFilter,
    classifier: &ExamClassifier,
) -> RecordBatch {
    let mut batch = RecordBatch {
        rows_read: rows.len() as i64,
        ..RecordBatch::default()
    };
    let mut seen_force_ids = BTreeSet::<String>::new();

    for row in rows {
        let Some(raw_date) = non_blank(row.scheduled_date.as_deref()) else {
            warn!(row = row.row, "skipping row without a scheduled date");
            batch.skipped.push(row_issue(
                row.row,
                "scheduled_date",
                "missing_value",
                "Scheduled date is empty.",
                None,
            ));
            continue;
        };
        let Some((scheduled_date, embedded)) = parse_record_date(raw_date) else {
            warn!(
                row = row.row,
                value = raw_date,
                "skipping row with unreadable date"
            );
            batch.skipped.push(row_issue(
                row.row,
                "scheduled_date",
                "unparseable_date",
                "Scheduled date could not be read as a calendar date.",
                Some(raw_date),
            ));
            continue;
        };

        let scheduled_time = match non_blank(row.scheduled_time.as_deref()) {
            Some(raw_time) => match parse_time(raw_time) {
                Some(time) => Some(time),
                None => {
                    warn!(row = row.row, value = raw_time, "ignoring unreadable time");
                    batch.time_issues.push(row_issue(
                        row.row,
                        "scheduled_time",
                        "unparseable_time",
                        "Scheduled time could not be read; the row is kept without a time.",
                        Some(raw_time),
                    ));
                    embedded_time(row.row, embedded, &mut batch.time_issues)
                }
            },
            None => embedded_time(row.row, embedded, &mut batch.time_issues),
        };

        let appointment_id = non_blank(row.appointment_id.as_deref()).map(str::to_string);
        let room = row.acquisition_room.as_deref().unwrap_or_default().trim();
        let forced = plan.is_forced(appointment_id.as_deref());
        if forced {
            if let Some(id) = appointment_id.as_deref() {
                seen_force_ids.insert(id.to_string());
            }
            batch.forced += 1;
        } else if !filter.accepts(room) {
            batch.filtered_by_room += 1;
            continue;
        } else if !plan.range().contains(scheduled_date) {
            batch.outside_range += 1;
            continue;
        }

        let name = row.procedure_name.as_deref().unwrap_or_default().trim();
        let record = ProcedureRecord::new(scheduled_date, name, room, classifier.classify(name))
            .with_time(scheduled_time)
            .with_appointment_id(appointment_id);
        batch.records.push(record);
    }

    batch.unmatched_force_ids = plan
        .force_include()
        .iter()
        .filter(|id| !seen_force_ids.contains(*id))
        .cloned()
        .collect();
    for id in &batch.unmatched_force_ids {
        warn!(
            appointment_id = id.as_str(),
            "forced appointment id not found in input"
        );
    }

    debug!(
        rows_read = batch.rows_read,
        kept = batch.records.len(),
        skipped = batch.skipped.len(),
        filtered_by_room = batch.filtered_by_room,
        outside_range = batch.outside_range,
        "built procedure records"
    );
    batch
}

#[derive(Debug, Clone, Default)]
pub struct Attribution {
    pub billed: Vec<ProcedureRecord>,
    pub outside_shifts: i64,
    pub untimed: i64,
}

/// Selects the records a run bills, per the plan's attribution mode.
pub fn attribute(
    records: &[ProcedureRecord],
    plan: &RunPlan,
    calculator: &ShiftWindowCalculator,
) -> Attribution {
    if plan.attribution() == AttributionMode::AllRecords {
        return Attribution {
            billed: records.to_vec(),
            ..Attribution::default()
        };
    }

    let mut attribution = Attribution::default();
    for record in records {
        if plan.is_forced(record.appointment_id()) {
            attribution.billed.push(record.clone());
            continue;
        }
        let Some(timestamp) = record.timestamp() else {
            attribution.untimed += 1;
            continue;
        };
        match calculator.assign_to_shift(timestamp) {
            Some(shift) if plan.is_chosen_shift(shift.date) => {
                attribution.billed.push(record.clone());
            }
            _ => attribution.outside_shifts += 1,
        }
    }
    attribution
}

fn embedded_time(
    row: i64,
    embedded: EmbeddedTime<'_>,
    issues: &mut Vec<RowIssue>,
) -> Option<NaiveTime> {
    if let EmbeddedTime::Unreadable(raw) = embedded {
        warn!(row, value = raw, "ignoring unreadable time in date cell");
        issues.push(row_issue(
            row,
            "scheduled_date",
            "unparseable_time",
            "Time in the date cell could not be read; the row is kept without a time.",
            Some(raw),
        ));
    }
    embedded.time()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn row_issue(
    row: i64,
    field: &str,
    code: &str,
    description: &str,
    received: Option<&str>,
) -> RowIssue {
    RowIssue {
        row,
        field: field.to_string(),
        code: code.to_string(),
        description: description.to_string(),
        received: received.map(str::to_string),
    }
}
