use chrono::Weekday;

use crate::contracts::types::{InputSummary, ShiftRow};
use crate::engine::date::{format_iso_date, parse_shift_date_arg};
use crate::engine::records::{ProcedureRow, RecordBatch};
use crate::engine::types::ShiftDate;
use crate::engine::window::{ShiftProfile, ShiftWindowCalculator};
use crate::input::parse::parse_source;
use crate::input::source::{SourceKind, resolve_source};
use crate::{ClientError, ClientResult};

pub(crate) struct LoadedRows {
    pub(crate) source_kind: SourceKind,
    pub(crate) rows: Vec<ProcedureRow>,
}

pub(crate) fn load_rows(path: &str, stdin_override: Option<String>) -> ClientResult<LoadedRows> {
    let source = resolve_source(path, stdin_override)?;
    let rows = parse_source(&source.content)?;
    Ok(LoadedRows {
        source_kind: source.source_kind,
        rows,
    })
}

/// Fails only when there were rows and none of them had a readable date.
pub(crate) fn ensure_usable(batch: &RecordBatch) -> ClientResult<()> {
    if batch.rows_read > 0 && batch.skipped.len() as i64 == batch.rows_read {
        return Err(ClientError::input_without_usable_rows(
            batch.rows_read,
            batch.skipped.clone(),
        ));
    }
    Ok(())
}

/// Rejects dates that do not parse and dates whose shift would end past the
/// last representable day.
pub(crate) fn parse_shift_dates(
    values: &[String],
    calculator: &ShiftWindowCalculator,
    command: &str,
) -> ClientResult<Vec<ShiftDate>> {
    values
        .iter()
        .map(|value| {
            parse_shift_date_arg(value)
                .map(|(date, marked)| calculator.shift_date(date, marked))
                .filter(|shift| calculator.bounds(shift).is_some())
                .ok_or_else(|| ClientError::invalid_shift_date(value, command))
        })
        .collect()
}

pub(crate) fn shift_row(calculator: &ShiftWindowCalculator, shift: &ShiftDate) -> Option<ShiftRow> {
    let window = calculator.window_for(shift.weekday(), shift.is_holiday);
    let (start, end) = calculator.bounds(shift)?;
    Some(ShiftRow {
        date: format_iso_date(&shift.date),
        weekday: weekday_name(shift.weekday()).to_string(),
        is_holiday: shift.is_holiday,
        profile: ShiftProfile::for_day(shift.weekday(), shift.is_holiday)
            .as_str()
            .to_string(),
        start: start.format("%Y-%m-%d %H:%M").to_string(),
        end: end.format("%Y-%m-%d %H:%M").to_string(),
        hours: window.duration_hours(),
    })
}

pub(crate) fn input_summary(source_kind: SourceKind, batch: &RecordBatch) -> InputSummary {
    InputSummary {
        source_used: source_kind.as_str().to_string(),
        rows_read: batch.rows_read,
        rows_kept: batch.records.len() as i64,
        rows_skipped: batch.skipped.len() as i64,
        filtered_by_room: batch.filtered_by_room,
        outside_range: batch.outside_range,
        forced: batch.forced,
    }
}

pub(crate) const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
