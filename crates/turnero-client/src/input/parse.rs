use std::collections::HashMap;

use serde_json::Value;

use crate::engine::records::ProcedureRow;
use crate::input::{OPTIONAL_FIELDS, REQUIRED_FIELDS, invalid_input_error};
use crate::{ClientError, ClientResult};

/// Parses normalized procedure rows from a JSON array or a CSV with headers.
///
/// CSV may be comma or semicolon delimited. Unknown columns are ignored.
pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<ProcedureRow>> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Input source is empty."));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if trimmed.starts_with('{') || serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_input_format(
            "JSON input must be a top-level array of procedure objects.",
            "json_non_array",
        ));
    }

    if let Some(delimiter) = csv_delimiter(trimmed) {
        return parse_csv(trimmed, delimiter);
    }

    Err(ClientError::invalid_input_format(
        "Unsupported input format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> ClientResult<Vec<ProcedureRow>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of procedure objects.",
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                "JSON array entries must all be objects with procedure fields.",
            ));
        };

        rows.push(ProcedureRow {
            row: (index as i64) + 1,
            scheduled_date: read_optional_string(object.get("scheduled_date")),
            scheduled_time: read_optional_string(object.get("scheduled_time")),
            procedure_name: read_optional_string(object.get("procedure_name")),
            acquisition_room: read_optional_string(object.get("acquisition_room")),
            appointment_id: read_optional_string(object.get("appointment_id")),
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str, delimiter: u8) -> ClientResult<Vec<ProcedureRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_ascii_lowercase())
        .collect::<Vec<String>>();

    if REQUIRED_FIELDS
        .iter()
        .any(|required| !headers.iter().any(|header| header == required))
    {
        return Err(ClientError::input_schema_mismatch(
            field_names(&REQUIRED_FIELDS),
            field_names(&OPTIONAL_FIELDS),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.clone(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;

        rows.push(ProcedureRow {
            row: (row_index as i64) + 1,
            scheduled_date: value_for(&record, &index_by_name, "scheduled_date"),
            scheduled_time: value_for(&record, &index_by_name, "scheduled_time"),
            procedure_name: value_for(&record, &index_by_name, "procedure_name"),
            acquisition_room: value_for(&record, &index_by_name, "acquisition_room"),
            appointment_id: value_for(&record, &index_by_name, "appointment_id"),
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?;
    Some(value.to_string())
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;
    if current.is_null() {
        return None;
    }
    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }
    Some(current.to_string())
}

fn csv_delimiter(content: &str) -> Option<u8> {
    let first_line = content.lines().find(|line| !line.trim().is_empty())?;
    if first_line.contains(',') {
        return Some(b',');
    }
    if first_line.contains(';') {
        return Some(b';');
    }
    None
}

fn field_names(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|value| (*value).to_string()).collect()
}
