mod bill_text;
mod classify_text;
mod error_text;
mod estimate_text;
mod format;
mod json;
mod mode;
mod shifts_text;

use std::io;

use serde_json::Value;
use turnero_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "classify" => classify_text::render_classify(&success.data),
        "shifts" => shifts_text::render_shifts(&success.data),
        "estimate" => estimate_text::render_estimate(&success.data),
        "bill" => bill_text::render_bill(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}

fn input_summary_lines(input: &Value) -> Vec<String> {
    let mut entries = vec![
        ("Source:", format::text_field(input, "source_used").to_string()),
        ("Rows read:", format::int_field(input, "rows_read").to_string()),
        ("Rows kept:", format::int_field(input, "rows_kept").to_string()),
    ];
    for (label, key) in [
        ("Rows skipped:", "rows_skipped"),
        ("Other rooms:", "filtered_by_room"),
        ("Outside range:", "outside_range"),
        ("Forced:", "forced"),
    ] {
        let count = format::int_field(input, key);
        if count > 0 {
            entries.push((label, count.to_string()));
        }
    }

    let mut lines = vec!["Input:".to_string()];
    lines.extend(format::key_value_rows(&entries, 2));
    lines
}
