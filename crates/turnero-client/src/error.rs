use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::RowIssue;

pub(crate) const INPUT_HELP_COMMAND: &str = "turnero bill --help";
pub(crate) const INPUT_HELP_SECTION_TITLE: &str = "Input Troubleshooting";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_input_help(self) -> Self {
        self.with_input_help_data(json!({}))
    }

    pub fn with_input_help_data(self, data: Value) -> Self {
        self.with_data(merge_input_help_data(data))
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `turnero {cmd} --help` for usage."),
            None => "Run `turnero --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_shift_date(value: &str, command: &str) -> Self {
        Self::invalid_argument_with_recovery(
            &format!("Shift date `{value}` is not a valid calendar date."),
            vec![
                "Use `dd-mmm-yyyy` with a Spanish month (e.g. `08-abr-2025`) or `YYYY-MM-DD`."
                    .to_string(),
                "Append `,F` to mark a holiday shift (e.g. `18-abr-2025,F`).".to_string(),
                format!("Run `turnero {command} --help` for usage."),
            ],
        )
        .with_data(json!({
            "command_hint": command,
            "value": value,
        }))
    }

    pub fn invalid_input_format(message: &str, received_format: &str) -> Self {
        Self::invalid_argument_with_recovery(
            message,
            vec![
                "Provide a supported input format (JSON array or CSV).".to_string(),
                "Run `turnero bill --help` to confirm field requirements.".to_string(),
            ],
        )
        .with_input_help_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    pub fn input_schema_mismatch(
        required_headers: Vec<String>,
        optional_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        Self::new(
            "input_schema_mismatch",
            "CSV headers do not include every required procedure field.",
            vec![
                "Include all required headers; optional headers may be omitted.".to_string(),
                "Run `turnero bill --help` to review required and optional fields.".to_string(),
            ],
        )
        .with_input_help_data(json!({
            "required_headers": required_headers,
            "optional_headers": optional_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn input_without_usable_rows(rows_read: i64, skipped: Vec<RowIssue>) -> Self {
        Self::new(
            "input_without_usable_rows",
            &format!("None of the {rows_read} input rows could be read as a procedure."),
            vec![
                "Check that `scheduled_date` uses `dd-mmm-yyyy` or `YYYY-MM-DD`.".to_string(),
                "Check that `procedure_name` and `acquisition_room` are present.".to_string(),
            ],
        )
        .with_input_help_data(json!({
            "rows_read": rows_read,
            "skipped": skipped,
        }))
    }

    pub fn config_invalid(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_invalid",
            &format!("Configuration at `{location}` could not be loaded: {detail}"),
            vec![
                format!("Fix or remove `{location}` to fall back to built-in tariffs."),
                "Or pass another file with `--config <path>`.".to_string(),
            ],
        )
        .with_data(json!({
            "config_path": location,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

fn merge_input_help_data(mut data: Value) -> Value {
    if !data.is_object() {
        data = json!({});
    }

    if let Some(object) = data.as_object_mut() {
        object.insert(
            "help_command".to_string(),
            Value::String(INPUT_HELP_COMMAND.to_string()),
        );
        object.insert(
            "help_section_title".to_string(),
            Value::String(INPUT_HELP_SECTION_TITLE.to_string()),
        );
    }

    data
}

pub type ClientResult<T> = Result<T, ClientError>;
