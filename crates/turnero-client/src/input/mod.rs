pub(crate) mod parse;
pub(crate) mod source;

use crate::ClientError;

pub(crate) const REQUIRED_FIELDS: [&str; 3] =
    ["scheduled_date", "procedure_name", "acquisition_room"];
pub(crate) const OPTIONAL_FIELDS: [&str; 2] = ["scheduled_time", "appointment_id"];

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide a JSON array or CSV of procedure rows via path or stdin.".to_string(),
            "Run `turnero bill --help` to confirm the row fields.".to_string(),
        ],
    )
    .with_input_help()
}
