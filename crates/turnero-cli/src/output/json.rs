use std::io;

use serde::Serialize;
use serde_json::{Value, json};
use turnero_client::contracts::envelope::failure_from_error;
use turnero_client::{ClientError, SuccessEnvelope};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "classify" => render_classify_json(&success.data),
        "shifts" | "estimate" | "bill" => json!({
            "ok": true,
            "version": JSON_VERSION,
            "data": success.data.clone()
        }),
        _ => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{}`",
                success.command
            )));
        }
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

// Classification output is a bare array so it pipes straight into `jq '.[]'`.
fn render_classify_json(data: &Value) -> Value {
    data.get("rows")
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
