#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::{Builder, TempDir};
use turnero_client::commands::bill::{self, BillRunOptions};
use turnero_client::commands::estimate::{self, EstimateRunOptions};
use turnero_client::{ClientResult, SuccessEnvelope};

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("turnero-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn write_fixture_json(base: &Path, name: &str, rows: &[Value]) -> std::io::Result<PathBuf> {
    let path = base.join(name);
    let body = serde_json::to_string_pretty(rows).map_err(std::io::Error::other)?;
    fs::write(&path, body)?;
    Ok(path)
}

pub fn procedure(date: &str, time: Option<&str>, name: &str, room: &str, id: &str) -> Value {
    json!({
        "scheduled_date": date,
        "scheduled_time": time,
        "procedure_name": name,
        "acquisition_room": room,
        "appointment_id": id
    })
}

/// Repeats one procedure `count` times on a date, with ids `<prefix>-<n>`.
pub fn repeated(date: &str, name: &str, count: usize, prefix: &str) -> Vec<Value> {
    (0..count)
        .map(|index| {
            let id = format!("{prefix}-{index}");
            procedure(date, Some("20:00"), name, "SCA-TAC1", &id)
        })
        .collect()
}

pub fn bill_with<'a>(
    home: &'a Path,
    rows: &[Value],
    mut options: BillRunOptions<'a>,
) -> ClientResult<SuccessEnvelope> {
    options.stdin_override = Some(serde_json::to_string(rows).unwrap_or_default());
    options.path = "-".to_string();
    options.home_override = Some(home);
    bill::run_with_options(options)
}

pub fn estimate_with(
    home: &Path,
    rows: &[Value],
    from: Option<&str>,
    to: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    estimate::run_with_options(EstimateRunOptions {
        path: "-".to_string(),
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        config_path: None,
        home_override: Some(home),
        stdin_override: Some(serde_json::to_string(rows).unwrap_or_default()),
    })
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(body) = value {
            return body;
        }
    }
    Value::Null
}

pub fn shifts(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
