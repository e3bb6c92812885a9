use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Value, json};

const EXPECTED_ROOT_HELP: &str = "Turnero - on-call shift hours and billing

Usage:
  turnero <command>

Start here:
  turnero shifts <date>
  turnero bill --help
";

static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

struct CliOutput {
    code: Option<i32>,
    stdout: String,
}

fn unique_test_home() -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(value) => value.as_nanos(),
        Err(_) => 0,
    };
    let sequence = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let pid = std::process::id();
    path.push(format!("turnero-cli-test-{pid}-{stamp}-{sequence}"));
    path
}

fn run_cli_in_home_with_input(home: &Path, args: &[&str], input: Option<&str>) -> CliOutput {
    let mut command = Command::new(env!("CARGO_BIN_EXE_turnero"));
    command.args(args);
    command.env("TURNERO_HOME", home);
    command.env_remove("TURNERO_LOG");
    command.stdin(if input.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let child_spawn = command.spawn();
    assert!(child_spawn.is_ok());
    if let Ok(mut child) = child_spawn {
        if let Some(body) = input
            && let Some(mut pipe) = child.stdin.take()
        {
            let write_result = pipe.write_all(body.as_bytes());
            assert!(write_result.is_ok());
        }

        let output = child.wait_with_output();
        assert!(output.is_ok());
        if let Ok(result) = output {
            let stdout = String::from_utf8(result.stdout);
            assert!(stdout.is_ok());
            if let Ok(stdout_text) = stdout {
                return CliOutput {
                    code: result.status.code(),
                    stdout: stdout_text,
                };
            }
        }
    }

    CliOutput {
        code: None,
        stdout: String::new(),
    }
}

fn run_cli_with_input(args: &[&str], input: Option<&str>) -> CliOutput {
    run_cli_in_home_with_input(&unique_test_home(), args, input)
}

fn run_cli(args: &[&str]) -> CliOutput {
    run_cli_with_input(args, None)
}

fn write_home_file(home: &Path, name: &str, body: &str) -> PathBuf {
    let create_home = fs::create_dir_all(home);
    assert!(create_home.is_ok());

    let path = home.join(name);
    let write = fs::write(&path, body);
    assert!(write.is_ok());
    path
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok(), "not JSON: {body}");
    if let Ok(value) = parsed {
        return value;
    }
    Value::Null
}

fn tuesday_rows() -> String {
    json!([
        {
            "scheduled_date": "08-abr-2025",
            "scheduled_time": "21:10",
            "procedure_name": "TAC DE CEREBRO",
            "acquisition_room": "SCA-TAC1",
            "appointment_id": "A-1"
        },
        {
            "scheduled_date": "08-abr-2025",
            "scheduled_time": "23:45",
            "procedure_name": "RX DE TORAX",
            "acquisition_room": "SJ-RX2",
            "appointment_id": "A-2"
        },
        {
            "scheduled_date": "08-abr-2025",
            "scheduled_time": "22:00",
            "procedure_name": "TAC DE CEREBRO",
            "acquisition_room": "HOS-TAC",
            "appointment_id": "A-3"
        }
    ])
    .to_string()
}

fn assert_text_error_contract(body: &str, code: &str) {
    assert!(body.contains("Could not complete the command."));
    assert!(body.contains(&format!("  Error:    {code}")));
    assert!(body.contains("  Details:"));
    assert!(body.contains("What to do next:"));
}

fn assert_json_error_contract(body: &str, code: &str) -> Value {
    let payload = parse_json(body);
    assert_eq!(payload["error"]["code"], Value::String(code.to_string()));
    assert!(payload["error"]["message"].is_string());
    assert!(payload["error"]["recovery_steps"].is_array());
    payload
}

fn assert_pipe_close_does_not_panic(args: &[&str], expect_success: bool) {
    let mut producer = Command::new(env!("CARGO_BIN_EXE_turnero"));
    producer.args(args);
    producer.env("TURNERO_HOME", unique_test_home());
    producer.stdin(Stdio::null());
    producer.stdout(Stdio::piped());
    producer.stderr(Stdio::piped());

    let producer_spawn = producer.spawn();
    assert!(producer_spawn.is_ok());
    if let Ok(mut producer_child) = producer_spawn {
        let producer_stdout = producer_child.stdout.take();
        let producer_stderr = producer_child.stderr.take();
        assert!(producer_stdout.is_some());
        assert!(producer_stderr.is_some());

        if let Some(stdout_pipe) = producer_stdout {
            let mut reader = BufReader::new(stdout_pipe);
            let mut first_line = String::new();
            let read_result = reader.read_line(&mut first_line);
            assert!(read_result.is_ok());
            assert!(!first_line.is_empty());
            drop(reader);
        }

        let status = producer_child.wait();
        assert!(status.is_ok());
        if let Ok(exit_status) = status {
            assert_eq!(exit_status.success(), expect_success);
        }

        if let Some(mut stderr_pipe) = producer_stderr {
            let mut stderr_text = String::new();
            assert!(stderr_pipe.read_to_string(&mut stderr_text).is_ok());
            assert!(!stderr_text.contains("Broken pipe"));
            assert!(!stderr_text.contains("panicked"));
        }
    }
}

#[test]
fn root_command_uses_short_plaintext_help() {
    let output = run_cli(&[]);
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, EXPECTED_ROOT_HELP);
}

#[test]
fn help_and_version_return_success_output() {
    let help = run_cli(&["--help"]);
    assert_eq!(help.code, Some(0));
    let banner = "Turnero - on-call shift hours and billing";
    assert!(help.stdout.starts_with(banner));
    assert!(help.stdout.contains("turnero bill --help"));

    let version = run_cli(&["--version"]);
    assert_eq!(version.code, Some(0));
    assert_eq!(version.stdout.trim(), "turnero 0.1.0");
}

#[test]
fn bill_help_documents_the_input_schema() {
    let output = run_cli(&["bill", "--help"]);
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Input schema:"));
    assert!(output.stdout.contains("scheduled_date (required)"));
    assert!(output.stdout.contains("--force-include"));
}

#[test]
fn classify_json_is_a_bare_array() {
    let output = run_cli(&[
        "classify",
        "TAC DE TORAX, ABDOMEN Y PELVIS",
        "RX DE TORAX",
        "--json",
    ]);
    assert_eq!(output.code, Some(0));
    let payload = parse_json(&output.stdout);
    assert!(payload.is_array());
    assert_eq!(payload[0]["billing_category"], json!("tac_double"));
    assert_eq!(payload[1]["exam_type"], json!("RX"));
}

#[test]
fn shifts_report_windows_and_total_hours() {
    let output = run_cli(&["shifts", "2025-04-08", "2025-04-18,F", "--json"]);
    assert_eq!(output.code, Some(0));
    let payload = parse_json(&output.stdout);
    assert_eq!(payload["ok"], json!(true));
    assert_eq!(payload["data"]["total_hours"], json!(38));
    assert_eq!(payload["data"]["shifts"][0]["hours"], json!(14));
    assert_eq!(payload["data"]["shifts"][1]["profile"], json!("saturday"));
    assert_eq!(payload["data"]["config_path"], Value::Null);

    let text = run_cli(&["shifts", "2025-04-08"]);
    assert_eq!(text.code, Some(0));
    assert!(text.stdout.starts_with("1 shift(s), 14 hours"));
}

#[test]
fn bill_reads_stdin_and_applies_default_tariffs() {
    let rows = tuesday_rows();
    let output = run_cli_with_input(
        &["bill", "-", "--shift", "08-abr-2025", "--json"],
        Some(rows.as_str()),
    );
    assert_eq!(output.code, Some(0));
    let payload = parse_json(&output.stdout);
    let data = &payload["data"];
    assert_eq!(data["input"]["source_used"], json!("stdin"));
    assert_eq!(data["input"]["filtered_by_room"], json!(1));
    assert_eq!(data["hours_worked"], json!(14));
    assert_eq!(data["hourly_total"], json!(770_000));
    assert_eq!(data["grand_total"], json!(770_000 + 42_400 + 5_300));
}

#[test]
fn bill_force_include_keeps_excluded_room() {
    let rows = tuesday_rows();
    let output = run_cli_with_input(
        &[
            "bill",
            "-",
            "--shift",
            "2025-04-08",
            "--force-include",
            "A-3",
            "--json",
        ],
        Some(rows.as_str()),
    );
    assert_eq!(output.code, Some(0));
    let payload = parse_json(&output.stdout);
    assert_eq!(payload["data"]["input"]["forced"], json!(1));
    assert_eq!(payload["data"]["tac_study_count"], json!(2));
}

#[test]
fn bill_text_output_reads_a_file_and_home_config() {
    let home = unique_test_home();
    write_home_file(&home, "config.toml", "[tariffs]\nhourly = 60000\n");
    let rows_path = write_home_file(
        &home,
        "rows.csv",
        "scheduled_date;procedure_name;acquisition_room\n2025-04-08;RX DE TORAX;SCA-RX1\n",
    );
    let rows_arg = rows_path.display().to_string();

    let output = run_cli_in_home_with_input(
        &home,
        &["bill", rows_arg.as_str(), "--shift", "2025-04-08"],
        None,
    );
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.starts_with("Grand total: $845.300"));
    assert!(output.stdout.contains("Source:"));
    assert!(output.stdout.contains("file"));
}

#[test]
fn invalid_shift_date_is_a_user_error() {
    let output = run_cli(&["bill", "rows.csv", "--shift", "31-feb-2025", "--json"]);
    assert_eq!(output.code, Some(1));
    let payload = assert_json_error_contract(&output.stdout, "invalid_argument");
    assert_eq!(payload["ok"], json!(false));
    assert_eq!(payload["data"]["value"], json!("31-feb-2025"));
}

#[test]
fn shift_date_at_the_calendar_limit_is_a_user_error() {
    let output = run_cli(&["shifts", "31-12-262142", "--json"]);
    assert_eq!(output.code, Some(1));
    let payload = assert_json_error_contract(&output.stdout, "invalid_argument");
    assert_eq!(payload["data"]["value"], json!("31-12-262142"));
}

#[test]
fn missing_shift_flag_reports_parse_error() {
    let output = run_cli(&["bill", "rows.csv"]);
    assert_eq!(output.code, Some(1));
    assert_text_error_contract(&output.stdout, "invalid_argument");
    assert!(output.stdout.contains("turnero bill --help"));
    assert!(!output.stdout.contains("For more information"));
}

#[test]
fn unreadable_rows_report_input_without_usable_rows() {
    let output = run_cli_with_input(
        &["bill", "-", "--shift", "2025-04-08"],
        Some("scheduled_date,procedure_name,acquisition_room\nsomeday,TAC DE CEREBRO,SCA-1\n"),
    );
    assert_eq!(output.code, Some(1));
    assert_text_error_contract(&output.stdout, "input_without_usable_rows");
    assert!(output.stdout.contains("Rows skipped:"));
    assert!(output.stdout.contains("row 1"));
}

#[test]
fn broken_home_config_is_reported() {
    let home = unique_test_home();
    write_home_file(&home, "config.toml", "[tariffs\n");
    let output = run_cli_in_home_with_input(&home, &["shifts", "2025-04-08", "--json"], None);
    assert_eq!(output.code, Some(1));
    assert_json_error_contract(&output.stdout, "config_invalid");
}

#[test]
fn estimate_without_evidence_succeeds_with_message() {
    let rows = tuesday_rows();
    let output = run_cli_with_input(&["estimate", "-"], Some(rows.as_str()));
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.starts_with("No shift dates suggested."));
}

#[test]
fn success_output_pipe_close_does_not_panic() {
    assert_pipe_close_does_not_panic(&["shifts", "2025-04-08", "2025-04-09"], true);
}

#[test]
fn error_output_pipe_close_does_not_panic() {
    assert_pipe_close_does_not_panic(&["bill", "--nope"], false);
}
