mod support;

use std::fs;

use serde_json::{Value, json};
use support::billing_testkit::{bill_with, payload, procedure, repeated, shifts, temp_home_in_tmp};
use turnero_client::commands::bill::BillRunOptions;

const REFERENCE_TARIFFS: &str = "[tariffs]\nhourly = 55000\nrx = 5300\ntac = 42400\n";

fn reference_batch() -> Vec<Value> {
    let groups = [
        ("RX DE TORAX", 10, "rx"),
        ("TAC CEREBRO", 5, "simple"),
        ("TAC TORAX ABDOMEN Y PELVIS", 2, "double"),
        ("TAC CEREBRO CUELLO TORAX", 1, "triple"),
    ];
    let mut rows = Vec::new();
    for (name, count, prefix) in groups {
        rows.extend(repeated("07-abr-2025", name, count, prefix));
    }
    rows
}

fn line<'a>(body: &'a Value, category: &str) -> &'a Value {
    body["data"]["lines"]
        .as_array()
        .and_then(|lines| lines.iter().find(|line| line["category"] == category))
        .unwrap_or(&Value::Null)
}

#[test]
fn reference_batch_bills_exact_totals() {
    let home = temp_home_in_tmp("turnero-bill-reference");
    assert!(home.is_ok());
    if let Ok((_guard, home_path)) = home {
        assert!(fs::write(home_path.join("config.toml"), REFERENCE_TARIFFS).is_ok());
        let body = payload(bill_with(
            &home_path,
            &reference_batch(),
            BillRunOptions {
                shift_dates: shifts(&["07-abr-2025"]),
                ..BillRunOptions::default()
            },
        ));

        assert_eq!(body["command"], "bill");
        let data = &body["data"];
        assert_eq!(data["hours_worked"], 14);
        assert_eq!(data["hourly_total"], 770_000);
        assert_eq!(data["grand_total"], 1_331_800);
        assert_eq!(data["tariffs"]["tac_double"], 84_800);
        assert_eq!(line(&body, "rx")["count"], 10);
        assert_eq!(line(&body, "tac_simple")["total"], 212_000);
        assert_eq!(line(&body, "tac_double")["count"], 2);
        assert_eq!(line(&body, "tac_triple")["total"], 127_200);
        assert_eq!(data["tac_study_count"], 8);
        assert_eq!(data["tac_billing_count"], data["tac_study_count"]);
        assert_eq!(data["reporting_count"], 12);
        assert!(data["config_path"].is_string());
    }
}

#[test]
fn holiday_suffix_switches_to_the_sunday_profile() {
    let home = temp_home_in_tmp("turnero-bill-holiday");
    assert!(home.is_ok());
    if let Ok((_guard, home_path)) = home {
        let body = payload(bill_with(
            &home_path,
            &[],
            BillRunOptions {
                shift_dates: shifts(&["17-abr-2025,F", "18-abr-2025"]),
                ..BillRunOptions::default()
            },
        ));
        let data = &body["data"];
        assert_eq!(data["hours_worked"], 23 + 15);
        assert_eq!(data["shifts"][0]["profile"], "sunday");
        assert_eq!(data["shifts"][0]["end"], "2025-04-18 08:00");
        assert_eq!(data["shifts"][1]["weekday"], "friday");
        assert_eq!(data["grand_total"], 38 * 55_000);
        assert!(data["config_path"].is_null());
    }
}

#[test]
fn hospital_rooms_are_excluded_unless_forced() {
    let home = temp_home_in_tmp("turnero-bill-rooms");
    assert!(home.is_ok());
    if let Ok((_guard, home_path)) = home {
        let rows = vec![
            procedure("2025-04-08", Some("21:00"), "TAC CEREBRO", "SCA-TAC", "A-1"),
            procedure("2025-04-08", Some("22:00"), "TAC CEREBRO", "HOS-TAC", "A-2"),
            procedure("2025-04-08", Some("23:00"), "TAC CEREBRO", "HOS-TAC", "A-3"),
        ];
        let body = payload(bill_with(
            &home_path,
            &rows,
            BillRunOptions {
                shift_dates: shifts(&["2025-04-08"]),
                force_include: vec!["A-3".to_string(), "A-404".to_string()],
                ..BillRunOptions::default()
            },
        ));
        let data = &body["data"];
        assert_eq!(data["input"]["rows_kept"], 2);
        assert_eq!(data["input"]["filtered_by_room"], 1);
        assert_eq!(data["input"]["forced"], 1);
        assert_eq!(line(&body, "tac_simple")["count"], 2);
        assert_eq!(data["unmatched_force_ids"], json!(["A-404"]));
    }
}

#[test]
fn by_time_bills_only_records_inside_chosen_shifts() {
    let home = temp_home_in_tmp("turnero-bill-by-time");
    assert!(home.is_ok());
    if let Ok((_guard, home_path)) = home {
        let rows = vec![
            procedure("2025-04-08", Some("18:00"), "RX TORAX", "SCA-RX", "A-1"),
            procedure("2025-04-09", Some("08:59"), "RX TORAX", "SCA-RX", "A-2"),
            procedure("2025-04-09", Some("09:00"), "RX TORAX", "SCA-RX", "A-3"),
            procedure("2025-04-08", Some("17:59"), "RX TORAX", "SCA-RX", "A-4"),
            procedure("2025-04-08", None, "RX TORAX", "SCA-RX", "A-5"),
        ];
        let body = payload(bill_with(
            &home_path,
            &rows,
            BillRunOptions {
                shift_dates: shifts(&["2025-04-08"]),
                by_time: true,
                ..BillRunOptions::default()
            },
        ));
        let data = &body["data"];
        assert_eq!(data["attribution"]["mode"], "chosen_shifts_only");
        assert_eq!(data["attribution"]["billed_records"], 2);
        assert_eq!(data["attribution"]["outside_shifts"], 2);
        assert_eq!(data["attribution"]["untimed"], 1);
        assert_eq!(line(&body, "rx")["count"], 2);
    }
}

#[test]
fn date_range_limits_billed_records() {
    let home = temp_home_in_tmp("turnero-bill-range");
    assert!(home.is_ok());
    if let Ok((_guard, home_path)) = home {
        let mut rows = repeated("2025-03-31", "RX TORAX", 3, "march");
        rows.extend(repeated("2025-04-01", "RX TORAX", 2, "april"));
        let body = payload(bill_with(
            &home_path,
            &rows,
            BillRunOptions {
                from: Some("2025-04-01".to_string()),
                to: Some("30-abr-2025".to_string()),
                ..BillRunOptions::default()
            },
        ));
        assert_eq!(body["data"]["input"]["outside_range"], 3);
        assert_eq!(line(&body, "rx")["count"], 2);
        assert_eq!(body["data"]["from"], "2025-04-01");
    }
}

#[test]
fn unreadable_rows_are_reported_without_failing_the_batch() {
    let home = temp_home_in_tmp("turnero-bill-skips");
    assert!(home.is_ok());
    if let Ok((_guard, home_path)) = home {
        let rows = vec![
            procedure("2025-04-08", None, "RX TORAX", "SCA-RX", "A-1"),
            procedure("mañana", None, "RX TORAX", "SCA-RX", "A-2"),
            procedure("2025-04-08", Some("99:99"), "RX TORAX", "SCA-RX", "A-3"),
        ];
        let body = payload(bill_with(&home_path, &rows, BillRunOptions::default()));
        let data = &body["data"];
        assert_eq!(data["input"]["rows_skipped"], 1);
        assert_eq!(data["issues"][0]["row"], 2);
        assert_eq!(data["issues"][0]["code"], "unparseable_date");
        assert_eq!(data["time_issues"][0]["row"], 3);
        assert_eq!(line(&body, "rx")["count"], 2);
    }
}

#[test]
fn batch_with_no_readable_rows_fails() {
    let home = temp_home_in_tmp("turnero-bill-unusable");
    assert!(home.is_ok());
    if let Ok((_guard, home_path)) = home {
        let rows = vec![
            procedure("ayer", None, "RX TORAX", "SCA-RX", "A-1"),
            procedure("", None, "RX TORAX", "SCA-RX", "A-2"),
        ];
        let result = bill_with(&home_path, &rows, BillRunOptions::default());
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "input_without_usable_rows");
            let skipped = error
                .data
                .as_ref()
                .and_then(|data| data["skipped"].as_array().map(Vec::len));
            assert_eq!(skipped, Some(2));
        }
    }
}

#[test]
fn empty_input_yields_a_zeroed_bill() {
    let home = temp_home_in_tmp("turnero-bill-empty");
    assert!(home.is_ok());
    if let Ok((_guard, home_path)) = home {
        let body = payload(bill_with(&home_path, &[], BillRunOptions::default()));
        let data = &body["data"];
        assert_eq!(data["grand_total"], 0);
        assert_eq!(data["hours_worked"], 0);
        assert_eq!(data["reporting_count"], 0);
    }
}

#[test]
fn invalid_shift_date_is_rejected_with_its_value() {
    let home = temp_home_in_tmp("turnero-bill-bad-shift");
    assert!(home.is_ok());
    if let Ok((_guard, home_path)) = home {
        let result = bill_with(
            &home_path,
            &[],
            BillRunOptions {
                shift_dates: shifts(&["31-feb-2025"]),
                ..BillRunOptions::default()
            },
        );
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert_eq!(
                error.data.as_ref().map(|data| data["value"].clone()),
                Some(json!("31-feb-2025"))
            );
        }
    }
}

#[test]
fn invalid_config_file_stops_the_run() {
    let home = temp_home_in_tmp("turnero-bill-bad-config");
    assert!(home.is_ok());
    if let Ok((_guard, home_path)) = home {
        assert!(fs::write(home_path.join("config.toml"), "[tariffs]\nrx = \"free\"\n").is_ok());
        let result = bill_with(&home_path, &[], BillRunOptions::default());
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "config_invalid");
        }
    }
}
