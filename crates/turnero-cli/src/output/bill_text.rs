use std::io;

use serde_json::Value;

use super::format::{self, Align, Column, format_money};
use super::shifts_text::shift_table;

pub fn render_bill(data: &Value) -> io::Result<String> {
    let lines_data = data
        .get("lines")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("bill output requires category lines"))?;

    let grand_total = format_money(format::int_field(data, "grand_total"));
    let mut lines = vec![
        format!("Grand total: {grand_total}"),
        String::new(),
        "Exams:".to_string(),
    ];

    let columns = [
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Count",
            align: Align::Right,
        },
        Column {
            name: "Rate",
            align: Align::Right,
        },
        Column {
            name: "Total",
            align: Align::Right,
        },
    ];
    let mut rows = lines_data
        .iter()
        .map(|line| {
            vec![
                format::text_field(line, "category").to_string(),
                format::int_field(line, "count").to_string(),
                format_money(format::int_field(line, "rate")),
                format_money(format::int_field(line, "total")),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    let hourly_rate = data
        .get("tariffs")
        .map_or(0, |tariffs| format::int_field(tariffs, "hourly"));
    rows.push(vec![
        "hours".to_string(),
        format::int_field(data, "hours_worked").to_string(),
        format_money(hourly_rate),
        format_money(format::int_field(data, "hourly_total")),
    ]);
    lines.extend(format::render_table(&columns, &rows));

    lines.push(String::new());
    lines.push("Counts:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("TAC studies:", format::int_field(data, "tac_study_count").to_string()),
            (
                "TAC billing units:",
                format::int_field(data, "tac_billing_count").to_string(),
            ),
            ("Reports:", format::int_field(data, "reporting_count").to_string()),
            ("Not billed:", format::int_field(data, "unbilled_count").to_string()),
        ],
        2,
    ));

    let shifts = format::array_field(data, "shifts");
    if !shifts.is_empty() {
        lines.push(String::new());
        lines.push("Shifts:".to_string());
        lines.extend(shift_table(shifts));
    }

    if let Some(input) = data.get("input") {
        lines.push(String::new());
        lines.extend(super::input_summary_lines(input));
    }
    if let Some(attribution) = data.get("attribution")
        && format::text_field(attribution, "mode") == "chosen_shifts_only"
    {
        lines.extend(format::key_value_rows(
            &[
                (
                    "Outside shifts:",
                    format::int_field(attribution, "outside_shifts").to_string(),
                ),
                ("Without time:", format::int_field(attribution, "untimed").to_string()),
            ],
            2,
        ));
    }

    let time_issues = format::array_field(data, "time_issues").len();
    if time_issues > 0 {
        lines.push(format!(
            "  {time_issues} row(s) had an unreadable time and were kept without one."
        ));
    }

    let unmatched = format::array_field(data, "unmatched_force_ids")
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<&str>>();
    if !unmatched.is_empty() {
        lines.push(format!(
            "  --force-include ids not found: {}",
            unmatched.join(", ")
        ));
    }

    Ok(lines.join("\n"))
}
